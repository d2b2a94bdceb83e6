pub mod auth;
pub mod posts;

pub use auth::AuthCommands;
pub use posts::PostsCommands;
