pub mod auth;
pub mod dispatch;
pub mod health;
pub mod posts;

pub use dispatch::dispatch;
