use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, PostsCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign up, sign out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Browse and manage posts.
    Posts {
        #[command(subcommand)]
        action: PostsCommands,
    },
    /// Check the posts service is reachable.
    Health,
}
