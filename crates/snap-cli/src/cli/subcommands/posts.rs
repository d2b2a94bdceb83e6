use clap::{Args, Subcommand};
use snap_core::PostId;

/// Post commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PostsCommands {
    /// List all posts, newest first.
    List,
    /// Show one post with its owner label and allowed actions.
    Get(PostIdArgs),
    /// Upload a new post.
    Create(CreateArgs),
    /// Change the title of a post you own.
    Edit(EditArgs),
    /// Delete a post you own.
    Delete(DeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PostIdArgs {
    pub id: PostId,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    /// Image file path, `file://` URI, or `http(s)://` URL.
    #[arg(long)]
    pub image: String,
    /// Override the inferred image MIME type.
    #[arg(long)]
    pub mime: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub id: PostId,
    #[arg(long)]
    pub title: String,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    pub id: PostId,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}
