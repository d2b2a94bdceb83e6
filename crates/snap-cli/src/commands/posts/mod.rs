mod create;
mod delete;
mod edit;
mod get;
mod list;

use chrono::{DateTime, Utc};
use serde::Serialize;
use snap_core::{Affordances, PostId};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PostsCommands;
use crate::context::AppContext;

/// Handle `snap posts <subcommand>`.
pub async fn handle(
    action: &PostsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PostsCommands::List => list::handle(ctx, flags).await,
        PostsCommands::Get(args) => get::handle(args, ctx, flags).await,
        PostsCommands::Create(args) => create::handle(args, ctx, flags).await,
        PostsCommands::Edit(args) => edit::handle(args, ctx, flags).await,
        PostsCommands::Delete(args) => delete::handle(args, ctx, flags).await,
    }
}

/// One post as printed, with the caller's allowed actions.
#[derive(Serialize)]
struct PostRow {
    id: PostId,
    title: String,
    image_url: String,
    owner: String,
    created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    affordances: Affordances,
}

impl PostRow {
    fn new(post: snap_core::Post, owner: String, affordances: Affordances) -> Self {
        Self {
            id: post.id,
            title: post.title,
            image_url: post.image_url,
            owner,
            created_at: post.created_at,
            affordances,
        }
    }
}
