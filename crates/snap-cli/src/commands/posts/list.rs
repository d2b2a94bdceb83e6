use serde::Serialize;

use super::PostRow;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PostListResponse {
    posts: Vec<PostRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'static str>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.feed.refresh().await?;

    let posts = ctx
        .feed
        .posts()
        .into_iter()
        .map(|post| {
            let affordances = ctx.feed.affordances(post.id);
            let owner = post.short_owner();
            PostRow::new(post, owner, affordances)
        })
        .collect::<Vec<_>>();

    let note = posts
        .is_empty()
        .then_some("No posts yet. Be the first to share!");
    output(&PostListResponse { posts, note }, flags.format)
}
