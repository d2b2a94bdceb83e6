use super::PostRow;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::posts::EditArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &EditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Ownership is checked against the loaded collection.
    ctx.feed.refresh().await?;

    let post = ctx.feed.update(args.id, &args.title).await?;
    let affordances = ctx.feed.affordances(post.id);
    let owner = post.short_owner();
    output(&PostRow::new(post, owner, affordances), flags.format)
}
