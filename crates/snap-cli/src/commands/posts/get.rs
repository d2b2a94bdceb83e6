use anyhow::Context;

use super::PostRow;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::posts::PostIdArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &PostIdArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.feed.refresh().await?;
    let detail = ctx
        .feed
        .detail(args.id)
        .with_context(|| format!("post {} not found", args.id))?;
    output(
        &PostRow::new(detail.post, detail.owner_label, detail.affordances),
        flags.format,
    )
}
