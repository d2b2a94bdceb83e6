use snap_core::Draft;

use super::PostRow;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::posts::CreateArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &CreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut draft = Draft::new(&args.title, Some(args.image.clone()));
    if let Some(mime) = &args.mime {
        draft = draft.with_mime_hint(mime);
    }

    let post = ctx.feed.create(draft).await?;
    tracing::info!(post_id = %post.id, "post created");

    let affordances = ctx.feed.affordances(post.id);
    let owner = post.short_owner();
    output(&PostRow::new(post, owner, affordances), flags.format)
}
