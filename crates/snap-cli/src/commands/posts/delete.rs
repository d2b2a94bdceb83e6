use serde::Serialize;
use snap_client::{Confirm, DeleteOutcome};
use snap_core::PostId;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::posts::DeleteArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::prompt::{AutoConfirm, StdinConfirm};

#[derive(Serialize)]
struct PostDeleteResponse {
    id: PostId,
    deleted: bool,
}

pub async fn handle(args: &DeleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.feed.refresh().await?;

    let confirm: &dyn Confirm = if args.yes { &AutoConfirm } else { &StdinConfirm };
    let outcome = ctx.feed.delete(args.id, confirm).await?;
    let deleted = matches!(outcome, DeleteOutcome::Deleted { .. });
    output(
        &PostDeleteResponse {
            id: args.id,
            deleted,
        },
        flags.format,
    )
}
