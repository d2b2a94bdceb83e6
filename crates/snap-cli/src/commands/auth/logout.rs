use serde::Serialize;
use snap_client::{Confirm, sign_out_confirmed};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::LogoutArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::prompt::{AutoConfirm, StdinConfirm};

#[derive(Serialize)]
struct AuthLogoutResponse {
    signed_out: bool,
}

pub async fn handle(args: &LogoutArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.session.current_identity().is_none() {
        return output(&AuthLogoutResponse { signed_out: false }, flags.format);
    }

    let confirm: &dyn Confirm = if args.yes { &AutoConfirm } else { &StdinConfirm };
    let signed_out = sign_out_confirmed(&ctx.session, confirm).await?;
    output(&AuthLogoutResponse { signed_out }, flags.format)
}
