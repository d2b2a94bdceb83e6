mod login;
mod logout;
mod signup;
mod status;

use serde::Serialize;
use snap_core::Identity;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `snap auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Signup(args) => signup::handle(args, ctx, flags).await,
        AuthCommands::Logout(args) => logout::handle(args, ctx, flags).await,
        AuthCommands::Status => status::handle(ctx, flags),
    }
}

#[derive(Serialize)]
struct SignedInResponse {
    uid: String,
    email: String,
}

impl From<Identity> for SignedInResponse {
    fn from(identity: Identity) -> Self {
        Self {
            email: identity.display_email().to_string(),
            uid: identity.uid,
        }
    }
}
