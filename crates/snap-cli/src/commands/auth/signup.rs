use snap_auth::Credentials;

use super::SignedInResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::CredentialArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::prompt::password_or_stdin;

pub async fn handle(
    args: &CredentialArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = password_or_stdin(args.password.as_deref()).await?;
    let credentials = Credentials::new(&args.email, &password)?;
    let identity = ctx.session.sign_up(&credentials).await?;
    tracing::info!(uid = %identity.uid, "account created");
    output(&SignedInResponse::from(identity), flags.format)
}
