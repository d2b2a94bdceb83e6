use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    uid: Option<String>,
    email: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match (ctx.session.current_identity(), &ctx.token_store) {
        (Some(identity), store) => AuthStatusResponse {
            authenticated: true,
            email: Some(identity.display_email().to_string()),
            uid: Some(identity.uid),
            token_source: store.as_ref().and_then(|store| store.detect_source()),
            note: None,
        },
        (None, None) => AuthStatusResponse {
            authenticated: false,
            uid: None,
            email: None,
            token_source: None,
            note: Some("SNAP_IDENTITY__API_KEY not configured".into()),
        },
        (None, Some(_)) => AuthStatusResponse {
            authenticated: false,
            uid: None,
            email: None,
            token_source: None,
            note: Some("no stored session".into()),
        },
    };

    output(&status, flags.format)
}
