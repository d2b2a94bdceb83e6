use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct HealthResponse {
    base_url: String,
    status: String,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let health = ctx.gateway.health().await?;
    output(
        &HealthResponse {
            base_url: ctx.config.api.base_url().to_string(),
            status: health.status,
        },
        flags.format,
    )
}
