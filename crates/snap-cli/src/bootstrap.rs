use anyhow::Context;

/// Load `.env` (if any) and the layered configuration.
pub fn load_config() -> anyhow::Result<snap_config::SnapConfig> {
    load_dotenv()?;
    snap_config::SnapConfig::load().context("failed to load travelsnap configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(anyhow::Error::from(error).context("failed to load .env")),
    }
}
