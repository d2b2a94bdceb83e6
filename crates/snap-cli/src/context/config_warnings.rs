use snap_config::SnapConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &SnapConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SnapConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.identity.is_configured() {
        if has_env_prefix(&env_keys, "SNAP_IDENTITY") {
            warnings.push(
                "Identity config appears default while SNAP_IDENTITY* env vars exist. Use double underscores (example: SNAP_IDENTITY__API_KEY)."
                    .to_string(),
            );
        } else {
            warnings.push(
                "Identity provider is not configured; sign-in is unavailable. Set SNAP_IDENTITY__API_KEY."
                    .to_string(),
            );
        }
    }

    if config.api.base_url == snap_config::ApiConfig::default().base_url
        && has_single_underscore_key(&env_keys, "SNAP_API")
    {
        warnings.push(
            "API config appears default while SNAP_API* env vars exist. Use double underscores (example: SNAP_API__BASE_URL)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    let correct = format!("{prefix}__");
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&correct))
}
