//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use snap_config::{SnapConfig, UploadMode};

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "http://192.168.1.2:8000/"
timeout_secs = 5
user_agent = "travelsnap-test"
"#,
        )?;

        let config: SnapConfig = Figment::from(Serialized::defaults(SnapConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url(), "http://192.168.1.2:8000");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.user_agent, "travelsnap-test");
        Ok(())
    });
}

#[test]
fn loads_identity_and_upload_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[identity]
api_key = "AIza-toml"
init_timeout_secs = 3

[upload]
mode = "blob_fetch"
max_upload_mb = 4
"#,
        )?;

        let config: SnapConfig = Figment::from(Serialized::defaults(SnapConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.identity.is_configured());
        assert_eq!(config.identity.api_key, "AIza-toml");
        assert_eq!(config.identity.init_timeout_secs, 3);
        assert_eq!(
            config.identity.auth_endpoint,
            "https://identitytoolkit.googleapis.com"
        );
        assert_eq!(config.upload.mode, UploadMode::BlobFetch);
        assert_eq!(config.upload.max_upload_mb, 4);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "http://from-toml:8000"
"#,
        )?;
        jail.set_env("SNAP_API__BASE_URL", "https://from-env.example");

        let config: SnapConfig = Figment::from(Serialized::defaults(SnapConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("SNAP_").split("__"))
            .extract()?;

        assert_eq!(config.api.base_url(), "https://from-env.example");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".travelsnap")?;
        jail.create_file(
            ".travelsnap/config.toml",
            r#"
[identity]
api_key = "AIza-local"
"#,
        )?;

        let config = SnapConfig::load().expect("config loads");
        assert_eq!(config.identity.api_key, "AIza-local");
        Ok(())
    });
}

#[test]
fn invalid_base_url_fails_load() {
    Jail::expect_with(|jail| {
        jail.set_env("SNAP_API__BASE_URL", "localhost:8000");
        assert!(SnapConfig::load().is_err());
        Ok(())
    });
}

#[test]
fn unknown_upload_mode_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[upload]
mode = "carrier_pigeon"
"#,
        )?;

        let result: Result<SnapConfig, _> =
            Figment::from(Serialized::defaults(SnapConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
