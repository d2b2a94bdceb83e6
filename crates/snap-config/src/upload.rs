//! Upload pipeline configuration.

use serde::{Deserialize, Serialize};

/// How local image assets are turned into upload bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadMode {
    /// Stream the local file directly from disk.
    Direct,
    /// Fetch the asset into memory first (runtimes without filesystem paths).
    BlobFetch,
}

impl UploadMode {
    /// Mode suited to the runtime this binary was built for.
    #[must_use]
    pub const fn for_runtime() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::BlobFetch
        } else {
            Self::Direct
        }
    }
}

impl Default for UploadMode {
    fn default() -> Self {
        Self::for_runtime()
    }
}

const fn default_max_upload_mb() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    #[serde(default)]
    pub mode: UploadMode,

    /// Largest asset accepted by the pipeline, in megabytes.
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            mode: UploadMode::default(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

impl UploadConfig {
    /// Helper to return the upload limit in bytes.
    #[must_use]
    pub const fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}
