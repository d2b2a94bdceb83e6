//! Upload pipeline: local image asset → multipart-ready [`UploadPayload`].
//!
//! Assets are read through one [`AssetReader`] capability with two
//! implementations, chosen from [`UploadMode`]:
//! - [`DirectFileReader`] streams a local file from disk;
//! - [`BlobFetchReader`] fetches the whole asset into memory first, over HTTP
//!   for `http(s)://` URIs, for runtimes that cannot hand out file paths.
//!
//! The pipeline never sends anything. The gateway does.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use snap_config::{UploadConfig, UploadMode};
use snap_core::{CoreError, Draft};

use crate::error::{GatewayError, UploadError};

const DEFAULT_MIME: &str = "image/jpeg";
const DEFAULT_EXTENSION: &str = "jpg";
const UPLOAD_STEM: &str = "photo";

/// Image MIME type for a file name, from its extension.
///
/// Falls back to `image/jpeg` when there is no extension or it does not name
/// an image format.
#[must_use]
pub fn infer_mime(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .iter()
        .find(|m| m.type_() == mime_guess::mime::IMAGE)
        .map_or_else(|| DEFAULT_MIME.to_string(), |m| m.essence_str().to_string())
}

/// Upload file name (`photo.<ext>`) and MIME type for an asset URI.
fn describe(uri: &str, mime_hint: Option<&str>) -> (String, String) {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let name = path.rsplit('/').next().unwrap_or(path);

    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|e| infer_mime(&format!("x.{e}")) != DEFAULT_MIME || is_jpeg_ext(e));

    let mime = match mime_hint.map(str::trim) {
        Some(hint) if hint.starts_with("image/") => hint.to_ascii_lowercase(),
        _ => infer_mime(name),
    };
    let ext = ext.unwrap_or_else(|| extension_for(&mime).to_string());
    (format!("{UPLOAD_STEM}.{ext}"), mime)
}

fn is_jpeg_ext(ext: &str) -> bool {
    matches!(ext, "jpg" | "jpeg" | "jpe")
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/heic" => "heic",
        "image/heif" => "heif",
        "image/bmp" => "bmp",
        _ => DEFAULT_EXTENSION,
    }
}

/// Upload file contents.
#[derive(Debug)]
pub enum FileBody {
    /// Fully buffered asset.
    Bytes(Bytes),
    /// Asset streamed from disk, with its known length.
    Stream { body: reqwest::Body, len: u64 },
}

impl FileBody {
    #[must_use]
    pub fn len(&self) -> u64 {
        match self {
            Self::Bytes(bytes) => bytes.len() as u64,
            Self::Stream { len, .. } => *len,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub mime: String,
    pub body: FileBody,
}

/// A create request ready for the gateway: multipart fields `title`,
/// `user_uid` and `file`.
#[derive(Debug)]
pub struct UploadPayload {
    pub title: String,
    pub user_uid: String,
    pub file: FilePart,
}

impl UploadPayload {
    pub(crate) fn into_form(self) -> Result<Form, GatewayError> {
        let FilePart {
            file_name,
            mime,
            body,
        } = self.file;
        let part = match body {
            FileBody::Bytes(bytes) => Part::bytes(bytes.to_vec()),
            FileBody::Stream { body, len } => Part::stream_with_length(body, len),
        };
        let part = part
            .file_name(file_name)
            .mime_str(&mime)
            .map_err(|e| GatewayError::Protocol(format!("invalid content type {mime}: {e}")))?;
        Ok(Form::new()
            .text("title", self.title)
            .text("user_uid", self.user_uid)
            .part("file", part))
    }
}

/// Reads a local asset reference into an upload body.
#[async_trait]
pub trait AssetReader: Send + Sync {
    async fn read(&self, uri: &str) -> Result<FileBody, UploadError>;
}

fn local_path(uri: &str) -> &Path {
    Path::new(uri.strip_prefix("file://").unwrap_or(uri))
}

fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Buffers the whole asset in memory before upload.
#[derive(Debug, Clone, Default)]
pub struct BlobFetchReader {
    http: reqwest::Client,
}

impl BlobFetchReader {
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AssetReader for BlobFetchReader {
    async fn read(&self, uri: &str) -> Result<FileBody, UploadError> {
        if is_remote(uri) {
            let resp = self.http.get(uri).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(UploadError::FetchStatus {
                    uri: uri.to_string(),
                    status: status.as_u16(),
                });
            }
            return Ok(FileBody::Bytes(resp.bytes().await?));
        }

        let data = tokio::fs::read(local_path(uri))
            .await
            .map_err(|source| UploadError::Io {
                uri: uri.to_string(),
                source,
            })?;
        Ok(FileBody::Bytes(Bytes::from(data)))
    }
}

/// Streams the local file straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectFileReader;

#[async_trait]
impl AssetReader for DirectFileReader {
    async fn read(&self, uri: &str) -> Result<FileBody, UploadError> {
        let io_err = |source| UploadError::Io {
            uri: uri.to_string(),
            source,
        };
        let file = tokio::fs::File::open(local_path(uri)).await.map_err(io_err)?;
        let len = file.metadata().await.map_err(io_err)?.len();
        Ok(FileBody::Stream {
            body: reqwest::Body::from(file),
            len,
        })
    }
}

/// Turns drafts into [`UploadPayload`]s.
#[derive(Clone)]
pub struct UploadPipeline {
    reader: Arc<dyn AssetReader>,
    max_bytes: u64,
}

impl UploadPipeline {
    #[must_use]
    pub fn new(reader: Arc<dyn AssetReader>, max_bytes: u64) -> Self {
        Self { reader, max_bytes }
    }

    /// Pipeline with the reader matching `config.mode`.
    #[must_use]
    pub fn from_config(config: &UploadConfig) -> Self {
        let reader: Arc<dyn AssetReader> = match config.mode {
            UploadMode::Direct => Arc::new(DirectFileReader),
            UploadMode::BlobFetch => Arc::new(BlobFetchReader::default()),
        };
        Self::new(reader, config.max_upload_bytes())
    }

    /// Validate `draft`, read its asset, and assemble the payload for
    /// `user_uid`. Consumes the draft.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Invalid`] for a blank title or missing image,
    /// [`UploadError::TooLarge`] past the size limit, or the reader's error.
    pub async fn prepare(&self, draft: Draft, user_uid: &str) -> Result<UploadPayload, UploadError> {
        draft.validate()?;
        let Draft {
            title,
            local_asset_uri,
            mime_hint,
        } = draft;
        let uri = local_asset_uri
            .ok_or_else(|| CoreError::Validation("Please select an image".into()))?;

        let (file_name, mime) = describe(uri.trim(), mime_hint.as_deref());
        let body = self.reader.read(uri.trim()).await?;
        if body.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: body.len(),
                limit: self.max_bytes,
            });
        }
        tracing::debug!(%file_name, %mime, size = body.len(), "prepared upload");

        Ok(UploadPayload {
            title: title.trim().to_string(),
            user_uid: user_uid.to_string(),
            file: FilePart {
                file_name,
                mime,
                body,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn infer_mime_known_extensions() {
        assert_eq!(infer_mime("a.png"), "image/png");
        assert_eq!(infer_mime("a.JPG"), "image/jpeg");
        assert_eq!(infer_mime("a.gif"), "image/gif");
        assert_eq!(infer_mime("a.webp"), "image/webp");
    }

    #[test]
    fn infer_mime_defaults_to_jpeg() {
        assert_eq!(infer_mime("photo"), "image/jpeg");
        assert_eq!(infer_mime("notes.txt"), "image/jpeg");
        assert_eq!(infer_mime(""), "image/jpeg");
    }

    #[test]
    fn describe_uses_asset_extension() {
        assert_eq!(
            describe("file:///var/mobile/IMG_0001.PNG", None),
            ("photo.png".to_string(), "image/png".to_string())
        );
        assert_eq!(
            describe("https://cdn.test/x/beach.webp?size=large", None),
            ("photo.webp".to_string(), "image/webp".to_string())
        );
    }

    #[test]
    fn describe_without_extension_uses_hint_or_default() {
        assert_eq!(
            describe("content://media/external/images/42", Some("image/png")),
            ("photo.png".to_string(), "image/png".to_string())
        );
        assert_eq!(
            describe("blob:abc123", None),
            ("photo.jpg".to_string(), "image/jpeg".to_string())
        );
        assert_eq!(
            describe("/tmp/scan.txt", Some("text/plain")),
            ("photo.jpg".to_string(), "image/jpeg".to_string())
        );
    }

    fn draft_for(path: &Path) -> Draft {
        Draft::new("  Sunset ", Some(path.display().to_string()))
    }

    #[tokio::test]
    async fn direct_reader_streams_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("sunset.png");
        std::fs::write(&path, b"\x89PNG fake").unwrap();

        let pipeline = UploadPipeline::new(Arc::new(DirectFileReader), 1024);
        let payload = pipeline.prepare(draft_for(&path), "u1").await.unwrap();

        assert_eq!(payload.title, "Sunset");
        assert_eq!(payload.user_uid, "u1");
        assert_eq!(payload.file.file_name, "photo.png");
        assert_eq!(payload.file.mime, "image/png");
        assert!(matches!(payload.file.body, FileBody::Stream { len: 9, .. }));
    }

    #[tokio::test]
    async fn blob_reader_buffers_file_uri() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("beach.jpeg");
        std::fs::write(&path, b"jpegdata").unwrap();

        let pipeline = UploadPipeline::new(Arc::new(BlobFetchReader::default()), 1024);
        let draft = Draft::new("Beach", Some(format!("file://{}", path.display())));
        let payload = pipeline.prepare(draft, "u1").await.unwrap();

        assert_eq!(payload.file.file_name, "photo.jpeg");
        assert_eq!(payload.file.mime, "image/jpeg");
        match payload.file.body {
            FileBody::Bytes(bytes) => assert_eq!(&bytes[..], b"jpegdata"),
            other @ FileBody::Stream { .. } => panic!("expected bytes, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_draft_never_reads() {
        let pipeline = UploadPipeline::new(Arc::new(DirectFileReader), 1024);
        let err = pipeline
            .prepare(Draft::new("", Some("/does/not/exist.jpg".into())), "u1")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Invalid(_)), "{err:?}");

        let err = pipeline
            .prepare(Draft::new("Title", None), "u1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Please select an image");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let pipeline = UploadPipeline::new(Arc::new(DirectFileReader), 1024);
        let err = pipeline
            .prepare(Draft::new("Title", Some("/does/not/exist.jpg".into())), "u1")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn oversized_asset_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("big.jpg");
        std::fs::write(&path, vec![0_u8; 64]).unwrap();

        let pipeline = UploadPipeline::new(Arc::new(DirectFileReader), 16);
        let err = pipeline.prepare(draft_for(&path), "u1").await.unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { size: 64, limit: 16 }));
    }

    #[test]
    fn from_config_picks_reader_by_mode() {
        let config = UploadConfig {
            mode: UploadMode::BlobFetch,
            max_upload_mb: 2,
        };
        let pipeline = UploadPipeline::from_config(&config);
        assert_eq!(pipeline.max_bytes, 2 * 1024 * 1024);
    }
}
