//! # snap-gateway
//!
//! Remote access for TravelSnap:
//! - [`PostGateway`], the typed contract of the posts REST service, and its
//!   reqwest implementation [`HttpPostGateway`]
//! - the [`UploadPipeline`], which turns a draft's local image into a
//!   ready-to-send [`UploadPayload`]
//!
//! Every gateway call is a single request/response round trip. Nothing here
//! retries; callers decide.

pub mod client;
pub mod error;
pub mod http;
mod posts;
pub mod upload;

pub use client::{HealthStatus, HttpPostGateway, PostGateway};
pub use error::{GatewayError, UploadError};
pub use upload::{
    AssetReader, BlobFetchReader, DirectFileReader, FileBody, FilePart, UploadPayload,
    UploadPipeline, infer_mime,
};
