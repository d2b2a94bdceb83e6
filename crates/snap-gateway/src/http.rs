//! Shared HTTP response helpers for the posts service.
//!
//! Centralizes status-code checks (non-success → [`GatewayError::Server`])
//! and body decoding (shape mismatch → [`GatewayError::Protocol`]) so the
//! endpoint methods stay focused on request construction.

use serde::de::DeserializeOwned;

use crate::error::GatewayError;

#[derive(serde::Deserialize)]
struct ErrorDetail {
    detail: serde_json::Value,
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. On failure the message is the
/// service's `{"detail": ...}` field when present, otherwise the raw body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Check the status, then decode the body as JSON.
///
/// Transport failures while reading the body stay [`GatewayError::Network`];
/// only a body that arrived but does not match `T` is a protocol error.
pub async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GatewayError> {
    let resp = check_response(resp).await?;
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| GatewayError::Protocol(e.to_string()))
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorDetail>(body) {
        Ok(ErrorDetail {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorDetail { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(mock_response(200, "[]")).await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn not_found_extracts_detail() {
        let err = check_response(mock_response(404, r#"{"detail":"Post not found"}"#))
            .await
            .unwrap_err();
        match err {
            GatewayError::Server { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Post not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn structured_detail_is_kept_as_json() {
        let err = check_response(mock_response(
            422,
            r#"{"detail":[{"loc":["body","file"],"msg":"field required"}]}"#,
        ))
        .await
        .unwrap_err();
        assert!(err.to_string().contains("field required"));
    }

    #[tokio::test]
    async fn plain_body_is_message() {
        let err = check_response(mock_response(500, "Internal Server Error\n"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "server error (500): Internal Server Error"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_protocol_error() {
        let err = decode_json::<Vec<snap_core::Post>>(mock_response(200, r#"{"oops":true}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Protocol(_)), "{err:?}");
    }

    #[tokio::test]
    async fn decode_checks_status_first() {
        let err = decode_json::<Vec<snap_core::Post>>(mock_response(503, "down"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Server { status: 503, .. }));
    }
}
