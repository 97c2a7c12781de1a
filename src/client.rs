//! HTTP client implementation and per-attempt timing

use crate::{
    error::{AppError, Result},
    types::ProbeOutcome,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Seam for issuing one timed fetch attempt.
///
/// Every failure mode is folded into the returned outcome, so callers
/// never observe an error channel: the probe loop is classification-total.
#[async_trait]
pub trait ResourceProber: Send + Sync {
    /// Issue a single GET against `url`, timing it and classifying the result
    async fn probe(&self, url: &str) -> (ProbeOutcome, Duration);
}

/// HTTP client for the latency probe
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// Create a new probe client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(crate::defaults::DEFAULT_TIMEOUT)
    }

    /// Create a new probe client with a custom per-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("resource-latency-probe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceProber for ProbeClient {
    async fn probe(&self, url: &str) -> (ProbeOutcome, Duration) {
        let start = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return (ProbeOutcome::TransportFailure(e.to_string()), start.elapsed()),
        };

        let status = response.status().as_u16();

        // The 200 path reads and decodes the body; any other status only
        // needs the status line, matching what classification consumes.
        let body = if status == 200 {
            match response.bytes().await {
                Ok(body) => Some(body),
                Err(e) => {
                    return (ProbeOutcome::TransportFailure(e.to_string()), start.elapsed())
                }
            }
        } else {
            None
        };

        let elapsed = start.elapsed();
        let outcome = classify_response(status, body.as_deref());

        (outcome, elapsed)
    }
}

/// Map an HTTP status (and, for 200, the response body) onto the outcome
/// taxonomy.
///
/// A 200 body that fails to decode as JSON is folded into
/// `TransportFailure` rather than aborting the run.
pub fn classify_response(status: u16, body: Option<&[u8]>) -> ProbeOutcome {
    match status {
        200 => match serde_json::from_slice(body.unwrap_or_default()) {
            Ok(payload) => ProbeOutcome::Success(payload),
            Err(e) => {
                ProbeOutcome::TransportFailure(format!("Failed to decode response body: {}", e))
            }
        },
        404 => ProbeOutcome::NotFound,
        status if status >= 500 => ProbeOutcome::ServerError(status),
        status => ProbeOutcome::UnexpectedStatus(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_success_decodes_payload() {
        let outcome = classify_response(200, Some(br#"{"id":1,"name":"Alice"}"#));
        assert_eq!(outcome, ProbeOutcome::Success(json!({"id": 1, "name": "Alice"})));
    }

    #[test]
    fn test_classify_not_found() {
        assert_eq!(classify_response(404, None), ProbeOutcome::NotFound);
    }

    #[test]
    fn test_classify_server_errors() {
        assert_eq!(classify_response(500, None), ProbeOutcome::ServerError(500));
        assert_eq!(classify_response(503, None), ProbeOutcome::ServerError(503));
        assert_eq!(classify_response(599, None), ProbeOutcome::ServerError(599));
    }

    #[test]
    fn test_classify_unexpected_statuses() {
        assert_eq!(classify_response(201, None), ProbeOutcome::UnexpectedStatus(201));
        assert_eq!(classify_response(304, None), ProbeOutcome::UnexpectedStatus(304));
        assert_eq!(classify_response(403, None), ProbeOutcome::UnexpectedStatus(403));
        assert_eq!(classify_response(418, None), ProbeOutcome::UnexpectedStatus(418));
    }

    #[test]
    fn test_classify_malformed_json_folds_into_transport_failure() {
        let outcome = classify_response(200, Some(b"not json at all"));
        match outcome {
            ProbeOutcome::TransportFailure(msg) => {
                assert!(msg.contains("decode"));
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_empty_success_body_is_transport_failure() {
        // An empty body is not valid JSON
        let outcome = classify_response(200, Some(b""));
        assert!(outcome.is_transport_failure());
    }

    #[test]
    fn test_client_construction() {
        assert!(ProbeClient::new().is_ok());
        assert!(ProbeClient::with_timeout(Duration::from_secs(1)).is_ok());
    }
}
