#![warn(missing_docs)]
//! # quote-lens-client
//!
//! ## Purpose
//! Submits analysis requests to the remote endpoint and resolves them into
//! exactly one success or failure outcome.
//!
//! ## Responsibilities
//! - Validate analysis endpoint policy (http(s) scheme, `/api/analyze` path).
//! - Execute requests through an injectable transport abstraction.
//! - Classify failures into the network / non-success / malformed taxonomy
//!   and derive the display message for each.
//!
//! ## Data flow
//! [`quote_lens_core::AnalysisRequest`] -> multipart encoding ->
//! [`AnalysisTransport`] -> status + body -> parsed
//! [`quote_lens_analysis_contract::AnalysisResult`] or [`SubmitFailure`].
//!
//! ## Ownership and lifetimes
//! The client is cheaply cloneable (`Arc`-shared transport) so a pending
//! submission can run off the event loop while the controller retains its own
//! handle.
//!
//! ## Error model
//! Construction-time policy violations surface as [`ClientError`]. Runtime
//! failures resolve to [`SubmitFailure`], which always carries a
//! display-ready message; no failure is retried.
//!
//! ## Security and privacy notes
//! Image bytes flow through the transport exactly once and are never logged
//! by this crate.

use std::sync::Arc;

use quote_lens_analysis_contract::{
    AnalysisResult, failure_message_from_body, parse_analysis_response,
};
use quote_lens_core::AnalysisRequest;
use rand::Rng;
use thiserror::Error;
use url::Url;

/// Required analysis path suffix for v1.
pub const REQUIRED_ANALYZE_PATH: &str = "/api/analyze";

/// Raw response captured by a transport: status code plus body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl WireResponse {
    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by the analysis client.
///
/// Implementations perform exactly one request attempt; retry and timeout
/// policy are intentionally out of scope.
pub trait AnalysisTransport: Send + Sync {
    /// Sends one encoded request to the endpoint.
    ///
    /// # Errors
    /// Returns [`ClientError::Network`] when no response was obtained.
    fn execute(
        &self,
        endpoint: &str,
        content_type: &str,
        body: &[u8],
    ) -> Result<WireResponse, ClientError>;
}

/// Failure taxonomy for resolved submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport-level failure; no response was obtained.
    Network,
    /// The endpoint answered with a non-success status.
    Http(u16),
    /// A success status arrived with an undecodable body.
    MalformedBody,
}

/// One resolved submission failure with its display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Display-ready message for the error panel.
    pub message: String,
}

/// Analysis client that validates endpoint policy and resolves submissions.
#[derive(Clone)]
pub struct AnalysisClient {
    endpoint: String,
    transport: Arc<dyn AnalysisTransport>,
}

impl AnalysisClient {
    /// Creates a validated analysis client.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidEndpoint`] when the URL is not http(s)
    /// or does not end with [`REQUIRED_ANALYZE_PATH`].
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn AnalysisTransport>,
    ) -> Result<Self, ClientError> {
        let endpoint = endpoint.into();
        validate_analyze_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Submits one request and resolves it into exactly one outcome.
    ///
    /// Non-success responses use the body's `error` field verbatim when
    /// present, else the generic fallback message. Network failures and
    /// malformed bodies resolve through the same failure path.
    ///
    /// # Errors
    /// Returns [`SubmitFailure`] for every non-successful resolution; the
    /// caller renders `message` and may branch on `kind` for logging.
    pub fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitFailure> {
        let boundary = multipart_boundary();
        let body = request
            .to_multipart_bytes(&boundary)
            .map_err(|error| SubmitFailure {
                kind: FailureKind::MalformedBody,
                message: error.to_string(),
            })?;
        let content_type =
            AnalysisRequest::content_type(&boundary).map_err(|error| SubmitFailure {
                kind: FailureKind::MalformedBody,
                message: error.to_string(),
            })?;

        let response = self
            .transport
            .execute(&self.endpoint, &content_type, &body)
            .map_err(|error| SubmitFailure {
                kind: FailureKind::Network,
                message: error.to_string(),
            })?;

        let text = String::from_utf8_lossy(&response.body);
        if !response.is_success() {
            return Err(SubmitFailure {
                kind: FailureKind::Http(response.status),
                message: failure_message_from_body(&text),
            });
        }

        parse_analysis_response(&text).map_err(|error| SubmitFailure {
            kind: FailureKind::MalformedBody,
            message: error.to_string(),
        })
    }

    /// Returns the configured analysis endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Validates v1 analysis endpoint constraints.
///
/// # Errors
/// Returns [`ClientError::InvalidEndpoint`] for unparseable URLs, non-http(s)
/// schemes, or path mismatch.
pub fn validate_analyze_endpoint(endpoint: &str) -> Result<(), ClientError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| ClientError::InvalidEndpoint(format!("invalid analyze url: {error}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ClientError::InvalidEndpoint(
            "analyze endpoint must use http or https".to_string(),
        ));
    }

    if !parsed.path().ends_with(REQUIRED_ANALYZE_PATH) {
        return Err(ClientError::InvalidEndpoint(format!(
            "analyze endpoint path must end with {REQUIRED_ANALYZE_PATH}"
        )));
    }

    Ok(())
}

fn multipart_boundary() -> String {
    let token: [u8; 16] = rand::rng().random();
    format!("quote-lens-{}", hex::encode(token))
}

/// Production transport over a blocking HTTP client.
///
/// No timeout is configured; the request resolves or fails according to the
/// underlying transport's own behavior.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds the production transport.
    ///
    /// # Errors
    /// Returns [`ClientError::Network`] when the underlying client cannot be
    /// constructed.
    pub fn new() -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|error| ClientError::Network(error.to_string()))?;
        Ok(Self { client })
    }
}

impl AnalysisTransport for HttpTransport {
    fn execute(
        &self,
        endpoint: &str,
        content_type: &str,
        body: &[u8],
    ) -> Result<WireResponse, ClientError> {
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body.to_vec())
            .send()
            .map_err(|error| ClientError::Network(error.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|error| ClientError::Network(error.to_string()))?
            .to_vec();

        Ok(WireResponse { status, body })
    }
}

/// Errors produced by client construction and transports.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint violates analysis endpoint policy.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Transport failure; no response was obtained.
    #[error("network failure: {0}")]
    Network(String),
}
