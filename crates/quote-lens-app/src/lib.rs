#![warn(missing_docs)]
//! # quote-lens-app
//!
//! ## Purpose
//! Orchestrates selection, submission, and result display for `quote-lens`.
//!
//! ## Responsibilities
//! - Expose the build-time application version.
//! - Resolve endpoint configuration from the environment.
//! - Load quote files from disk for the driver binary.
//! - Resolve one dispatched request into exactly one lifecycle outcome.
//!
//! ## Data flow
//! Driver input -> [`load_quote_image`] -> page controller events ->
//! dispatched request -> [`resolve_request`] -> resolution event -> rendered
//! sections or error panel.
//!
//! ## Ownership and lifetimes
//! This crate passes owned requests and outcomes between the event loop and
//! worker threads to avoid hidden aliasing across the submission boundary.
//!
//! ## Error model
//! Driver-facing failures are wrapped in [`AppError`] and categorized for
//! shell-level reporting. Request failures are not errors here; they resolve
//! into [`RequestOutcome::Failure`].
//!
//! ## Security and privacy notes
//! Image bytes are read once and handed to the controller; log output is
//! limited to file names, sizes, and status values.

use std::path::Path;
use std::sync::Arc;

use quote_lens_client::{AnalysisClient, ClientError, HttpTransport};
use quote_lens_core::{AnalysisRequest, QuoteImage};
use quote_lens_ui::RequestOutcome;
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("QUOTE_LENS_VERSION");

/// Endpoint used when `QUOTE_LENS_ENDPOINT` is unset.
pub const DEFAULT_ANALYZE_ENDPOINT: &str = "http://127.0.0.1:5000/api/analyze";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the analysis endpoint from `QUOTE_LENS_ENDPOINT`.
///
/// Unset or blank values fall back to [`DEFAULT_ANALYZE_ENDPOINT`].
pub fn analyze_endpoint_from_env() -> String {
    match std::env::var("QUOTE_LENS_ENDPOINT") {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_ANALYZE_ENDPOINT.to_string(),
    }
}

/// Derives a media type from a file name's extension.
///
/// The analysis service accepts `png`, `jpg`, `jpeg`, and `pdf`; anything
/// else is forwarded as an opaque byte stream and rejected server-side.
pub fn media_type_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Loads a quote file from disk into a selection value.
///
/// # Errors
/// Returns [`AppError::Io`] when the file cannot be read.
pub fn load_quote_image(path: &Path) -> Result<QuoteImage, AppError> {
    let bytes = std::fs::read(path).map_err(AppError::Io)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type_for_file_name(&file_name);

    Ok(QuoteImage::new(file_name, media_type, bytes))
}

/// Builds the production analysis client for one endpoint.
///
/// # Errors
/// Returns [`AppError::Client`] when the endpoint violates policy or the
/// HTTP transport cannot be constructed.
pub fn build_http_client(endpoint: &str) -> Result<AnalysisClient, AppError> {
    let transport = HttpTransport::new().map_err(AppError::Client)?;
    AnalysisClient::new(endpoint, Arc::new(transport)).map_err(AppError::Client)
}

/// Resolves one dispatched request into exactly one lifecycle outcome.
///
/// Every failure kind (network, non-success response, malformed body) folds
/// into [`RequestOutcome::Failure`] with its display message; nothing is
/// retried.
pub fn resolve_request(client: &AnalysisClient, request: &AnalysisRequest) -> RequestOutcome {
    match client.submit(request) {
        Ok(result) => RequestOutcome::Success(result),
        Err(failure) => RequestOutcome::Failure(failure.message),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem failure while loading the selected file.
    #[error("file read error: {0}")]
    Io(std::io::Error),
    /// Client construction or endpoint policy error.
    #[error("client error: {0}")]
    Client(ClientError),
}
