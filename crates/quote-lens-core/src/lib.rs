#![warn(missing_docs)]
//! # quote-lens-core
//!
//! ## Purpose
//! Defines the pure request-side data model used across the `quote-lens`
//! workspace.
//!
//! ## Responsibilities
//! - Represent the currently selected quote image and optional location
//!   fields.
//! - Build the outgoing analysis request from one selection.
//! - Encode requests into `multipart/form-data` bytes for transport.
//!
//! ## Data flow
//! File selection produces a [`QuoteImage`]. On submit, the controller pairs
//! it with [`LocationFields`] into an [`AnalysisRequest`], which encodes
//! itself for the analysis endpoint.
//!
//! ## Ownership and lifetimes
//! Images and requests own their backing buffers (`Vec<u8>`) to avoid hidden
//! borrow/lifetime coupling between the event loop and pending transport
//! work.
//!
//! ## Error model
//! Encoding failures (invalid boundary token) return [`CoreError`] variants
//! with caller-actionable categorization.
//!
//! ## Security and privacy notes
//! This crate never logs image bytes. File names and location fields are
//! treated as user-visible values and are passed through untransformed.
//!
//! ## Example
//! ```rust
//! use quote_lens_core::{AnalysisRequest, LocationFields, QuoteImage};
//!
//! let image = QuoteImage::new("quote.png", "image/png", vec![0x89, 0x50]);
//! let request = AnalysisRequest::new(image, LocationFields::default());
//! let body = request.to_multipart_bytes("boundary-token").unwrap();
//! assert!(!body.is_empty());
//! ```

use thiserror::Error;

/// Multipart field name carrying the quote image.
pub const FIELD_QUOTE_IMAGE: &str = "quote_image";
/// Multipart field name carrying the optional city.
pub const FIELD_CITY: &str = "city";
/// Multipart field name carrying the optional state.
pub const FIELD_STATE: &str = "state";

/// Longest boundary token permitted by the multipart grammar.
const MAX_BOUNDARY_LEN: usize = 70;

/// The user's currently selected quote file.
///
/// Replaced wholesale on every selection; at most one is live at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteImage {
    /// File name as reported by the picker or drop source.
    pub file_name: String,
    /// Declared media type (for example `image/png`).
    pub media_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl QuoteImage {
    /// Constructs a selection from picker or drop input.
    ///
    /// Any media type is accepted; only downstream rendering branches on it.
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Returns `true` when the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Optional free-text location fields accompanying a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFields {
    /// City name, if the user filled it in.
    pub city: Option<String>,
    /// State code or name, if the user filled it in.
    pub state: Option<String>,
}

impl LocationFields {
    /// Constructs location fields, treating blank input as absent.
    pub fn new(city: Option<String>, state: Option<String>) -> Self {
        Self {
            city: city.filter(|value| !value.trim().is_empty()),
            state: state.filter(|value| !value.trim().is_empty()),
        }
    }
}

/// The outgoing analysis payload: one image plus optional location fields.
///
/// Constructed exactly once per submit and discarded after the request
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Image to be analyzed.
    pub image: QuoteImage,
    /// Optional location context forwarded to the pricing model.
    pub location: LocationFields,
}

impl AnalysisRequest {
    /// Pairs the current selection with location fields.
    pub fn new(image: QuoteImage, location: LocationFields) -> Self {
        Self { image, location }
    }

    /// Encodes the request as a `multipart/form-data` body.
    ///
    /// Blank location fields are omitted entirely; the server treats missing
    /// fields as empty strings.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBoundary`] when the boundary token is
    /// empty, too long, or contains characters outside the multipart token
    /// grammar.
    pub fn to_multipart_bytes(&self, boundary: &str) -> Result<Vec<u8>, CoreError> {
        validate_boundary(boundary)?;

        let mut body = Vec::with_capacity(self.image.bytes.len() + 512);

        push_part_header(
            &mut body,
            boundary,
            &format!(
                "Content-Disposition: form-data; name=\"{FIELD_QUOTE_IMAGE}\"; filename=\"{}\"\r\nContent-Type: {}",
                sanitize_header_value(&self.image.file_name),
                sanitize_header_value(&self.image.media_type),
            ),
        );
        body.extend_from_slice(&self.image.bytes);
        body.extend_from_slice(b"\r\n");

        if let Some(city) = self.location.city.as_deref() {
            push_text_part(&mut body, boundary, FIELD_CITY, city);
        }
        if let Some(state) = self.location.state.as_deref() {
            push_text_part(&mut body, boundary, FIELD_STATE, state);
        }

        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        Ok(body)
    }

    /// Returns the `Content-Type` header value matching
    /// [`Self::to_multipart_bytes`] output.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBoundary`] for boundary tokens rejected by
    /// the encoder.
    pub fn content_type(boundary: &str) -> Result<String, CoreError> {
        validate_boundary(boundary)?;
        Ok(format!("multipart/form-data; boundary={boundary}"))
    }
}

fn push_part_header(body: &mut Vec<u8>, boundary: &str, headers: &str) {
    body.extend_from_slice(format!("--{boundary}\r\n{headers}\r\n\r\n").as_bytes());
}

fn push_text_part(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    push_part_header(
        body,
        boundary,
        &format!("Content-Disposition: form-data; name=\"{name}\""),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

// Header values land inside quoted strings; CR/LF or quotes would break the
// part framing.
fn sanitize_header_value(value: &str) -> String {
    value
        .chars()
        .map(|character| match character {
            '"' => '\'',
            '\r' | '\n' => ' ',
            other => other,
        })
        .collect()
}

fn validate_boundary(boundary: &str) -> Result<(), CoreError> {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(CoreError::InvalidBoundary(format!(
            "boundary length {} is outside 1..={MAX_BOUNDARY_LEN}",
            boundary.len()
        )));
    }

    let acceptable = boundary
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'));
    if !acceptable {
        return Err(CoreError::InvalidBoundary(
            "boundary must contain only ASCII alphanumerics, '-' or '_'".to_string(),
        ));
    }

    Ok(())
}

/// Error type for request encoding failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Multipart boundary token violates the multipart grammar.
    #[error("invalid multipart boundary: {0}")]
    InvalidBoundary(String),
}
