#![warn(missing_docs)]
//! # quote-lens-analysis-contract
//!
//! ## Purpose
//! Defines the analysis endpoint's response schema and the client-side
//! helpers that interpret it.
//!
//! ## Responsibilities
//! - Parse analysis response payloads into owned, typed values.
//! - Map price status tokens into a closed enum with an explicit unknown
//!   fallback.
//! - Extract a display-safe failure message from error bodies.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_analysis_response`] -> result projection ->
//! rendered display sections. Error bodies go through
//! [`failure_message_from_body`] instead.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON returns [`AnalysisContractError`]. Presence of optional
//! comparison fields is a rendering concern, not a parse failure.
//!
//! ## Security and privacy notes
//! This crate processes pricing metadata only; it never touches image bytes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic failure message shown when an error body carries no usable text.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to analyze quote";

/// Closed set of price assessment tokens emitted by the analysis service.
///
/// Summaries use `excellent`/`good`/`fair`/`average`/`high`; line items use
/// `below`/`average`/`above`. Tokens introduced by newer server versions
/// deserialize to [`PriceStatus::Unknown`] instead of leaking a raw string
/// into presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceStatus {
    /// Significantly below expected pricing.
    Excellent,
    /// Reasonable pricing.
    Good,
    /// Fair pricing.
    Fair,
    /// Within the expected range.
    Average,
    /// Below the expected range.
    Below,
    /// Above the expected range.
    Above,
    /// Significantly above expected pricing.
    High,
    /// No assessment available, or an unrecognized server token.
    #[serde(other)]
    Unknown,
}

impl PriceStatus {
    /// Returns the canonical lowercase token for this status.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Average => "average",
            Self::Below => "below",
            Self::Above => "above",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

/// Location context echoed back by the analysis service.
///
/// The service echoes the raw form fields, so `city`/`state` may arrive as
/// empty strings; [`LocationContext::state_label`] and
/// [`LocationContext::city_label`] normalize blank values to absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationContext {
    /// City as supplied by the user, possibly blank.
    #[serde(default)]
    pub city: Option<String>,
    /// State as supplied by the user, possibly blank.
    #[serde(default)]
    pub state: Option<String>,
    /// Regional cost-adjustment factor; `1.0` means national average.
    pub multiplier: f64,
}

impl LocationContext {
    /// Returns the city when present and non-blank.
    pub fn city_label(&self) -> Option<&str> {
        normalized(self.city.as_deref())
    }

    /// Returns the state when present and non-blank.
    ///
    /// An absent state means no location was supplied and national-average
    /// pricing was used.
    pub fn state_label(&self) -> Option<&str> {
        normalized(self.state.as_deref())
    }
}

fn normalized(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Overall quote assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// Assessment classification token.
    pub status: PriceStatus,
    /// Human-readable assessment sentence.
    pub message: String,
    /// Sum of all quoted line items.
    pub total_quoted: f64,
    /// Expected total when comparison data exists.
    #[serde(default)]
    pub total_expected: Option<f64>,
    /// Quoted minus expected total.
    #[serde(default)]
    pub total_difference: Option<f64>,
    /// Relative difference in percent.
    #[serde(default)]
    pub percent_difference: Option<f64>,
}

/// Low/high bounds of expected pricing for one line item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

/// One priced component of the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Work description extracted from the quote.
    pub description: String,
    /// Snake-case job type token.
    pub job_type: String,
    /// Per-item assessment classification.
    pub status: PriceStatus,
    /// Price quoted for this item.
    pub quoted_price: f64,
    /// Expected average price when comparison data exists.
    #[serde(default)]
    pub average_price: Option<f64>,
    /// Expected price range when comparison data exists.
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    /// Quoted minus average price.
    #[serde(default)]
    pub difference: Option<f64>,
    /// Relative difference in percent.
    #[serde(default)]
    pub percent_difference: Option<f64>,
    /// Human-readable per-item note.
    pub message: String,
}

impl LineItem {
    /// Returns `true` when the full comparison block can be rendered.
    ///
    /// Comparison mode requires every comparison field; anything less renders
    /// the reduced no-data presentation.
    pub fn has_comparison(&self) -> bool {
        self.average_price.is_some()
            && self.price_range.is_some()
            && self.difference.is_some()
            && self.percent_difference.is_some()
    }
}

/// Parsed analysis response from the endpoint.
///
/// Item order is preserved exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Location context used for regional price adjustment.
    pub location: LocationContext,
    /// Overall assessment.
    pub summary: QuoteSummary,
    /// Per-line-item comparisons, in server order.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Parses raw JSON into a validated analysis result.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON or a body that
/// does not match the response shape.
pub fn parse_analysis_response(raw: &str) -> Result<AnalysisResult, AnalysisContractError> {
    serde_json::from_str(raw).map_err(AnalysisContractError::Decode)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Extracts the display message from a failure response body.
///
/// Uses the server-provided `error` field verbatim when present and
/// non-blank; otherwise returns [`FALLBACK_FAILURE_MESSAGE`]. A body that is
/// not valid JSON also falls back, so transport-level garbage never reaches
/// the error panel.
pub fn failure_message_from_body(raw: &str) -> String {
    serde_json::from_str::<ErrorBody>(raw)
        .ok()
        .and_then(|body| body.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string())
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// JSON decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}
