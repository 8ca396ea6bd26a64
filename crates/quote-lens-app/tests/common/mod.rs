//! Shared fixtures for app integration tests.

use std::sync::Arc;

use quote_lens_analysis_contract::{AnalysisResult, parse_analysis_response};
use quote_lens_client::{AnalysisClient, AnalysisTransport, ClientError, WireResponse};
use quote_lens_core::{LocationFields, QuoteImage};

/// Raw success payload mirroring the analysis backend's response shape.
#[allow(dead_code)]
pub const RESULT_JSON: &str = r#"{
    "success": true,
    "location": {"city": "Austin", "state": "TX", "multiplier": 1.18},
    "summary": {
        "status": "good",
        "message": "Prices look fair",
        "total_quoted": 500.0,
        "total_expected": 520.0,
        "total_difference": -20.0,
        "percent_difference": -3.8
    },
    "items": [{
        "description": "Replace water heater",
        "job_type": "water_heater_replacement",
        "status": "above",
        "quoted_price": 1450.0,
        "average_price": 1200.0,
        "price_range": {"low": 900.0, "high": 1400.0},
        "difference": 250.0,
        "percent_difference": 20.8,
        "message": "Above average - consider negotiating"
    }]
}"#;

/// Creates a deterministic image selection fixture.
#[allow(dead_code)]
pub fn fixture_image() -> QuoteImage {
    QuoteImage::new("quote.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47])
}

/// Creates deterministic location fields fixture.
#[allow(dead_code)]
pub fn fixture_location() -> LocationFields {
    LocationFields::new(Some("Austin".to_string()), Some("TX".to_string()))
}

/// Creates the parsed counterpart of [`RESULT_JSON`].
#[allow(dead_code)]
pub fn fixture_result() -> AnalysisResult {
    parse_analysis_response(RESULT_JSON).expect("fixture payload should parse")
}

/// Transport double returning one canned wire response.
#[allow(dead_code)]
pub struct CannedTransport {
    pub status: u16,
    pub body: &'static str,
}

impl AnalysisTransport for CannedTransport {
    fn execute(
        &self,
        _endpoint: &str,
        _content_type: &str,
        _body: &[u8],
    ) -> Result<WireResponse, ClientError> {
        Ok(WireResponse {
            status: self.status,
            body: self.body.as_bytes().to_vec(),
        })
    }
}

/// Transport double that fails at the network level.
#[allow(dead_code)]
pub struct UnreachableTransport;

impl AnalysisTransport for UnreachableTransport {
    fn execute(
        &self,
        _endpoint: &str,
        _content_type: &str,
        _body: &[u8],
    ) -> Result<WireResponse, ClientError> {
        Err(ClientError::Network("connection refused".to_string()))
    }
}

/// Builds a client over a canned transport.
#[allow(dead_code)]
pub fn canned_client(status: u16, body: &'static str) -> AnalysisClient {
    AnalysisClient::new(
        "https://quotes.example.test/api/analyze",
        Arc::new(CannedTransport { status, body }),
    )
    .expect("fixture client should build")
}
