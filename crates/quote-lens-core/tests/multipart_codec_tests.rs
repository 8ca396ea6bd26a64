//! Integration tests for the multipart request codec.

use quote_lens_core::{
    AnalysisRequest, CoreError, FIELD_CITY, FIELD_QUOTE_IMAGE, FIELD_STATE, LocationFields,
    QuoteImage,
};

fn fixture_request(city: Option<&str>, state: Option<&str>) -> AnalysisRequest {
    AnalysisRequest::new(
        QuoteImage::new("quote.png", "image/png", vec![1, 2, 3, 4]),
        LocationFields::new(
            city.map(|value| value.to_string()),
            state.map(|value| value.to_string()),
        ),
    )
}

#[test]
fn multipart_codec_tests_frames_image_and_location_fields() {
    let body = fixture_request(Some("Austin"), Some("TX"))
        .to_multipart_bytes("test-boundary")
        .expect("encoding should succeed");
    let text = String::from_utf8_lossy(&body);

    assert!(text.contains(&format!("name=\"{FIELD_QUOTE_IMAGE}\"; filename=\"quote.png\"")));
    assert!(text.contains("Content-Type: image/png"));
    assert!(text.contains(&format!("name=\"{FIELD_CITY}\"")));
    assert!(text.contains("Austin"));
    assert!(text.contains(&format!("name=\"{FIELD_STATE}\"")));
    assert!(text.contains("TX"));
    assert!(text.ends_with("--test-boundary--\r\n"));
}

#[test]
fn multipart_codec_tests_omits_blank_location_fields() {
    let body = fixture_request(Some("   "), None)
        .to_multipart_bytes("test-boundary")
        .expect("encoding should succeed");
    let text = String::from_utf8_lossy(&body);

    assert!(!text.contains(&format!("name=\"{FIELD_CITY}\"")));
    assert!(!text.contains(&format!("name=\"{FIELD_STATE}\"")));
}

#[test]
fn multipart_codec_tests_rejects_malformed_boundaries() {
    let request = fixture_request(None, None);

    assert!(matches!(
        request.to_multipart_bytes(""),
        Err(CoreError::InvalidBoundary(_))
    ));
    assert!(matches!(
        request.to_multipart_bytes("white space"),
        Err(CoreError::InvalidBoundary(_))
    ));
    assert!(matches!(
        AnalysisRequest::content_type("bad boundary"),
        Err(CoreError::InvalidBoundary(_))
    ));
}

#[test]
fn multipart_codec_tests_content_type_names_the_boundary() {
    let content_type =
        AnalysisRequest::content_type("test-boundary").expect("boundary should be accepted");
    assert_eq!(
        content_type,
        "multipart/form-data; boundary=test-boundary"
    );
}
