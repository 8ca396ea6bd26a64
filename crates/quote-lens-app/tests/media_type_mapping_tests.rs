//! Integration tests for file-extension media type mapping.

use quote_lens_app::media_type_for_file_name;

#[test]
fn media_type_mapping_tests_covers_accepted_extensions() {
    assert_eq!(media_type_for_file_name("quote.png"), "image/png");
    assert_eq!(media_type_for_file_name("quote.JPG"), "image/jpeg");
    assert_eq!(media_type_for_file_name("quote.jpeg"), "image/jpeg");
    assert_eq!(media_type_for_file_name("quote.pdf"), "application/pdf");
    assert_eq!(
        media_type_for_file_name("quote.webp"),
        "application/octet-stream"
    );
    assert_eq!(
        media_type_for_file_name("no-extension"),
        "application/octet-stream"
    );
}
