//! Integration tests for VERSION propagation into runtime display.

use std::path::Path;

use quote_lens_app::app_version;

#[test]
fn version_display_tests_matches_root_version_file() {
    let version_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../VERSION");
    let recorded = std::fs::read_to_string(version_file).expect("VERSION should be readable");
    assert_eq!(recorded.trim(), app_version());
}
