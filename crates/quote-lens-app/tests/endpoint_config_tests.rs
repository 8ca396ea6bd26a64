//! Integration tests for endpoint configuration.

use quote_lens_app::{DEFAULT_ANALYZE_ENDPOINT, analyze_endpoint_from_env};

#[test]
fn endpoint_config_tests_env_override_and_default() {
    // Safety:
    // - Integration tests mutate process env in a single-threaded test body.
    // - We reset the variable before returning.
    unsafe { std::env::set_var("QUOTE_LENS_ENDPOINT", "https://quotes.example.test/api/analyze") };
    assert_eq!(
        analyze_endpoint_from_env(),
        "https://quotes.example.test/api/analyze"
    );

    // Safety: see rationale above.
    unsafe { std::env::set_var("QUOTE_LENS_ENDPOINT", "   ") };
    assert_eq!(analyze_endpoint_from_env(), DEFAULT_ANALYZE_ENDPOINT);

    // Safety: see rationale above.
    unsafe { std::env::remove_var("QUOTE_LENS_ENDPOINT") };
    assert_eq!(analyze_endpoint_from_env(), DEFAULT_ANALYZE_ENDPOINT);
}
