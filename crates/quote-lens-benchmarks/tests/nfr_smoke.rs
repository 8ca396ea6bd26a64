//! Benchmark smoke test for the deterministic projection loop.

use std::time::Instant;

use quote_lens_analysis_contract::{
    AnalysisResult, LineItem, LocationContext, PriceRange, PriceStatus, QuoteSummary,
};
use quote_lens_projection::project;

fn large_result(item_count: usize) -> AnalysisResult {
    let items = (0..item_count)
        .map(|index| LineItem {
            description: format!("Line item {index}"),
            job_type: "water_heater_replacement".to_string(),
            status: PriceStatus::Above,
            quoted_price: 1_000.0 + index as f64,
            average_price: Some(950.0),
            price_range: Some(PriceRange {
                low: 800.0,
                high: 1_100.0,
            }),
            difference: Some(50.0 + index as f64),
            percent_difference: Some(5.3),
            message: "Above average - consider negotiating".to_string(),
        })
        .collect();

    AnalysisResult {
        location: LocationContext {
            city: Some("Austin".to_string()),
            state: Some("TX".to_string()),
            multiplier: 1.18,
        },
        summary: QuoteSummary {
            status: PriceStatus::High,
            message: "This quote is significantly above average.".to_string(),
            total_quoted: 250_000.0,
            total_expected: Some(230_000.0),
            total_difference: Some(20_000.0),
            percent_difference: Some(8.7),
        },
        items,
    }
}

#[test]
fn benchmark_projection_smoke_prints_latency() {
    let result = large_result(200);

    let start = Instant::now();
    let mut card_total = 0_usize;
    for _ in 0..100 {
        let sections = project(&result);
        card_total += sections.items.len();
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_projection_elapsed_ms={elapsed_ms}");
    println!("benchmark_projection_card_total={card_total}");

    // Generous bound: a correctness guardrail, not a latency target.
    assert_eq!(card_total, 200 * 100);
    assert!(
        elapsed_ms < 5_000,
        "projection smoke benchmark should stay bounded"
    );
}
