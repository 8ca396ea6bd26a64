#![warn(missing_docs)]
//! # quote-lens-projection
//!
//! ## Purpose
//! Projects one parsed analysis result into deterministic, display-ready
//! sections.
//!
//! ## Responsibilities
//! - Classify location context into regional or national-average display.
//! - Derive presentation tokens and badges from price status values.
//! - Format currency, percent, and multiplier values consistently.
//!
//! ## Data flow
//! [`quote_lens_analysis_contract::AnalysisResult`] -> [`project`] ->
//! [`RenderedSections`] consumed by the effect-executing driver.
//!
//! ## Ownership and lifetimes
//! Rendered sections own their strings, enabling the driver to display them
//! after the source result has been dropped.
//!
//! ## Error model
//! Projection is total: every well-formed result renders. Missing comparison
//! fields select the reduced presentation instead of failing.
//!
//! ## Security and privacy notes
//! Output contains only values already present in the server response.

use quote_lens_analysis_contract::{AnalysisResult, LineItem, PriceStatus};

/// Fixed notice shown when no location was supplied.
pub const NATIONAL_AVERAGE_NOTICE: &str =
    "Using national average pricing (no location specified)";

/// Qualitative comparison of the regional multiplier against `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierComparison {
    /// Multiplier above `1.0`.
    AboveAverage,
    /// Multiplier below `1.0`.
    BelowAverage,
    /// Multiplier exactly `1.0`.
    AtAverage,
}

impl MultiplierComparison {
    /// Returns the display note for this comparison.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AboveAverage => "Higher than national average",
            Self::BelowAverage => "Lower than national average",
            Self::AtAverage => "National average",
        }
    }
}

/// Visual polarity of a price delta.
///
/// A strictly positive difference means the quote exceeds the expectation,
/// so positive deltas carry the unfavorable polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaPolarity {
    /// Quoted above expectation.
    OverBudget,
    /// Quoted at or below expectation.
    UnderBudget,
}

impl DeltaPolarity {
    /// Returns the presentation class used by the display layer.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::OverBudget => "negative",
            Self::UnderBudget => "positive",
        }
    }
}

/// Location display section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSection {
    /// A state was supplied; regional pricing applies.
    Regional {
        /// `"City, ST"` when a city is present, otherwise just the state.
        place: String,
        /// Multiplier with fixed two decimals and an `x` suffix.
        multiplier_display: String,
        /// Qualitative note relative to the national average.
        comparison: MultiplierComparison,
    },
    /// No state was supplied; the fixed national-average notice applies.
    NationalAverage,
}

/// Expected/difference block of the summary section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsComparison {
    /// Formatted expected total.
    pub expected: String,
    /// Combined signed difference display, e.g. `"-$20 (-3.8%)"`.
    pub difference: String,
    /// Visual polarity of the difference.
    pub polarity: DeltaPolarity,
}

/// Overall assessment display section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    /// Presentation token, `"status-" + status`.
    pub status_token: String,
    /// Uppercased badge label.
    pub badge: String,
    /// Assessment sentence.
    pub message: String,
    /// Formatted quoted total; always shown.
    pub total_quoted: String,
    /// Comparison block, present only when an expected total exists.
    pub comparison: Option<TotalsComparison>,
}

/// Comparison block of one item card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemComparison {
    /// Formatted average price.
    pub average: String,
    /// Formatted low-high range, e.g. `"$100 - $200"`.
    pub range: String,
    /// Combined signed difference display.
    pub difference: String,
    /// Visual polarity of the difference.
    pub polarity: DeltaPolarity,
}

/// One rendered line item, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    /// Work description.
    pub description: String,
    /// Job type with snake-case separators replaced by spaces.
    pub job_type_display: String,
    /// Presentation token for the card.
    pub status_token: String,
    /// Badge label; `"NO DATA"` when no comparison data exists.
    pub badge: String,
    /// Formatted quoted price; always shown.
    pub quoted: String,
    /// Full comparison block, absent in reduced mode.
    pub comparison: Option<ItemComparison>,
    /// Per-item note.
    pub message: String,
}

/// Complete rendered output of one analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSections {
    /// Location block.
    pub location: LocationSection,
    /// Summary block.
    pub summary: SummarySection,
    /// Item cards, order preserved from the input.
    pub items: Vec<ItemCard>,
}

/// Projects an analysis result into display sections.
///
/// Pure and deterministic: projecting the same result twice yields identical
/// output.
pub fn project(result: &AnalysisResult) -> RenderedSections {
    RenderedSections {
        location: project_location(result),
        summary: project_summary(result),
        items: result.items.iter().map(project_item).collect(),
    }
}

fn project_location(result: &AnalysisResult) -> LocationSection {
    let location = &result.location;
    let Some(state) = location.state_label() else {
        return LocationSection::NationalAverage;
    };

    let place = match location.city_label() {
        Some(city) => format!("{city}, {state}"),
        None => state.to_string(),
    };

    // Exact float comparison is intentional: 1.0 is the sentinel for "no
    // regional adjustment", not a computed value.
    let comparison = if location.multiplier > 1.0 {
        MultiplierComparison::AboveAverage
    } else if location.multiplier < 1.0 {
        MultiplierComparison::BelowAverage
    } else {
        MultiplierComparison::AtAverage
    };

    LocationSection::Regional {
        place,
        multiplier_display: format!("{:.2}x", location.multiplier),
        comparison,
    }
}

fn project_summary(result: &AnalysisResult) -> SummarySection {
    let summary = &result.summary;
    let token = summary.status.as_token();

    let comparison = match (
        summary.total_expected,
        summary.total_difference,
        summary.percent_difference,
    ) {
        (Some(expected), Some(difference), Some(percent)) => Some(TotalsComparison {
            expected: format_currency(expected),
            difference: format_delta(difference, percent),
            polarity: polarity_of(difference),
        }),
        _ => None,
    };

    SummarySection {
        status_token: format!("status-{token}"),
        badge: token.to_uppercase(),
        message: summary.message.clone(),
        total_quoted: format_currency(summary.total_quoted),
        comparison,
    }
}

fn project_item(item: &LineItem) -> ItemCard {
    let comparison = item_comparison(item);

    // Items without comparison data always take the distinct no-data
    // presentation, even when the reported status is not itself "unknown".
    let (token, badge) = if comparison.is_none() || item.status == PriceStatus::Unknown {
        ("unknown", "NO DATA".to_string())
    } else {
        let token = item.status.as_token();
        (token, token.to_uppercase())
    };

    ItemCard {
        description: item.description.clone(),
        job_type_display: item.job_type.replace('_', " "),
        status_token: format!("status-{token}"),
        badge,
        quoted: format_currency(item.quoted_price),
        comparison,
        message: item.message.clone(),
    }
}

// Comparison mode requires every comparison field; a payload missing any of
// them degrades to the reduced presentation.
fn item_comparison(item: &LineItem) -> Option<ItemComparison> {
    let average = item.average_price?;
    let range = item.price_range?;
    let difference = item.difference?;
    let percent = item.percent_difference?;

    Some(ItemComparison {
        average: format_currency(average),
        range: format!(
            "{} - {}",
            format_currency(range.low),
            format_currency(range.high)
        ),
        difference: format_delta(difference, percent),
        polarity: polarity_of(difference),
    })
}

fn polarity_of(difference: f64) -> DeltaPolarity {
    if difference > 0.0 {
        DeltaPolarity::OverBudget
    } else {
        DeltaPolarity::UnderBudget
    }
}

/// Formats a currency value with thousands grouping.
///
/// At most two fractional digits, trailing zeros trimmed; negative values
/// render as `-$N`.
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", grouped_magnitude(-value))
    } else {
        format!("${}", grouped_magnitude(value))
    }
}

/// Formats a signed currency delta.
///
/// Strictly positive values get an explicit `+`; zero renders unsigned.
pub fn format_signed_currency(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

/// Formats a signed percent delta with at most one fractional digit.
pub fn format_signed_percent(value: f64) -> String {
    let tenths = (value * 10.0).round() as i64;
    let sign = if tenths > 0 { "+" } else { "" };
    if tenths % 10 == 0 {
        format!("{sign}{}%", tenths / 10)
    } else {
        format!("{sign}{}%", tenths as f64 / 10.0)
    }
}

fn format_delta(difference: f64, percent: f64) -> String {
    format!(
        "{} ({})",
        format_signed_currency(difference),
        format_signed_percent(percent)
    )
}

fn grouped_magnitude(value: f64) -> String {
    let cents = (value * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction == 0 {
        grouped
    } else if fraction % 10 == 0 {
        format!("{grouped}.{}", fraction / 10)
    } else {
        format!("{grouped}.{fraction:02}")
    }
}
