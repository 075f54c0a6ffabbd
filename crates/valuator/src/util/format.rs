//! Display formatting for engine figures
//!
//! The engine returns full-precision values; rounding happens only here.
//! Currency is shown to 2 decimals with thousands separators, percentages to 1.

use valuator_core::model::{Estimate, Figure, Unit};

/// Shown wherever a perpetuity formula was undefined
pub const NON_COMPUTABLE: &str = "cannot compute";

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a currency value
pub fn format_currency(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round() as u64;
    let dollars = group_thousands(cents_total / 100);
    let cents = cents_total % 100;

    if value < 0.0 && cents_total > 0 {
        format!("-${dollars}.{cents:02}")
    } else {
        format!("${dollars}.{cents:02}")
    }
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_multiple(value: f64) -> String {
    format!("{value:.2}x")
}

pub fn format_figure(figure: &Figure) -> String {
    match figure {
        Figure::Currency(v) | Figure::Aggregate(v) => format_currency(*v),
        Figure::Percent(v) => format_percentage(*v),
        Figure::Points(v) => format!("{v:.1}"),
        Figure::Multiple(v) => format_multiple(*v),
        Figure::Ratio(v) => format!("{v:.2}"),
        Figure::Years(v) => format!("{v:.1} years"),
        Figure::Text(text) => text.clone(),
        Figure::NotAvailable => "N/A".to_string(),
    }
}

/// Format a headline estimate in its unit
pub fn format_estimate(value: Estimate, unit: Unit) -> String {
    match value {
        Estimate::NonComputable => NON_COMPUTABLE.to_string(),
        Estimate::Value(v) => match unit {
            Unit::Currency => format_currency(v),
            Unit::Percent => format_percentage(v),
            Unit::Multiple => format_multiple(v),
            Unit::Ratio => format!("{v:.2}"),
            Unit::Score => format!("{v:.1}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(29.047), "$29.05");
        assert_eq!(format_currency(-0.5), "-$0.50");
        assert_eq!(format_currency(0.0), "$0.00");
        // Rounds up across the dollar boundary
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0826), "8.3%");
        assert_eq!(format_percentage(-0.1), "-10.0%");
    }

    #[test]
    fn test_non_computable_is_distinct_from_zero() {
        assert_eq!(
            format_estimate(Estimate::NonComputable, Unit::Currency),
            "cannot compute"
        );
        assert_eq!(format_estimate(Estimate::Value(0.0), Unit::Currency), "$0.00");
    }

    #[test]
    fn test_format_figure_variants() {
        assert_eq!(format_figure(&Figure::Multiple(12.345)), "12.35x");
        assert_eq!(format_figure(&Figure::Years(2.5)), "2.5 years");
        assert_eq!(format_figure(&Figure::NotAvailable), "N/A");
    }
}
