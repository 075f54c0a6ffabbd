//! Tests for the growth suite
//!
//! These tests verify that:
//! - The three-stage DCF fades growth linearly into the terminal rate
//! - Multiples compare against scaled industry thresholds
//! - The reverse DCF reports the market-implied growth rate

use crate::config::ThresholdTable;
use crate::model::{Estimate, Figure, GrowthInputs, Signal};
use crate::primitives::reverse_dcf_value;
use crate::suites::growth;

fn approx(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

#[test]
fn test_three_stage_closed_form() {
    let inputs = GrowthInputs::default();
    let dcf = growth::three_stage_dcf(&inputs, &ThresholdTable::default());

    let mut cash_flow = 300.0;
    let mut explicit = 0.0;
    for year in 1..=10_i32 {
        let rate = if year <= 5 {
            0.25
        } else {
            0.25 + (0.15 - 0.25) * f64::from(year - 5) / 5.0
        };
        cash_flow *= 1.0 + rate;
        explicit += cash_flow / 1.12_f64.powi(year);
    }
    let terminal = cash_flow * 1.03 / 0.09 / 1.12_f64.powi(10);

    assert!(approx(dcf.projection.total_present_value, explicit, 1e-6));
    assert!(approx(dcf.terminal_present_value.value().unwrap(), terminal, 1e-6));
    assert!(approx(
        dcf.value_per_share.value().unwrap(),
        (explicit + terminal) / 200.0,
        1e-8
    ));
}

#[test]
fn test_three_stage_zero_shares() {
    let inputs = GrowthInputs {
        shares_outstanding: 0.0,
        ..GrowthInputs::default()
    };
    let dcf = growth::three_stage_dcf(&inputs, &ThresholdTable::default());
    assert_eq!(dcf.value_per_share, Estimate::NonComputable);
    assert_eq!(dcf.result.signal, Signal::Neutral);
}

#[test]
fn test_growth_adjusted_value() {
    // Fair P/E 30 at EPS 2 gives 60 against a price of 80
    let result =
        growth::growth_adjusted_value(&GrowthInputs::default(), &ThresholdTable::default());
    assert!(approx(result.value.value().unwrap(), 60.0, 1e-9));
    assert_eq!(result.signal, Signal::Sell);
}

#[test]
fn test_price_to_sales_fair_value() {
    let result =
        growth::price_to_sales_fair_value(&GrowthInputs::default(), &ThresholdTable::default());
    // 25 revenue per share at 5x
    assert!(approx(result.value.value().unwrap(), 125.0, 1e-9));
    // 80 < 0.7 * 125
    assert_eq!(result.signal, Signal::Buy);
    assert_eq!(
        result.figure("Growth-adjusted P/S"),
        Some(&Figure::Multiple(3.0))
    );
}

#[test]
fn test_rule_of_forty_bands() {
    let thresholds = ThresholdTable::default();
    let at = |growth_rate: f64, margin: f64| {
        let inputs = GrowthInputs {
            revenue_growth_rate: growth_rate,
            profit_margin: margin,
            ..GrowthInputs::default()
        };
        growth::rule_of_forty(&inputs, &thresholds)
    };

    let strong = at(0.5, 0.2);
    assert_eq!(strong.signal, Signal::Buy);
    assert_eq!(strong.figure("Rating"), Some(&Figure::Text("Excellent".into())));
    assert_eq!(at(0.35, 0.1).signal, Signal::Hold);
    assert_eq!(at(0.1, 0.05).signal, Signal::Sell);
}

#[test]
fn test_reverse_dcf_reproduces_market_value() {
    let inputs = GrowthInputs::default();
    let reverse = growth::reverse_dcf(&inputs, &ThresholdTable::default());

    assert!(approx(reverse.target_value, 16_000.0, 1e-9));
    let implied = reverse.result.value.value().unwrap();
    let value = reverse_dcf_value(300.0, implied, 0.12, 0.03);
    assert!(approx(value / reverse.target_value, 1.0, 1e-9));
}

#[test]
fn test_reverse_dcf_implied_revenue() {
    let inputs = GrowthInputs::default();
    let reverse = growth::reverse_dcf(&inputs, &ThresholdTable::default());
    let implied = reverse.implied_growth;
    let expected = 5000.0 * (1.0 + implied).powi(5);
    assert_eq!(
        reverse.result.figure("Implied revenue in 5 years"),
        Some(&Figure::Aggregate(expected))
    );
}

#[test]
fn test_scenarios_non_computable_when_wacc_collapses() {
    // Hyper-optimistic drops WACC by 2% to 2.5%, below terminal growth
    let inputs = GrowthInputs {
        wacc: 0.045,
        ..GrowthInputs::default()
    };
    let scenarios = growth::scenario_analysis(&inputs);
    assert!(scenarios[3].result_value.is_computable());
    assert_eq!(scenarios[4].result_value, Estimate::NonComputable);
    assert_eq!(scenarios[4].upside_percent, Estimate::NonComputable);
}
