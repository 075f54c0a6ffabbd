use valuator_core::{ValuationInputs, evaluate_all};

use crate::report::{render, render_text};
use crate::{OutputFormat, Suite};

#[test]
fn test_suite_selection_limits_text() {
    let results = evaluate_all(&ValuationInputs::default());

    let growth = render_text(&results, Suite::Growth);
    assert!(growth.contains("== Growth investing =="));
    assert!(growth.contains("Scenario analysis"));
    assert!(!growth.contains("== Value investing =="));
    assert!(!growth.contains("Dividend reinvestment"));

    let dividend = render_text(&results, Suite::Dividend);
    assert!(dividend.contains("Two-stage dividend timeline"));
    assert!(dividend.contains("Dividend reinvestment"));
    assert!(!dividend.contains("Rule of 40"));
}

#[test]
fn test_non_computable_is_spelled_out() {
    let mut inputs = ValuationInputs::default();
    inputs.dividend.required_return = 0.05;
    inputs.dividend.dividend_growth_rate = 0.05;
    // WACC rows run from 2% to 6% against 2% to 4% terminal growth
    inputs.value.wacc = 0.04;
    let results = evaluate_all(&inputs);

    let value = render_text(&results, Suite::Value);
    assert!(value.contains("n/c"));

    let dividend = render_text(&results, Suite::Dividend);
    assert!(dividend.contains("cannot compute"));
}

#[test]
fn test_grid_marks_cells_above_price() {
    let mut inputs = ValuationInputs::default();
    inputs.value.current_price = 1.0;
    let results = evaluate_all(&inputs);

    let text = render_text(&results, Suite::Value);
    assert!(text.contains("DCF sensitivity"));
    assert!(text.contains('*'));
}

#[test]
fn test_json_contains_only_selected_suite() {
    let results = evaluate_all(&ValuationInputs::default());
    let json = render(&results, Suite::Dividend, OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(parsed.get("dividend").is_some());
    assert!(parsed.get("value").is_none());
    assert!(parsed.get("growth").is_none());
    assert_eq!(
        parsed["dividend"]["gordon_growth"]["model"],
        "gordon_growth"
    );
}

#[test]
fn test_yaml_output_names_models() {
    let results = evaluate_all(&ValuationInputs::default());
    let yaml = render(&results, Suite::Growth, OutputFormat::Yaml).unwrap();

    assert!(yaml.contains("rule_of_forty"));
    assert!(yaml.contains("reverse_dcf"));
    assert!(!yaml.contains("graham_number"));
}
