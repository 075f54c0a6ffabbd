//! Report rendering
//!
//! Text output is meant for a terminal; YAML and JSON serialize the engine's
//! result structures at full precision.

use std::fmt::Write;

use serde::Serialize;
use valuator_core::AllResults;
use valuator_core::model::{Estimate, Projection, Scenario, SensitivityGrid, ValuationResult};
use valuator_core::suites::{DividendReport, GrowthReport, ReinvestmentProjection, ValueReport};

use crate::data::StorageError;
use crate::util::format::{
    NON_COMPUTABLE, format_currency, format_estimate, format_figure, format_percentage,
};
use crate::{OutputFormat, Suite};

const LABEL_WIDTH: usize = 34;

/// Render the selected suites in the requested format
pub fn render(
    results: &AllResults,
    suite: Suite,
    format: OutputFormat,
) -> Result<String, StorageError> {
    match format {
        OutputFormat::Text => Ok(render_text(results, suite)),
        OutputFormat::Yaml => with_selection(results, suite, |value| {
            serde_saphyr::to_string(value)
                .map_err(|e| StorageError::Serialize(format!("Failed to serialize report: {}", e)))
        }),
        OutputFormat::Json => with_selection(results, suite, |value| {
            serde_json::to_string_pretty(value)
                .map_err(|e| StorageError::Serialize(format!("Failed to serialize report: {}", e)))
        }),
    }
}

/// Serialize only the suites selected on the command line
#[derive(Serialize)]
struct Selection<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a ValueReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dividend: Option<&'a DividendReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    growth: Option<&'a GrowthReport>,
}

fn with_selection(
    results: &AllResults,
    suite: Suite,
    serialize: impl FnOnce(&Selection<'_>) -> Result<String, StorageError>,
) -> Result<String, StorageError> {
    let selection = Selection {
        value: suite.includes(Suite::Value).then_some(&results.value),
        dividend: suite.includes(Suite::Dividend).then_some(&results.dividend),
        growth: suite.includes(Suite::Growth).then_some(&results.growth),
    };
    serialize(&selection)
}

pub fn render_text(results: &AllResults, suite: Suite) -> String {
    let mut out = String::new();
    if suite.includes(Suite::Value) {
        write_value(&mut out, &results.value);
    }
    if suite.includes(Suite::Dividend) {
        write_dividend(&mut out, &results.dividend);
    }
    if suite.includes(Suite::Growth) {
        write_growth(&mut out, &results.growth);
    }
    out
}

// =============================================================================
// Sections
// =============================================================================

fn write_heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n== {title} ==");
}

fn write_value(out: &mut String, report: &ValueReport) {
    write_heading(out, "Value investing");
    for result in report.results() {
        write_result(out, result);
    }
    write_projection(out, "DCF cash flow projection", &report.dcf.projection);
    write_grid(out, "DCF sensitivity (value per share)", &report.dcf_sensitivity);

    let _ = writeln!(out, "\nValuation comparison");
    for bar in &report.comparison {
        let _ = writeln!(
            out,
            "  {:<width$}{}",
            bar.label,
            estimate_currency(bar.value),
            width = LABEL_WIDTH
        );
    }
}

fn write_dividend(out: &mut String, report: &DividendReport) {
    write_heading(out, "Dividend investing");
    for result in report.results() {
        write_result(out, result);
    }
    write_grid(out, "Gordon growth sensitivity", &report.gordon_sensitivity);

    let _ = writeln!(out, "\nTwo-stage dividend timeline");
    for period in report.two_stage.timeline() {
        let _ = writeln!(
            out,
            "  {:>4}  {:<8}{:>14}{:>14}",
            period.index,
            format!("{:?}", period.stage).to_lowercase(),
            format_currency(period.nominal),
            format_currency(period.present_value)
        );
    }

    write_reinvestment(out, &report.reinvestment);
}

fn write_growth(out: &mut String, report: &GrowthReport) {
    write_heading(out, "Growth investing");
    for result in report.results() {
        write_result(out, result);
    }
    write_projection(
        out,
        "Three-stage cash flow projection",
        &report.three_stage.projection,
    );
    write_grid(out, "Three-stage sensitivity", &report.three_stage_sensitivity);
    write_scenarios(out, &report.scenarios);
}

// =============================================================================
// Building blocks
// =============================================================================

fn estimate_currency(value: Estimate) -> String {
    value
        .value()
        .map_or_else(|| NON_COMPUTABLE.to_string(), format_currency)
}

fn write_result(out: &mut String, result: &ValuationResult) {
    let _ = writeln!(
        out,
        "\n{:<width$}{:>16}  [{}]",
        result.model.title(),
        format_estimate(result.value, result.unit),
        result.signal.as_str(),
        width = LABEL_WIDTH
    );
    if !result.subtitle.is_empty() {
        let _ = writeln!(out, "  {}", result.subtitle);
    }
    for detail in &result.details {
        let _ = writeln!(
            out,
            "    {:<width$}{}",
            detail.label,
            format_figure(&detail.figure),
            width = LABEL_WIDTH - 2
        );
    }
}

fn write_projection(out: &mut String, title: &str, projection: &Projection) {
    let _ = writeln!(out, "\n{title}");
    let _ = writeln!(
        out,
        "  {:>4}  {:>8}{:>16}{:>16}",
        "year", "growth", "cash flow", "present value"
    );
    for period in &projection.periods {
        let _ = writeln!(
            out,
            "  {:>4}  {:>8}{:>16}{:>16}",
            period.index,
            format_percentage(period.growth_rate),
            format_currency(period.nominal),
            format_currency(period.present_value)
        );
    }
}

/// Cells worth more than the reference price are marked with `*`
fn write_grid(out: &mut String, title: &str, grid: &SensitivityGrid) {
    let _ = writeln!(out, "\n{title}: {} (rows) x {} (columns)", grid.row_label, grid.col_label);
    let mut header = format!("  {:>8}", "");
    for col in &grid.cols {
        let _ = write!(header, "{:>16}", format_percentage(*col));
    }
    let _ = writeln!(out, "{header}");

    for (row_index, (row, cells)) in grid.row_cells().enumerate() {
        let mut line = format!("  {:>8}", format_percentage(row));
        for (col_index, cell) in cells.iter().enumerate() {
            let marker = match grid.is_above_reference(row_index, col_index) {
                Some(true) => "*",
                _ => " ",
            };
            let text = match cell {
                Estimate::Value(v) => format_currency(*v),
                Estimate::NonComputable => "n/c".to_string(),
            };
            let _ = write!(line, "{:>15}{}", text, marker);
        }
        let _ = writeln!(out, "{line}");
    }
}

fn write_scenarios(out: &mut String, scenarios: &[Scenario]) {
    let _ = writeln!(out, "\nScenario analysis");
    for scenario in scenarios {
        let upside = match scenario.upside_percent {
            Estimate::Value(points) => format!("{points:+.1}%"),
            Estimate::NonComputable => NON_COMPUTABLE.to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<18}growth x{:<6.2}WACC {:>+6.1}%{:>16}{:>16}",
            scenario.name.label(),
            scenario.growth_multiplier,
            scenario.discount_rate_delta * 100.0,
            estimate_currency(scenario.result_value),
            upside
        );
    }
}

fn write_reinvestment(out: &mut String, projection: &ReinvestmentProjection) {
    let _ = writeln!(out, "\nDividend reinvestment");
    let _ = writeln!(
        out,
        "  {:>4}{:>12}{:>12}{:>14}{:>16}{:>18}{:>10}",
        "year", "shares", "dividend", "price", "income", "value", "YOC"
    );
    for year in &projection.years {
        let _ = writeln!(
            out,
            "  {:>4}{:>12.2}{:>12}{:>14}{:>16}{:>18}{:>10}",
            year.year,
            year.shares,
            format_currency(year.dividend_per_share),
            format_currency(year.price),
            format_currency(year.annual_income),
            format_currency(year.total_value),
            format_percentage(year.yield_on_cost)
        );
    }
    if let Some(total_return) = projection.total_return() {
        let _ = writeln!(
            out,
            "  Initial investment {} grows {} in total",
            format_currency(projection.initial_investment),
            format_percentage(total_return)
        );
    }
}
