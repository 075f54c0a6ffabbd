//! Growth-investing models
//!
//! Models for companies priced on future growth: PEG, a three-stage DCF with
//! linear fade, enterprise and sales multiples, the Rule of 40, a reverse DCF
//! and the fixed macro scenarios.

use serde::{Deserialize, Serialize};

use crate::config::ThresholdTable;
use crate::model::{
    Estimate, Figure, GridAxis, GrowthInputs, ModelKind, Projection, Scenario, SensitivityGrid,
    Signal, Stage, Unit, ValuationResult, checked_div,
};
use crate::primitives::{
    GridParams, ScenarioParams, build_sensitivity_grid, constant_schedule,
    discounted_terminal_value, fade_schedule, project_cash_flows, run_scenarios,
    solve_implied_growth,
};

/// Rule of 40 passing score, in points
pub const RULE_OF_FORTY: f64 = 40.0;

/// Horizon of the implied revenue figure in the reverse DCF
const IMPLIED_REVENUE_YEARS: i32 = 5;

/// Three-stage DCF with the projection it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeStageDcf {
    pub result: ValuationResult,
    pub projection: Projection,
    /// `NonComputable` when WACC does not exceed terminal growth
    pub terminal_present_value: Estimate,
    pub total_present_value: f64,
    pub value_per_share: Estimate,
}

/// Reverse DCF result and the market value it was solved against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseDcf {
    pub result: ValuationResult,
    /// Raw bisection output, reported even when the headline is non-computable
    pub implied_growth: f64,
    pub target_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthReport {
    pub peg: ValuationResult,
    pub growth_adjusted_value: ValuationResult,
    pub three_stage: ThreeStageDcf,
    pub three_stage_sensitivity: SensitivityGrid,
    pub ev_ebitda: ValuationResult,
    pub ev_ebitda_fair_value: ValuationResult,
    pub price_to_sales: ValuationResult,
    pub price_to_sales_fair_value: ValuationResult,
    pub rule_of_forty: ValuationResult,
    pub reverse_dcf: ReverseDcf,
    pub scenarios: Vec<Scenario>,
}

impl GrowthReport {
    /// Every headline result in presentation order
    pub fn results(&self) -> Vec<&ValuationResult> {
        vec![
            &self.peg,
            &self.growth_adjusted_value,
            &self.three_stage.result,
            &self.ev_ebitda,
            &self.ev_ebitda_fair_value,
            &self.price_to_sales,
            &self.price_to_sales_fair_value,
            &self.rule_of_forty,
            &self.reverse_dcf.result,
        ]
    }
}

pub fn evaluate(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> GrowthReport {
    GrowthReport {
        peg: peg(inputs, thresholds),
        growth_adjusted_value: growth_adjusted_value(inputs, thresholds),
        three_stage: three_stage_dcf(inputs, thresholds),
        three_stage_sensitivity: three_stage_sensitivity(inputs),
        ev_ebitda: ev_ebitda(inputs, thresholds),
        ev_ebitda_fair_value: ev_ebitda_fair_value(inputs, thresholds),
        price_to_sales: price_to_sales(inputs, thresholds),
        price_to_sales_fair_value: price_to_sales_fair_value(inputs, thresholds),
        rule_of_forty: rule_of_forty(inputs, thresholds),
        reverse_dcf: reverse_dcf(inputs, thresholds),
        scenarios: scenario_analysis(inputs),
    }
}

fn upside(value: f64, price: f64) -> Option<f64> {
    checked_div(value, price).map(|r| r - 1.0)
}

fn per_share(total: f64, shares: f64) -> Estimate {
    if shares > 0.0 {
        Estimate::finite(total / shares)
    } else {
        Estimate::NonComputable
    }
}

// =============================================================================
// PEG
// =============================================================================

struct PegParts {
    pe: f64,
    peg: f64,
    fair_pe: f64,
    fair_price: f64,
}

fn peg_parts(inputs: &GrowthInputs) -> PegParts {
    let pe = if inputs.eps > 0.0 {
        inputs.current_price / inputs.eps
    } else {
        0.0
    };
    let growth_points = inputs.revenue_growth_rate * 100.0;
    let peg = if growth_points > 0.0 {
        pe / growth_points
    } else {
        0.0
    };
    PegParts {
        pe,
        peg,
        fair_pe: growth_points,
        fair_price: growth_points * inputs.eps,
    }
}

pub fn peg(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let parts = peg_parts(inputs);
    let signal = if parts.peg <= 0.0 {
        Signal::Neutral
    } else {
        thresholds.peg.classify(parts.peg)
    };
    let subtitle = if parts.peg <= 0.0 {
        "Requires positive earnings and growth".to_string()
    } else {
        format!("P/E {:.1}x against {:.1}% growth", parts.pe, parts.fair_pe)
    };

    ValuationResult::new(ModelKind::Peg, Estimate::Value(parts.peg), Unit::Ratio, signal)
        .subtitle(subtitle)
        .detail("P/E", Figure::Multiple(parts.pe))
        .detail("Revenue growth", Figure::Percent(inputs.revenue_growth_rate))
        .detail("Fair P/E at PEG 1", Figure::Multiple(parts.fair_pe))
        .detail("Fair price at PEG 1", Figure::Currency(parts.fair_price))
}

/// Price against the PEG = 1 fair price
pub fn growth_adjusted_value(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let parts = peg_parts(inputs);
    let price = inputs.current_price;
    let signal = thresholds
        .growth_adjusted_value
        .scaled(parts.fair_price)
        .classify(price);

    ValuationResult::new(
        ModelKind::GrowthAdjustedValue,
        Estimate::Value(parts.fair_price),
        Unit::Currency,
        signal,
    )
    .subtitle("Fair P/E equal to the growth rate")
    .detail("Fair P/E", Figure::Multiple(parts.fair_pe))
    .detail("Price at PEG 0.75", Figure::Currency(parts.fair_price * 0.75))
    .detail("Price at PEG 1.5", Figure::Currency(parts.fair_price * 1.5))
    .detail("Upside", Figure::or_na(upside(parts.fair_price, price), Figure::Percent))
}

// =============================================================================
// Three-stage DCF
// =============================================================================

fn three_stage_projection(inputs: &GrowthInputs, wacc: f64, high_growth: f64) -> Projection {
    let mut schedule = constant_schedule(high_growth, inputs.high_growth_years, Stage::Growth);
    schedule.extend(fade_schedule(
        high_growth,
        inputs.fade_growth_rate,
        inputs.fade_years,
    ));
    project_cash_flows(inputs.free_cash_flow, &schedule, wacc)
}

fn three_stage_terminal(inputs: &GrowthInputs, projection: &Projection, wacc: f64) -> Estimate {
    discounted_terminal_value(
        projection.terminal_nominal(),
        wacc,
        inputs.terminal_growth_rate,
        inputs.high_growth_years.saturating_add(inputs.fade_years),
    )
}

pub fn three_stage_dcf(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ThreeStageDcf {
    let wacc = inputs.wacc;
    let projection = three_stage_projection(inputs, wacc, inputs.high_growth_rate);
    let terminal_present_value = three_stage_terminal(inputs, &projection, wacc);
    let total_present_value =
        projection.total_present_value + terminal_present_value.value().unwrap_or(0.0);
    let value_per_share = per_share(total_present_value, inputs.shares_outstanding);
    let price = inputs.current_price;

    let signal = thresholds
        .three_stage_dcf
        .classify_if(value_per_share.positive(), |v| price / v);
    let terminal_share = terminal_present_value
        .value()
        .and_then(|tv| checked_div(tv, total_present_value));
    let subtitle = if terminal_present_value.is_computable() {
        format!(
            "{} growth years, {} fade years",
            inputs.high_growth_years, inputs.fade_years
        )
    } else {
        "WACC must exceed terminal growth; terminal value excluded".to_string()
    };

    let result = ValuationResult::new(
        ModelKind::ThreeStageDcf,
        value_per_share,
        Unit::Currency,
        signal,
    )
    .subtitle(subtitle)
    .detail(
        "Growth stage (PV)",
        Figure::Aggregate(projection.stage_periods(Stage::Growth).map(|p| p.present_value).sum()),
    )
    .detail(
        "Fade stage (PV)",
        Figure::Aggregate(projection.stage_periods(Stage::Fade).map(|p| p.present_value).sum()),
    )
    .detail(
        "Terminal value (PV)",
        Figure::estimate(terminal_present_value, Figure::Aggregate),
    )
    .detail("Enterprise value", Figure::Aggregate(total_present_value))
    .detail("Terminal share of value", Figure::or_na(terminal_share, Figure::Percent))
    .detail(
        "Upside",
        Figure::or_na(
            value_per_share.value().and_then(|v| upside(v, price)),
            Figure::Percent,
        ),
    );

    ThreeStageDcf {
        result,
        projection,
        terminal_present_value,
        total_present_value,
        value_per_share,
    }
}

/// Value per share at the given WACC and high growth rate.
///
/// Unlike the headline model, a non-computable terminal value makes the
/// whole cell non-computable.
pub fn three_stage_per_share(inputs: &GrowthInputs, wacc: f64, high_growth: f64) -> Estimate {
    let projection = three_stage_projection(inputs, wacc, high_growth);
    match three_stage_terminal(inputs, &projection, wacc) {
        Estimate::Value(tv) => per_share(
            projection.total_present_value + tv,
            inputs.shares_outstanding,
        ),
        Estimate::NonComputable => Estimate::NonComputable,
    }
}

/// Value per share over WACC ±1/2% and high growth ±2.5/5%
pub fn three_stage_sensitivity(inputs: &GrowthInputs) -> SensitivityGrid {
    let params = GridParams {
        row: GridAxis::new("WACC", inputs.wacc, 0.01),
        col: GridAxis::new("High growth", inputs.high_growth_rate, 0.025),
        reference_price: Some(inputs.current_price),
    };
    build_sensitivity_grid(&params, |wacc, growth| {
        three_stage_per_share(inputs, wacc, growth)
    })
}

// =============================================================================
// Enterprise and sales multiples
// =============================================================================

struct EnterpriseParts {
    market_cap: f64,
    enterprise_value: f64,
    multiple: f64,
    fair_enterprise_value: f64,
    fair_price: f64,
}

fn enterprise_parts(inputs: &GrowthInputs) -> EnterpriseParts {
    let market_cap = inputs.current_price * inputs.shares_outstanding;
    let enterprise_value = market_cap + inputs.total_debt - inputs.cash_and_equivalents;
    let multiple = if inputs.ebitda > 0.0 {
        enterprise_value / inputs.ebitda
    } else {
        0.0
    };
    let fair_enterprise_value = inputs.ebitda * inputs.industry_ev_ebitda;
    let fair_price = if inputs.shares_outstanding > 0.0 {
        (fair_enterprise_value - inputs.total_debt + inputs.cash_and_equivalents)
            / inputs.shares_outstanding
    } else {
        0.0
    };
    EnterpriseParts {
        market_cap,
        enterprise_value,
        multiple,
        fair_enterprise_value,
        fair_price,
    }
}

pub fn ev_ebitda(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let parts = enterprise_parts(inputs);
    let industry = inputs.industry_ev_ebitda;
    let signal = thresholds.ev_ebitda.scaled(industry).classify(parts.multiple);

    ValuationResult::new(
        ModelKind::EvEbitda,
        Estimate::Value(parts.multiple),
        Unit::Multiple,
        signal,
    )
    .subtitle(format!("Industry multiple {industry:.1}x"))
    .detail("Market cap", Figure::Aggregate(parts.market_cap))
    .detail("Enterprise value", Figure::Aggregate(parts.enterprise_value))
    .detail("EBITDA", Figure::Aggregate(inputs.ebitda))
    .detail(
        "Premium to industry",
        Figure::or_na(upside(parts.multiple, industry), Figure::Percent),
    )
}

pub fn ev_ebitda_fair_value(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let parts = enterprise_parts(inputs);
    let price = inputs.current_price;
    let signal = thresholds
        .ev_ebitda_fair_value
        .scaled(parts.fair_price)
        .classify(price);

    ValuationResult::new(
        ModelKind::EvEbitdaFairValue,
        Estimate::Value(parts.fair_price),
        Unit::Currency,
        signal,
    )
    .subtitle("Equity value at the industry multiple")
    .detail("Fair enterprise value", Figure::Aggregate(parts.fair_enterprise_value))
    .detail("Less debt", Figure::Aggregate(-inputs.total_debt))
    .detail("Plus cash", Figure::Aggregate(inputs.cash_and_equivalents))
    .detail("Upside", Figure::or_na(upside(parts.fair_price, price), Figure::Percent))
}

struct SalesParts {
    revenue_per_share: f64,
    multiple: f64,
    fair_price: f64,
}

fn sales_parts(inputs: &GrowthInputs) -> SalesParts {
    let revenue_per_share = if inputs.shares_outstanding > 0.0 {
        inputs.revenue / inputs.shares_outstanding
    } else {
        0.0
    };
    let multiple = if revenue_per_share > 0.0 {
        inputs.current_price / revenue_per_share
    } else {
        0.0
    };
    SalesParts {
        revenue_per_share,
        multiple,
        fair_price: revenue_per_share * inputs.industry_ps,
    }
}

pub fn price_to_sales(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let parts = sales_parts(inputs);
    let industry = inputs.industry_ps;
    let signal = thresholds
        .price_to_sales
        .scaled(industry)
        .classify(parts.multiple);

    ValuationResult::new(
        ModelKind::PriceToSales,
        Estimate::Value(parts.multiple),
        Unit::Multiple,
        signal,
    )
    .subtitle(format!("Industry multiple {industry:.1}x"))
    .detail("Revenue per share", Figure::Currency(parts.revenue_per_share))
    .detail("Fair price at industry P/S", Figure::Currency(parts.fair_price))
    .detail("Profit margin", Figure::Percent(inputs.profit_margin))
    .detail(
        "Implied P/E",
        Figure::or_na(checked_div(parts.multiple, inputs.profit_margin), Figure::Multiple),
    )
}

pub fn price_to_sales_fair_value(
    inputs: &GrowthInputs,
    thresholds: &ThresholdTable,
) -> ValuationResult {
    let parts = sales_parts(inputs);
    let price = inputs.current_price;
    let signal = thresholds
        .price_to_sales_fair_value
        .scaled(parts.fair_price)
        .classify(price);

    ValuationResult::new(
        ModelKind::PriceToSalesFairValue,
        Estimate::Value(parts.fair_price),
        Unit::Currency,
        signal,
    )
    .subtitle("Revenue per share at the industry multiple")
    .detail("Revenue", Figure::Aggregate(inputs.revenue))
    .detail("Revenue growth", Figure::Percent(inputs.revenue_growth_rate))
    .detail(
        "Growth-adjusted P/S",
        Figure::Multiple(inputs.revenue_growth_rate * 100.0 / 10.0),
    )
    .detail(
        "Price vs fair value",
        Figure::or_na(upside(price, parts.fair_price), Figure::Percent),
    )
}

// =============================================================================
// Rule of 40
// =============================================================================

pub fn rule_of_forty(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let score = 100.0 * (inputs.revenue_growth_rate + inputs.profit_margin);
    let rating = if score >= 60.0 {
        "Excellent"
    } else if score >= RULE_OF_FORTY {
        "Passing"
    } else {
        "Needs improvement"
    };

    ValuationResult::new(
        ModelKind::RuleOfForty,
        Estimate::Value(score),
        Unit::Score,
        thresholds.rule_of_forty.classify(score),
    )
    .subtitle(format!("{rating}: growth plus margin"))
    .detail("Revenue growth", Figure::Percent(inputs.revenue_growth_rate))
    .detail("Profit margin", Figure::Percent(inputs.profit_margin))
    .detail("Passing score", Figure::Points(RULE_OF_FORTY))
    .detail("Rating", Figure::Text(rating.to_string()))
}

// =============================================================================
// Reverse DCF
// =============================================================================

pub fn reverse_dcf(inputs: &GrowthInputs, thresholds: &ThresholdTable) -> ReverseDcf {
    let target_value = inputs.current_price * inputs.shares_outstanding;
    let implied_growth = solve_implied_growth(
        target_value,
        inputs.free_cash_flow,
        inputs.wacc,
        inputs.terminal_growth_rate,
    );
    let actual = inputs.revenue_growth_rate;

    let (value, signal) = if inputs.wacc <= inputs.terminal_growth_rate {
        (Estimate::NonComputable, Signal::Neutral)
    } else {
        let band = thresholds.reverse_dcf.scaled(actual);
        (Estimate::Value(implied_growth), band.classify(implied_growth))
    };
    let subtitle = match value {
        Estimate::NonComputable => "WACC must exceed terminal growth".to_string(),
        Estimate::Value(g) if g > actual => format!(
            "Market prices in {:.1}% growth, above the actual {:.1}%",
            g * 100.0,
            actual * 100.0
        ),
        Estimate::Value(g) => format!(
            "Market prices in {:.1}% growth, at or below the actual {:.1}%",
            g * 100.0,
            actual * 100.0
        ),
    };
    let implied_pe = (inputs.eps > 0.0).then(|| inputs.current_price / inputs.eps);
    let implied_revenue = value
        .value()
        .map(|g| inputs.revenue * (1.0 + g).powi(IMPLIED_REVENUE_YEARS));

    let result = ValuationResult::new(ModelKind::ReverseDcf, value, Unit::Percent, signal)
        .subtitle(subtitle)
        .detail("Market value", Figure::Aggregate(target_value))
        .detail("Actual revenue growth", Figure::Percent(actual))
        .detail(
            "Growth gap",
            Figure::estimate(value.map(|g| g - actual), Figure::Percent),
        )
        .detail("Current P/E", Figure::or_na(implied_pe, Figure::Multiple))
        .detail("Implied revenue in 5 years", Figure::or_na(implied_revenue, Figure::Aggregate));

    ReverseDcf {
        result,
        implied_growth,
        target_value,
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Explicit periods projected for each scenario
pub const SCENARIO_PERIODS: u32 = 10;

/// Ten-period value per share: `growth` for the high-growth years, terminal
/// growth after, plus a Gordon terminal value.
pub fn scenario_value(inputs: &GrowthInputs, growth: f64, wacc: f64) -> Estimate {
    let high_years = inputs.high_growth_years.min(SCENARIO_PERIODS);
    let mut schedule = constant_schedule(growth, high_years, Stage::Growth);
    schedule.extend(constant_schedule(
        inputs.terminal_growth_rate,
        SCENARIO_PERIODS - high_years,
        Stage::Stable,
    ));
    let projection = project_cash_flows(inputs.free_cash_flow, &schedule, wacc);
    let terminal = discounted_terminal_value(
        projection.terminal_nominal(),
        wacc,
        inputs.terminal_growth_rate,
        SCENARIO_PERIODS,
    );
    match terminal {
        Estimate::Value(tv) => per_share(
            projection.total_present_value + tv,
            inputs.shares_outstanding,
        ),
        Estimate::NonComputable => Estimate::NonComputable,
    }
}

pub fn scenario_analysis(inputs: &GrowthInputs) -> Vec<Scenario> {
    let params = ScenarioParams {
        growth_rate: inputs.high_growth_rate,
        discount_rate: inputs.wacc,
        current_price: inputs.current_price,
    };
    run_scenarios(&params, |growth, wacc| scenario_value(inputs, growth, wacc))
}
