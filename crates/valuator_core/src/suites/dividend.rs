//! Dividend-investing models
//!
//! Dividend discount models (Gordon, two-stage, H-model), income quality
//! ratios and the dividend reinvestment walk. Rates are fractions throughout.

use serde::{Deserialize, Serialize};

use crate::config::ThresholdTable;
use crate::model::{
    CashFlowPeriod, DividendInputs, Estimate, Figure, GridAxis, MAX_PERIODS, ModelKind,
    Projection, SensitivityGrid, Signal, Stage, Unit, ValuationResult, checked_div,
};
use crate::primitives::{
    Band, Cutoff, GridParams, build_sensitivity_grid, constant_schedule,
    discounted_terminal_value, perpetuity_value, project_cash_flows, project_from,
};

/// Periods of stable growth shown after the high-growth stage
pub const STABLE_TAIL_PERIODS: u32 = 10;

/// Extra annual price appreciation over dividend growth in the reinvestment walk
pub const PRICE_GROWTH_PREMIUM: f64 = 0.02;

/// Shortest reinvestment horizon, in years
pub const MIN_REINVESTMENT_YEARS: u32 = 5;

/// Two-stage dividend discount model with its cash flow timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoStageDdm {
    pub result: ValuationResult,
    pub high_growth: Projection,
    /// Display only; the terminal value already prices these periods
    pub stable_tail: Projection,
    /// `NonComputable` when the required return does not exceed stable growth
    pub terminal_present_value: Estimate,
    pub total_present_value: f64,
}

impl TwoStageDdm {
    /// Share of the total value contributed by the terminal value
    #[must_use]
    pub fn terminal_share(&self) -> Option<f64> {
        let terminal = self.terminal_present_value.value()?;
        checked_div(terminal, self.total_present_value)
    }

    /// High-growth periods followed by the stable tail
    pub fn timeline(&self) -> impl Iterator<Item = &CashFlowPeriod> {
        self.high_growth
            .periods
            .iter()
            .chain(self.stable_tail.periods.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinvestmentYear {
    pub year: u32,
    pub shares: f64,
    pub dividend_per_share: f64,
    pub price: f64,
    pub annual_income: f64,
    pub total_value: f64,
    /// Annual income over the initial cost basis; 0 without a positive basis
    pub yield_on_cost: f64,
}

/// Year-by-year dividend reinvestment walk, year 0 being the purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinvestmentProjection {
    pub initial_investment: f64,
    pub years: Vec<ReinvestmentYear>,
}

impl ReinvestmentProjection {
    #[must_use]
    pub fn final_year(&self) -> Option<&ReinvestmentYear> {
        self.years.last()
    }

    /// Final value over initial investment, minus one
    #[must_use]
    pub fn total_return(&self) -> Option<f64> {
        let last = self.final_year()?;
        checked_div(last.total_value, self.initial_investment).map(|r| r - 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendReport {
    pub gordon_growth: ValuationResult,
    pub gordon_sensitivity: SensitivityGrid,
    pub two_stage: TwoStageDdm,
    pub h_model: ValuationResult,
    pub dividend_yield: ValuationResult,
    pub payout_ratio: ValuationResult,
    pub dividend_coverage: ValuationResult,
    pub sustainable_growth: ValuationResult,
    pub return_decomposition: ValuationResult,
    pub reinvestment: ReinvestmentProjection,
}

impl DividendReport {
    /// Every headline result in presentation order
    pub fn results(&self) -> Vec<&ValuationResult> {
        vec![
            &self.gordon_growth,
            &self.two_stage.result,
            &self.h_model,
            &self.dividend_yield,
            &self.payout_ratio,
            &self.dividend_coverage,
            &self.sustainable_growth,
            &self.return_decomposition,
        ]
    }
}

pub fn evaluate(inputs: &DividendInputs, thresholds: &ThresholdTable) -> DividendReport {
    DividendReport {
        gordon_growth: gordon_growth(inputs, thresholds),
        gordon_sensitivity: gordon_sensitivity(inputs),
        two_stage: two_stage_ddm(inputs, thresholds),
        h_model: h_model(inputs, thresholds),
        dividend_yield: dividend_yield(inputs, thresholds),
        payout_ratio: payout_ratio(inputs, thresholds),
        dividend_coverage: dividend_coverage(inputs, thresholds),
        sustainable_growth: sustainable_growth(inputs),
        return_decomposition: return_decomposition(inputs),
        reinvestment: reinvestment_projection(inputs),
    }
}

fn price_over_value(price: f64, value: Estimate) -> Option<f64> {
    value.positive().map(|v| price / v - 1.0)
}

fn current_yield(inputs: &DividendInputs) -> f64 {
    if inputs.current_price > 0.0 {
        inputs.annual_dividend / inputs.current_price
    } else {
        0.0
    }
}

// =============================================================================
// Dividend discount models
// =============================================================================

pub fn gordon_growth(inputs: &DividendInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let r = inputs.required_return;
    let g = inputs.dividend_growth_rate;
    let price = inputs.current_price;
    let value = perpetuity_value(inputs.annual_dividend, r, g);

    let signal = thresholds
        .gordon_growth
        .classify_if(value.positive(), |v| price / v);
    let subtitle = if value.is_computable() {
        format!("Perpetual growth at {:.1}%", g * 100.0)
    } else {
        "Required return must exceed dividend growth".to_string()
    };
    let implied_growth = (price > 0.0).then(|| r - inputs.annual_dividend / price);

    ValuationResult::new(ModelKind::GordonGrowth, value, Unit::Currency, signal)
        .subtitle(subtitle)
        .detail("Current dividend (D0)", Figure::Currency(inputs.annual_dividend))
        .detail(
            "Next dividend (D1)",
            Figure::Currency(inputs.annual_dividend * (1.0 + g)),
        )
        .detail("Required return", Figure::Percent(r))
        .detail("Dividend growth", Figure::Percent(g))
        .detail("Market-implied growth", Figure::or_na(implied_growth, Figure::Percent))
        .detail(
            "Price vs value",
            Figure::or_na(price_over_value(price, value), Figure::Percent),
        )
}

/// Gordon value over required return ±1/2% and growth ±0.5/1%
pub fn gordon_sensitivity(inputs: &DividendInputs) -> SensitivityGrid {
    let params = GridParams {
        row: GridAxis::new("Required return", inputs.required_return, 0.01),
        col: GridAxis::new("Dividend growth", inputs.dividend_growth_rate, 0.005),
        reference_price: Some(inputs.current_price),
    };
    build_sensitivity_grid(&params, |r, g| {
        perpetuity_value(inputs.annual_dividend, r, g)
    })
}

pub fn two_stage_ddm(inputs: &DividendInputs, thresholds: &ThresholdTable) -> TwoStageDdm {
    let r = inputs.required_return;
    let years = inputs.high_growth_years;
    let stable = inputs.stable_growth_rate;

    let schedule = constant_schedule(inputs.high_growth_rate, years, Stage::Growth);
    let high_growth = project_cash_flows(inputs.annual_dividend, &schedule, r);
    let last_dividend = high_growth.terminal_nominal();
    let terminal_present_value = discounted_terminal_value(last_dividend, r, stable, years);

    let tail_schedule = constant_schedule(stable, STABLE_TAIL_PERIODS, Stage::Stable);
    let stable_tail = project_from(
        last_dividend,
        &tail_schedule,
        r,
        years.saturating_add(1),
    );

    let total_present_value =
        high_growth.total_present_value + terminal_present_value.value().unwrap_or(0.0);
    let value = Estimate::finite(total_present_value);
    let price = inputs.current_price;

    let signal = thresholds
        .two_stage_ddm
        .classify_if(value.positive(), |v| price / v);
    let subtitle = format!(
        "{years} years at {:.1}%, then {:.1}% forever",
        inputs.high_growth_rate * 100.0,
        stable * 100.0
    );
    let terminal_share = terminal_present_value
        .value()
        .and_then(|tv| checked_div(tv, total_present_value));

    let result = ValuationResult::new(ModelKind::TwoStageDdm, value, Unit::Currency, signal)
        .subtitle(subtitle)
        .detail(
            "High-growth dividends (PV)",
            Figure::Currency(high_growth.total_present_value),
        )
        .detail(
            "Terminal value (PV)",
            Figure::estimate(terminal_present_value, Figure::Currency),
        )
        .detail("Terminal share of value", Figure::or_na(terminal_share, Figure::Percent))
        .detail(
            "Price vs value",
            Figure::or_na(price_over_value(price, value), Figure::Percent),
        );

    TwoStageDdm {
        result,
        high_growth,
        stable_tail,
        terminal_present_value,
        total_present_value,
    }
}

pub fn h_model(inputs: &DividendInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let d0 = inputs.annual_dividend;
    let r = inputs.required_return;
    let long_run = inputs.stable_growth_rate;
    let half_life = f64::from(inputs.high_growth_years) / 2.0;

    let stable_part = perpetuity_value(d0, r, long_run);
    let excess_part = if r <= long_run {
        Estimate::NonComputable
    } else {
        Estimate::finite(d0 * half_life * (inputs.high_growth_rate - long_run) / (r - long_run))
    };
    let value = match (stable_part, excess_part) {
        (Estimate::Value(s), Estimate::Value(e)) => Estimate::finite(s + e),
        _ => Estimate::NonComputable,
    };
    let price = inputs.current_price;
    let signal = thresholds.h_model.classify_if(value.positive(), |v| price / v);

    ValuationResult::new(ModelKind::HModel, value, Unit::Currency, signal)
        .subtitle(format!(
            "Growth fades linearly from {:.1}% to {:.1}%",
            inputs.high_growth_rate * 100.0,
            long_run * 100.0
        ))
        .detail("Half-life (H)", Figure::Years(half_life))
        .detail("Stable growth value", Figure::estimate(stable_part, Figure::Currency))
        .detail("Excess growth value", Figure::estimate(excess_part, Figure::Currency))
        .detail(
            "Price vs value",
            Figure::or_na(price_over_value(price, value), Figure::Percent),
        )
}

// =============================================================================
// Income quality
// =============================================================================

pub fn dividend_yield(inputs: &DividendInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let dividend_yield = current_yield(inputs);
    let subtitle = if dividend_yield > 0.04 {
        "High yield"
    } else if dividend_yield > 0.02 {
        "Moderate yield"
    } else {
        "Low yield"
    };

    ValuationResult::new(
        ModelKind::DividendYield,
        Estimate::Value(dividend_yield),
        Unit::Percent,
        thresholds.dividend_yield.classify(dividend_yield),
    )
    .subtitle(subtitle)
    .detail("Annual dividend", Figure::Currency(inputs.annual_dividend))
    .detail("Current price", Figure::Currency(inputs.current_price))
    .detail(
        "Spread over risk-free",
        Figure::Percent(dividend_yield - inputs.risk_free_rate),
    )
}

pub fn payout_ratio(inputs: &DividendInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let payout = if inputs.eps > 0.0 {
        inputs.annual_dividend / inputs.eps
    } else {
        0.0
    };
    let subtitle = if payout > 0.8 {
        "Payout leaves little room for growth"
    } else if payout > 0.5 {
        "Moderate payout"
    } else {
        "Conservative payout"
    };

    ValuationResult::new(
        ModelKind::PayoutRatio,
        Estimate::Value(payout),
        Unit::Percent,
        thresholds.payout_ratio.classify(payout),
    )
    .subtitle(subtitle)
    .detail("EPS", Figure::Currency(inputs.eps))
    .detail("Annual dividend", Figure::Currency(inputs.annual_dividend))
    .detail("Retained earnings", Figure::Percent(1.0 - payout))
}

pub fn dividend_coverage(inputs: &DividendInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let coverage = if inputs.annual_dividend > 0.0 {
        inputs.eps / inputs.annual_dividend
    } else {
        0.0
    };
    let band = &thresholds.dividend_coverage;
    let subtitle = if coverage > 2.0 {
        "Well covered by earnings"
    } else if coverage > 1.5 {
        "Adequately covered"
    } else {
        "Thin coverage"
    };
    let standard = match band.buy.level() {
        Some(level) => Figure::Text(format!("> {level:.1}x")),
        None => Figure::NotAvailable,
    };

    ValuationResult::new(
        ModelKind::DividendCoverage,
        Estimate::Value(coverage),
        Unit::Multiple,
        band.classify(coverage),
    )
    .subtitle(subtitle)
    .detail("Coverage standard", standard)
    .detail("Earnings per dividend dollar", Figure::Multiple(coverage))
}

pub fn sustainable_growth(inputs: &DividendInputs) -> ValuationResult {
    let sustainable = inputs.retention_rate * inputs.roe;
    let payout = checked_div(inputs.annual_dividend, inputs.eps);
    let payout_implied = payout.map(|p| inputs.roe * (1.0 - p));
    let stated = inputs.dividend_growth_rate;

    let signal = Band::new(Cutoff::Above(stated), Cutoff::Never).classify(sustainable);
    let verdict = if sustainable > stated {
        "Stated growth is sustainable"
    } else {
        "Stated growth may not be sustainable"
    };

    ValuationResult::new(
        ModelKind::SustainableGrowth,
        Estimate::Value(sustainable),
        Unit::Percent,
        signal,
    )
    .subtitle(verdict)
    .detail("Return on equity", Figure::Percent(inputs.roe))
    .detail("Retention rate", Figure::Percent(inputs.retention_rate))
    .detail("Payout-implied growth", Figure::or_na(payout_implied, Figure::Percent))
    .detail("Stated dividend growth", Figure::Percent(stated))
}

/// Total return split into yield and growth; informational only
pub fn return_decomposition(inputs: &DividendInputs) -> ValuationResult {
    let dividend_yield = current_yield(inputs);
    let growth = inputs.dividend_growth_rate;
    let expected = dividend_yield + growth;

    ValuationResult::new(
        ModelKind::ReturnDecomposition,
        Estimate::Value(expected),
        Unit::Percent,
        Signal::Neutral,
    )
    .subtitle("Total return = dividend yield + dividend growth")
    .detail("Dividend yield", Figure::Percent(dividend_yield))
    .detail("Dividend growth", Figure::Percent(growth))
    .detail("Required return", Figure::Percent(inputs.required_return))
    .detail("Excess return", Figure::Percent(expected - inputs.required_return))
}

// =============================================================================
// Dividend reinvestment
// =============================================================================

/// Walk the holding forward, reinvesting every dividend at that year's price.
///
/// Reinvestment is skipped in any year where the price is not positive.
pub fn reinvestment_projection(inputs: &DividendInputs) -> ReinvestmentProjection {
    let horizon = inputs
        .years_to_project
        .clamp(MIN_REINVESTMENT_YEARS, MAX_PERIODS);
    let growth = inputs.dividend_growth_rate;
    let initial_investment = inputs.initial_shares * inputs.current_price;

    let mut shares = inputs.initial_shares;
    let mut dividend = inputs.annual_dividend;
    let mut price = inputs.current_price;
    let mut years = Vec::with_capacity(horizon as usize + 1);

    for year in 0..=horizon {
        if year > 0 {
            dividend *= 1.0 + growth;
            price *= 1.0 + growth + PRICE_GROWTH_PREMIUM;
            if price > 0.0 {
                shares += shares * dividend / price;
            }
        }
        let annual_income = shares * dividend;
        let yield_on_cost = if initial_investment > 0.0 {
            annual_income / initial_investment
        } else {
            0.0
        };
        years.push(ReinvestmentYear {
            year,
            shares,
            dividend_per_share: dividend,
            price,
            annual_income,
            total_value: shares * price,
            yield_on_cost,
        });
    }

    ReinvestmentProjection {
        initial_investment,
        years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_gordon_defaults() {
        let result = gordon_growth(&DividendInputs::default(), &ThresholdTable::default());
        // 1.5 * 1.05 / 0.05
        assert!(approx(result.value.value().unwrap(), 31.5));
        assert_eq!(result.signal, Signal::Hold);
    }

    #[test]
    fn test_gordon_sensitivity_marks_non_computable_cells() {
        let inputs = DividendInputs {
            required_return: 0.06,
            dividend_growth_rate: 0.05,
            ..DividendInputs::default()
        };
        let grid = gordon_sensitivity(&inputs);
        // r = 0.04 against g = 0.05
        assert_eq!(grid.cell(0, 2), Some(Estimate::NonComputable));
        assert!(grid.cell(4, 0).unwrap().is_computable());
    }

    #[test]
    fn test_two_stage_terminal_non_computable_contributes_nothing() {
        let inputs = DividendInputs {
            required_return: 0.04,
            stable_growth_rate: 0.04,
            ..DividendInputs::default()
        };
        let ddm = two_stage_ddm(&inputs, &ThresholdTable::default());
        assert_eq!(ddm.terminal_present_value, Estimate::NonComputable);
        assert!(approx(
            ddm.total_present_value,
            ddm.high_growth.total_present_value
        ));
        assert_eq!(
            ddm.result.figure("Terminal value (PV)"),
            Some(&Figure::NotAvailable)
        );
    }

    #[test]
    fn test_two_stage_tail_is_display_only() {
        let ddm = two_stage_ddm(&DividendInputs::default(), &ThresholdTable::default());
        assert_eq!(ddm.stable_tail.len(), STABLE_TAIL_PERIODS as usize);
        assert_eq!(ddm.stable_tail.periods[0].index, 6);
        assert_eq!(ddm.timeline().count(), 15);

        let terminal = ddm.terminal_present_value.value().unwrap();
        let expected = ddm.high_growth.total_present_value + terminal;
        assert!(approx(ddm.total_present_value, expected));
    }

    #[test]
    fn test_h_model_formula() {
        let result = h_model(&DividendInputs::default(), &ThresholdTable::default());
        let stable = 1.5 * 1.04 / 0.06;
        let excess = 1.5 * 2.5 * (0.12 - 0.04) / 0.06;
        assert!(approx(result.value.value().unwrap(), stable + excess));
    }

    #[test]
    fn test_h_model_non_computable() {
        let inputs = DividendInputs {
            required_return: 0.03,
            ..DividendInputs::default()
        };
        let result = h_model(&inputs, &ThresholdTable::default());
        assert_eq!(result.value, Estimate::NonComputable);
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn test_income_ratio_fallbacks() {
        let thresholds = ThresholdTable::default();
        let inputs = DividendInputs {
            current_price: 0.0,
            eps: 0.0,
            annual_dividend: 0.0,
            ..DividendInputs::default()
        };
        assert_eq!(dividend_yield(&inputs, &thresholds).value, Estimate::Value(0.0));
        assert_eq!(payout_ratio(&inputs, &thresholds).value, Estimate::Value(0.0));
        assert_eq!(dividend_coverage(&inputs, &thresholds).value, Estimate::Value(0.0));
        assert_eq!(dividend_coverage(&inputs, &thresholds).signal, Signal::Sell);
    }

    #[test]
    fn test_sustainable_growth_signal() {
        // 0.5 * 0.15 = 0.075 > 0.05
        let result = sustainable_growth(&DividendInputs::default());
        assert!(approx(result.value.value().unwrap(), 0.075));
        assert_eq!(result.signal, Signal::Buy);

        let inputs = DividendInputs {
            dividend_growth_rate: 0.09,
            ..DividendInputs::default()
        };
        assert_eq!(sustainable_growth(&inputs).signal, Signal::Hold);
    }

    #[test]
    fn test_return_decomposition_is_neutral() {
        let result = return_decomposition(&DividendInputs::default());
        assert_eq!(result.signal, Signal::Neutral);
        assert!(approx(result.value.value().unwrap(), 0.05 + 0.05));
    }

    #[test]
    fn test_reinvestment_first_year() {
        let projection = reinvestment_projection(&DividendInputs::default());
        assert_eq!(projection.years.len(), 21);

        let start = projection.years[0];
        assert_eq!(start.shares, 1000.0);
        assert!(approx(start.yield_on_cost, 0.05));

        let first = projection.years[1];
        let dividend = 1.5 * 1.05;
        let price = 30.0 * 1.07;
        assert!(approx(first.shares, 1000.0 + 1000.0 * dividend / price));
        assert!(approx(first.total_value, first.shares * price));
    }

    #[test]
    fn test_sustainable_growth_at_stated_rate_is_hold() {
        let inputs = DividendInputs {
            retention_rate: 0.5,
            roe: 0.1,
            dividend_growth_rate: 0.05,
            ..DividendInputs::default()
        };
        let result = sustainable_growth(&inputs);
        assert_eq!(result.value, Estimate::Value(0.05));
        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.subtitle, "Stated growth may not be sustainable");

        let above = DividendInputs {
            roe: 0.12,
            ..inputs
        };
        let result = sustainable_growth(&above);
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.subtitle, "Stated growth is sustainable");
    }

    #[test]
    fn test_reinvestment_horizon_is_clamped() {
        let inputs = DividendInputs {
            years_to_project: 2,
            ..DividendInputs::default()
        };
        let projection = reinvestment_projection(&inputs);
        assert_eq!(projection.years.len(), MIN_REINVESTMENT_YEARS as usize + 1);
        assert!(projection.total_return().unwrap() > 0.0);
    }

    #[test]
    fn test_reinvestment_horizon_has_upper_bound() {
        let inputs = DividendInputs {
            years_to_project: u32::MAX,
            ..DividendInputs::default()
        };
        let projection = reinvestment_projection(&inputs);
        assert_eq!(projection.years.len(), MAX_PERIODS as usize + 1);
    }

    #[test]
    fn test_reinvestment_without_price_keeps_share_count() {
        let inputs = DividendInputs {
            current_price: 0.0,
            ..DividendInputs::default()
        };
        let projection = reinvestment_projection(&inputs);
        let last = projection.final_year().unwrap();
        assert_eq!(last.shares, 1000.0);
        assert_eq!(last.yield_on_cost, 0.0);
    }
}
