//! Value-investing models
//!
//! Asset and earnings based valuations: Graham number, earnings and book
//! multiples, a single-stage DCF with margin of safety, Graham's net-net
//! floor and a residual income model.

use serde::{Deserialize, Serialize};

use crate::config::ThresholdTable;
use crate::model::{
    Estimate, Figure, GridAxis, ModelKind, Projection, SensitivityGrid, Signal, Stage, Unit,
    ValuationResult, ValueInputs, checked_div,
};
use crate::primitives::{
    Band, Cutoff, GridParams, build_sensitivity_grid, constant_schedule,
    discounted_terminal_value, project_cash_flows,
};

/// Graham's multiplier: a P/E of 15 times a P/B of 1.5
pub const GRAHAM_MULTIPLIER: f64 = 22.5;

/// Equity risk premium added to the risk-free rate for the required return
pub const EQUITY_RISK_PREMIUM: f64 = 0.05;

/// Share of earnings growth assumed to persist in excess returns
pub const EXCESS_RETURN_PERSISTENCE: f64 = 0.3;

/// Single-stage DCF with the projection it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    pub result: ValuationResult,
    pub projection: Projection,
    pub terminal_present_value: Estimate,
    /// Explicit periods plus terminal value
    pub total_present_value: Estimate,
    pub intrinsic_per_share: Estimate,
    /// Intrinsic value after the margin of safety
    pub safe_price: Estimate,
}

/// One bar of the valuation comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBar {
    pub label: String,
    pub value: Estimate,
}

impl ComparisonBar {
    fn new(label: &str, value: Estimate) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueReport {
    pub graham_number: ValuationResult,
    pub price_to_earnings: ValuationResult,
    pub peg_quick_check: ValuationResult,
    pub price_to_book: ValuationResult,
    pub dcf: DcfValuation,
    pub dcf_sensitivity: SensitivityGrid,
    pub net_current_asset_value: ValuationResult,
    pub residual_income: ValuationResult,
    pub comparison: Vec<ComparisonBar>,
    pub current_price: f64,
}

impl ValueReport {
    /// Every headline result in presentation order
    pub fn results(&self) -> Vec<&ValuationResult> {
        vec![
            &self.graham_number,
            &self.price_to_earnings,
            &self.peg_quick_check,
            &self.price_to_book,
            &self.dcf.result,
            &self.net_current_asset_value,
            &self.residual_income,
        ]
    }
}

pub fn evaluate(inputs: &ValueInputs, thresholds: &ThresholdTable) -> ValueReport {
    let graham_number = graham_number(inputs, thresholds);
    let dcf = discounted_cash_flow(inputs);
    let net_current_asset_value = net_current_asset_value(inputs, thresholds);
    let residual_income = residual_income(inputs, thresholds);

    // Asset floors below zero are shown as zero
    let comparison = vec![
        ComparisonBar::new("Current price", Estimate::Value(inputs.current_price)),
        ComparisonBar::new("Graham number", graham_number.value),
        ComparisonBar::new(
            "P/E fair value",
            Estimate::Value(inputs.eps * inputs.industry_pe),
        ),
        ComparisonBar::new("Book value", Estimate::Value(inputs.book_value_per_share)),
        ComparisonBar::new("DCF intrinsic value", dcf.intrinsic_per_share),
        ComparisonBar::new("DCF safe price", dcf.safe_price),
        ComparisonBar::new("NCAV", net_current_asset_value.value.map(|v| v.max(0.0))),
        ComparisonBar::new("Residual income", residual_income.value.map(|v| v.max(0.0))),
    ];

    ValueReport {
        price_to_earnings: price_to_earnings(inputs, thresholds),
        peg_quick_check: peg_quick_check(inputs, thresholds),
        price_to_book: price_to_book(inputs, thresholds),
        dcf_sensitivity: dcf_sensitivity(inputs),
        graham_number,
        dcf,
        net_current_asset_value,
        residual_income,
        comparison,
        current_price: inputs.current_price,
    }
}

// =============================================================================
// Earnings and book multiples
// =============================================================================

pub fn graham_number(inputs: &ValueInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let eps = inputs.eps;
    let bvps = inputs.book_value_per_share;
    let price = inputs.current_price;

    let value = if eps <= 0.0 || bvps <= 0.0 {
        0.0
    } else {
        (GRAHAM_MULTIPLIER * eps * bvps).sqrt()
    };
    let meaningful = (value > 0.0).then_some(value);
    let signal = thresholds.graham_number.classify_if(meaningful, |v| price / v);

    let subtitle = match meaningful {
        Some(v) if price < v => format!(
            "Trading {:.1}% below the Graham number",
            (1.0 - price / v) * 100.0
        ),
        Some(v) => format!(
            "Trading {:.1}% above the Graham number",
            (price / v - 1.0) * 100.0
        ),
        None => "Undefined for non-positive EPS or book value".to_string(),
    };
    let implied_pe = meaningful.and_then(|v| checked_div(v, eps));
    let implied_pb = meaningful.and_then(|v| checked_div(v, bvps));
    let margin = meaningful
        .and_then(|v| checked_div(price, v))
        .map(|r| 1.0 - r);

    ValuationResult::new(
        ModelKind::GrahamNumber,
        Estimate::Value(value),
        Unit::Currency,
        signal,
    )
    .subtitle(subtitle)
    .detail("EPS", Figure::Currency(eps))
    .detail("Book value per share", Figure::Currency(bvps))
    .detail("Implied P/E", Figure::or_na(implied_pe, Figure::Multiple))
    .detail("Implied P/B", Figure::or_na(implied_pb, Figure::Multiple))
    .detail("Margin of safety", Figure::or_na(margin, Figure::Percent))
}

fn current_pe(price: f64, eps: f64) -> f64 {
    if eps > 0.0 { price / eps } else { 0.0 }
}

pub fn price_to_earnings(inputs: &ValueInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let pe = current_pe(inputs.current_price, inputs.eps);
    let industry = inputs.industry_pe;
    let fair_value = inputs.eps * industry;

    let signal = if pe <= 0.0 {
        Signal::Neutral
    } else {
        thresholds.price_to_earnings.scaled(industry).classify(pe)
    };
    let subtitle = match checked_div(pe, industry) {
        Some(_) if pe <= 0.0 => "No meaningful P/E for non-positive earnings".to_string(),
        Some(r) if r < 1.0 => format!("{:.1}% below the industry multiple", (1.0 - r) * 100.0),
        Some(r) => format!("{:.1}% above the industry multiple", (r - 1.0) * 100.0),
        None => "No industry multiple to compare against".to_string(),
    };

    ValuationResult::new(
        ModelKind::PriceToEarnings,
        Estimate::Value(pe),
        Unit::Multiple,
        signal,
    )
    .subtitle(subtitle)
    .detail("Industry P/E", Figure::Multiple(industry))
    .detail("Fair value at industry P/E", Figure::Currency(fair_value))
    .detail(
        "Price vs fair value",
        Figure::or_na(
            checked_div(inputs.current_price, fair_value).map(|r| r - 1.0),
            Figure::Percent,
        ),
    )
    .detail("Earnings yield", Figure::or_na(checked_div(1.0, pe), Figure::Percent))
}

/// P/E divided by earnings growth in percent
pub fn peg_quick_check(inputs: &ValueInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let pe = current_pe(inputs.current_price, inputs.eps);
    let growth = inputs.earnings_growth_rate;
    let peg = (growth > 0.0).then(|| pe / (growth * 100.0));

    let signal = match peg {
        Some(p) => thresholds.peg_quick_check.classify(p),
        None => Signal::Neutral,
    };
    let subtitle = if peg.is_some() {
        "Below 1 suggests growth is not fully priced in"
    } else {
        "Requires positive earnings growth"
    };

    ValuationResult::new(ModelKind::PegQuickCheck, Estimate::from(peg), Unit::Ratio, signal)
        .subtitle(subtitle)
        .detail("P/E", Figure::Multiple(pe))
        .detail("Earnings growth", Figure::Percent(growth))
}

pub fn price_to_book(inputs: &ValueInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let bvps = inputs.book_value_per_share;
    let pb = if bvps > 0.0 { inputs.current_price / bvps } else { 0.0 };
    let roe = checked_div(inputs.eps, bvps);
    let fair_pb =
        roe.and_then(|roe| checked_div(roe, inputs.risk_free_rate + EQUITY_RISK_PREMIUM));

    let subtitle = if pb < 1.0 {
        "Trading below book value"
    } else {
        "Trading at or above book value"
    };

    ValuationResult::new(
        ModelKind::PriceToBook,
        Estimate::Value(pb),
        Unit::Multiple,
        thresholds.price_to_book.classify(pb),
    )
    .subtitle(subtitle)
    .detail("Book value per share", Figure::Currency(bvps))
    .detail("Return on equity", Figure::or_na(roe, Figure::Percent))
    .detail("Justified P/B", Figure::or_na(fair_pb, Figure::Multiple))
    .detail("Premium to book", Figure::Percent(pb - 1.0))
    .detail("Price at 1x book", Figure::Currency(bvps))
}

// =============================================================================
// Discounted cash flow
// =============================================================================

fn dcf_parts(inputs: &ValueInputs, wacc: f64, terminal_growth: f64) -> (Projection, Estimate) {
    let schedule = constant_schedule(
        inputs.fcf_growth_rate,
        inputs.projection_years,
        Stage::Growth,
    );
    let projection = project_cash_flows(inputs.free_cash_flow, &schedule, wacc);
    let terminal = discounted_terminal_value(
        projection.terminal_nominal(),
        wacc,
        terminal_growth,
        inputs.projection_years,
    );
    (projection, terminal)
}

fn per_share(total: Estimate, shares: f64) -> Estimate {
    match total {
        Estimate::Value(v) if shares > 0.0 => Estimate::finite(v / shares),
        _ => Estimate::NonComputable,
    }
}

/// Intrinsic value per share at the given WACC and terminal growth
pub fn dcf_per_share(inputs: &ValueInputs, wacc: f64, terminal_growth: f64) -> Estimate {
    let (projection, terminal) = dcf_parts(inputs, wacc, terminal_growth);
    per_share(
        terminal.map(|tv| projection.total_present_value + tv),
        inputs.shares_outstanding,
    )
}

pub fn discounted_cash_flow(inputs: &ValueInputs) -> DcfValuation {
    let (projection, terminal_present_value) =
        dcf_parts(inputs, inputs.wacc, inputs.terminal_growth_rate);
    let total_present_value = terminal_present_value.map(|tv| projection.total_present_value + tv);
    let intrinsic_per_share = per_share(total_present_value, inputs.shares_outstanding);
    let safe_price = intrinsic_per_share.map(|v| v * (1.0 - inputs.margin_of_safety));
    let price = inputs.current_price;

    let signal = match (intrinsic_per_share.value(), safe_price.value()) {
        (Some(intrinsic), Some(safe)) => {
            Band::new(Cutoff::Below(safe), Cutoff::Above(intrinsic)).classify(price)
        }
        _ => Signal::Neutral,
    };
    let subtitle = match safe_price.value() {
        Some(safe) => format!(
            "Safe price {safe:.2} at a {:.0}% margin of safety",
            inputs.margin_of_safety * 100.0
        ),
        None if inputs.wacc <= inputs.terminal_growth_rate => {
            "WACC must exceed terminal growth".to_string()
        }
        None => "Requires a positive share count".to_string(),
    };
    let terminal_share = match (terminal_present_value, total_present_value) {
        (Estimate::Value(tv), Estimate::Value(total)) => checked_div(tv, total),
        _ => None,
    };

    let result = ValuationResult::new(
        ModelKind::DiscountedCashFlow,
        intrinsic_per_share,
        Unit::Currency,
        signal,
    )
    .subtitle(subtitle)
    .detail("Explicit period value", Figure::Aggregate(projection.total_present_value))
    .detail("Terminal value (PV)", Figure::estimate(terminal_present_value, Figure::Aggregate))
    .detail("Enterprise value", Figure::estimate(total_present_value, Figure::Aggregate))
    .detail("Terminal share of value", Figure::or_na(terminal_share, Figure::Percent))
    .detail("Safe price", Figure::estimate(safe_price, Figure::Currency))
    .detail(
        "Upside to intrinsic value",
        Figure::or_na(
            intrinsic_per_share.value().and_then(|v| checked_div(v, price)).map(|r| r - 1.0),
            Figure::Percent,
        ),
    );

    DcfValuation {
        result,
        projection,
        terminal_present_value,
        total_present_value,
        intrinsic_per_share,
        safe_price,
    }
}

/// Intrinsic value per share over WACC ±1/2% and terminal growth ±0.5/1%
pub fn dcf_sensitivity(inputs: &ValueInputs) -> SensitivityGrid {
    let params = GridParams {
        row: GridAxis::new("WACC", inputs.wacc, 0.01),
        col: GridAxis::new("Terminal growth", inputs.terminal_growth_rate, 0.005),
        reference_price: Some(inputs.current_price),
    };
    build_sensitivity_grid(&params, |wacc, growth| dcf_per_share(inputs, wacc, growth))
}

// =============================================================================
// Asset floors and excess returns
// =============================================================================

pub fn net_current_asset_value(
    inputs: &ValueInputs,
    thresholds: &ThresholdTable,
) -> ValuationResult {
    let net = inputs.current_assets - inputs.total_liabilities - inputs.preferred_stock;
    let ncav = if inputs.shares_outstanding > 0.0 {
        net / inputs.shares_outstanding
    } else {
        0.0
    };
    let band = thresholds.net_current_asset_value.scaled(ncav);

    let signal = if ncav <= 0.0 {
        Signal::Sell
    } else {
        band.classify(inputs.current_price)
    };
    let subtitle = match band.buy.level() {
        Some(buy_below) if ncav > 0.0 => format!("Net-net buy price below {buy_below:.2}"),
        _ => "No positive net current asset value".to_string(),
    };

    ValuationResult::new(
        ModelKind::NetCurrentAssetValue,
        Estimate::Value(ncav),
        Unit::Currency,
        signal,
    )
    .subtitle(subtitle)
    .detail("Current assets", Figure::Aggregate(inputs.current_assets))
    .detail("Total liabilities", Figure::Aggregate(inputs.total_liabilities))
    .detail("Preferred stock", Figure::Aggregate(inputs.preferred_stock))
    .detail("Net current assets", Figure::Aggregate(net))
    .detail(
        "Discount to NCAV",
        Figure::or_na(
            (ncav > 0.0).then(|| 1.0 - inputs.current_price / ncav),
            Figure::Percent,
        ),
    )
}

pub fn residual_income(inputs: &ValueInputs, thresholds: &ThresholdTable) -> ValuationResult {
    let bvps = inputs.book_value_per_share;
    let required_return = inputs.risk_free_rate + EQUITY_RISK_PREMIUM;
    let excess = inputs.eps - bvps * required_return;
    let denominator = required_return - EXCESS_RETURN_PERSISTENCE * inputs.earnings_growth_rate;

    let value = if denominator <= 0.0 {
        Estimate::NonComputable
    } else {
        Estimate::finite(bvps + excess / denominator)
    };
    let price = inputs.current_price;
    let signal = thresholds
        .residual_income
        .classify_if(value.positive(), |v| price / v);
    let subtitle = if !value.is_computable() {
        "Required return must exceed persistent growth"
    } else if excess > 0.0 {
        "Earning above the cost of equity"
    } else {
        "Earning below the cost of equity"
    };

    ValuationResult::new(ModelKind::ResidualIncome, value, Unit::Currency, signal)
        .subtitle(subtitle)
        .detail("Book value per share", Figure::Currency(bvps))
        .detail("Required return", Figure::Percent(required_return))
        .detail("Residual income per share", Figure::Currency(excess))
        .detail(
            "PV of excess returns",
            Figure::estimate(value.map(|v| v - bvps), Figure::Currency),
        )
        .detail(
            "Price vs value",
            Figure::or_na(value.positive().map(|v| price / v - 1.0), Figure::Percent),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_graham_number_defaults() {
        let result = graham_number(&ValueInputs::default(), &ThresholdTable::default());
        let value = result.value.value().unwrap();
        assert!(approx(value, (22.5_f64 * 2.5 * 15.0).sqrt()));
        // 25 / 29.05 sits inside the hold band
        assert_eq!(result.signal, Signal::Hold);
    }

    #[test]
    fn test_graham_number_negative_eps_is_zero_and_neutral() {
        let inputs = ValueInputs {
            eps: -1.0,
            ..ValueInputs::default()
        };
        let result = graham_number(&inputs, &ThresholdTable::default());
        assert_eq!(result.value, Estimate::Value(0.0));
        assert_eq!(result.signal, Signal::Neutral);
        assert_eq!(result.figure("Implied P/E"), Some(&Figure::NotAvailable));
    }

    #[test]
    fn test_price_to_earnings_against_industry() {
        let inputs = ValueInputs {
            current_price: 20.0,
            eps: 2.5,
            industry_pe: 15.0,
            ..ValueInputs::default()
        };
        // P/E 8 < 0.8 * 15
        let result = price_to_earnings(&inputs, &ThresholdTable::default());
        assert_eq!(result.value, Estimate::Value(8.0));
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(
            result.figure("Fair value at industry P/E"),
            Some(&Figure::Currency(37.5))
        );
    }

    #[test]
    fn test_price_to_earnings_without_earnings_is_neutral() {
        let inputs = ValueInputs {
            eps: 0.0,
            ..ValueInputs::default()
        };
        let result = price_to_earnings(&inputs, &ThresholdTable::default());
        assert_eq!(result.value, Estimate::Value(0.0));
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn test_peg_quick_check_requires_growth() {
        let inputs = ValueInputs {
            earnings_growth_rate: 0.0,
            ..ValueInputs::default()
        };
        let result = peg_quick_check(&inputs, &ThresholdTable::default());
        assert_eq!(result.value, Estimate::NonComputable);
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn test_price_to_book_bands() {
        let thresholds = ThresholdTable::default();
        let cheap = ValueInputs {
            current_price: 12.0,
            ..ValueInputs::default()
        };
        assert_eq!(price_to_book(&cheap, &thresholds).signal, Signal::Buy);

        let rich = ValueInputs {
            current_price: 50.0,
            ..ValueInputs::default()
        };
        assert_eq!(price_to_book(&rich, &thresholds).signal, Signal::Sell);
    }

    #[test]
    fn test_dcf_non_computable_when_wacc_not_above_growth() {
        let inputs = ValueInputs {
            wacc: 0.03,
            terminal_growth_rate: 0.03,
            ..ValueInputs::default()
        };
        let dcf = discounted_cash_flow(&inputs);
        assert_eq!(dcf.intrinsic_per_share, Estimate::NonComputable);
        assert_eq!(dcf.safe_price, Estimate::NonComputable);
        assert_eq!(dcf.result.signal, Signal::Neutral);
        assert_eq!(dcf.projection.len(), 10);
    }

    #[test]
    fn test_dcf_zero_shares_is_non_computable() {
        let inputs = ValueInputs {
            shares_outstanding: 0.0,
            ..ValueInputs::default()
        };
        let dcf = discounted_cash_flow(&inputs);
        assert!(dcf.total_present_value.is_computable());
        assert_eq!(dcf.intrinsic_per_share, Estimate::NonComputable);
    }

    #[test]
    fn test_dcf_sensitivity_center_matches_model() {
        let inputs = ValueInputs::default();
        let grid = dcf_sensitivity(&inputs);
        let dcf = discounted_cash_flow(&inputs);
        assert_eq!(grid.center(), Some(dcf.intrinsic_per_share));
        assert_eq!(grid.reference_price, Some(inputs.current_price));
    }

    #[test]
    fn test_ncav_zero_shares_falls_back_to_zero() {
        let inputs = ValueInputs {
            shares_outstanding: 0.0,
            ..ValueInputs::default()
        };
        let result = net_current_asset_value(&inputs, &ThresholdTable::default());
        assert_eq!(result.value, Estimate::Value(0.0));
        assert_eq!(result.signal, Signal::Sell);
    }

    #[test]
    fn test_residual_income_non_computable_denominator() {
        // 0.035 + 0.05 - 0.3 * 0.3 < 0
        let inputs = ValueInputs {
            earnings_growth_rate: 0.3,
            ..ValueInputs::default()
        };
        let result = residual_income(&inputs, &ThresholdTable::default());
        assert_eq!(result.value, Estimate::NonComputable);
        assert_eq!(result.signal, Signal::Neutral);
    }

    #[test]
    fn test_comparison_floors_negative_values() {
        let inputs = ValueInputs {
            total_liabilities: 900.0,
            ..ValueInputs::default()
        };
        let report = evaluate(&inputs, &ThresholdTable::default());
        let ncav_bar = report
            .comparison
            .iter()
            .find(|bar| bar.label == "NCAV")
            .unwrap();
        assert_eq!(ncav_bar.value, Estimate::Value(0.0));
        assert_eq!(report.results().len(), 7);
    }
}
