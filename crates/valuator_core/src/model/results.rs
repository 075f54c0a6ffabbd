//! Valuation results
//!
//! Every model returns a `ValuationResult`: a headline `Estimate`, the signal
//! derived from it and an ordered list of labelled detail figures. Figures stay
//! at full precision; rendering them is left to the consumer.

use serde::{Deserialize, Serialize};

/// A model output that may be undefined.
///
/// `NonComputable` is produced by perpetuity formulas whose discount rate does
/// not exceed the growth rate, and by per-share divisions a model refuses to
/// perform. It is never folded into `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimate {
    Value(f64),
    NonComputable,
}

impl Estimate {
    /// Wrap a raw number, treating NaN and infinities as non-computable
    #[must_use]
    pub fn finite(value: f64) -> Self {
        if value.is_finite() {
            Estimate::Value(value)
        } else {
            Estimate::NonComputable
        }
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Estimate::Value(v) => Some(v),
            Estimate::NonComputable => None,
        }
    }

    #[must_use]
    pub fn is_computable(self) -> bool {
        matches!(self, Estimate::Value(_))
    }

    /// The value if it is strictly positive.
    ///
    /// Models where a zero or negative value is meaningless classify as neutral
    /// whenever this returns `None`.
    #[must_use]
    pub fn positive(self) -> Option<f64> {
        self.value().filter(|v| *v > 0.0)
    }

    #[must_use]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Estimate::Value(v) => Estimate::Value(f(v)),
            Estimate::NonComputable => Estimate::NonComputable,
        }
    }

    /// Percentage upside of this value over a market price: `(value / price - 1) * 100`
    #[must_use]
    pub fn upside_percent(self, price: f64) -> Self {
        match self {
            Estimate::Value(v) if price > 0.0 => Estimate::Value((v / price - 1.0) * 100.0),
            _ => Estimate::NonComputable,
        }
    }
}

impl From<Option<f64>> for Estimate {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Estimate::NonComputable, Estimate::Value)
    }
}

/// Actionable classification of a valuation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    /// Informational metric, or the underlying value is non-computable
    Neutral,
}

impl Signal {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
            Signal::Neutral => "neutral",
        }
    }
}

/// How the headline value of a result should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Per-share currency amount
    Currency,
    /// Fraction, rendered as a percentage
    Percent,
    /// Valuation multiple such as P/E
    Multiple,
    /// Dimensionless ratio such as PEG
    Ratio,
    /// Points on an additive score (Rule of 40)
    Score,
}

/// A single labelled figure in a result's detail list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Figure {
    /// Per-share currency amount
    Currency(f64),
    /// Aggregate currency amount (company-level, same units as the inputs)
    Aggregate(f64),
    /// Fraction, rendered as a percentage
    Percent(f64),
    /// Already expressed in percentage points
    Points(f64),
    Multiple(f64),
    Ratio(f64),
    Years(f64),
    Text(String),
    /// Derived figure whose divisor was zero or whose formula is undefined
    NotAvailable,
}

impl Figure {
    /// Build a figure from an optional number, mapping `None` to `NotAvailable`
    #[must_use]
    pub fn or_na(value: Option<f64>, make: fn(f64) -> Figure) -> Figure {
        match value {
            Some(v) if v.is_finite() => make(v),
            _ => Figure::NotAvailable,
        }
    }

    #[must_use]
    pub fn estimate(value: Estimate, make: fn(f64) -> Figure) -> Figure {
        Figure::or_na(value.value(), make)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub label: String,
    pub figure: Figure,
}

/// Identifies which valuation model produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    // Value suite
    GrahamNumber,
    PriceToEarnings,
    PegQuickCheck,
    PriceToBook,
    DiscountedCashFlow,
    NetCurrentAssetValue,
    ResidualIncome,
    // Dividend suite
    GordonGrowth,
    TwoStageDdm,
    HModel,
    DividendYield,
    PayoutRatio,
    DividendCoverage,
    SustainableGrowth,
    ReturnDecomposition,
    // Growth suite
    Peg,
    GrowthAdjustedValue,
    ThreeStageDcf,
    EvEbitda,
    EvEbitdaFairValue,
    PriceToSales,
    PriceToSalesFairValue,
    RuleOfForty,
    ReverseDcf,
}

impl ModelKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ModelKind::GrahamNumber => "Graham Number",
            ModelKind::PriceToEarnings => "P/E Ratio",
            ModelKind::PegQuickCheck => "PEG Quick Check",
            ModelKind::PriceToBook => "P/B Ratio",
            ModelKind::DiscountedCashFlow => "DCF Intrinsic Value",
            ModelKind::NetCurrentAssetValue => "NCAV per Share",
            ModelKind::ResidualIncome => "Residual Income Value",
            ModelKind::GordonGrowth => "Gordon Growth Model",
            ModelKind::TwoStageDdm => "Two-Stage DDM",
            ModelKind::HModel => "H-Model",
            ModelKind::DividendYield => "Dividend Yield",
            ModelKind::PayoutRatio => "Payout Ratio",
            ModelKind::DividendCoverage => "Dividend Coverage",
            ModelKind::SustainableGrowth => "Sustainable Growth Rate",
            ModelKind::ReturnDecomposition => "Implied Return Decomposition",
            ModelKind::Peg => "PEG Ratio",
            ModelKind::GrowthAdjustedValue => "Growth-Adjusted Fair Value",
            ModelKind::ThreeStageDcf => "Three-Stage DCF",
            ModelKind::EvEbitda => "EV/EBITDA",
            ModelKind::EvEbitdaFairValue => "EV/EBITDA Fair Value",
            ModelKind::PriceToSales => "P/S Ratio",
            ModelKind::PriceToSalesFairValue => "P/S Fair Value",
            ModelKind::RuleOfForty => "Rule of 40",
            ModelKind::ReverseDcf => "Reverse DCF Implied Growth",
        }
    }
}

/// Output of a single valuation model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub model: ModelKind,
    pub value: Estimate,
    pub unit: Unit,
    pub signal: Signal,
    pub subtitle: String,
    /// Presentation order is significant
    pub details: Vec<Detail>,
}

impl ValuationResult {
    #[must_use]
    pub fn new(model: ModelKind, value: Estimate, unit: Unit, signal: Signal) -> Self {
        Self {
            model,
            value,
            unit,
            signal,
            subtitle: String::new(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn detail(mut self, label: impl Into<String>, figure: Figure) -> Self {
        self.details.push(Detail {
            label: label.into(),
            figure,
        });
        self
    }

    /// Look up a detail figure by label
    pub fn figure(&self, label: &str) -> Option<&Figure> {
        self.details
            .iter()
            .find(|d| d.label == label)
            .map(|d| &d.figure)
    }
}

/// Divide, returning `None` for a zero divisor or a non-finite quotient
#[must_use]
pub fn checked_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let q = numerator / denominator;
    q.is_finite().then_some(q)
}
