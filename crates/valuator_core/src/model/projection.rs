//! Multi-period cash-flow and dividend timelines

use serde::{Deserialize, Serialize};

/// Which phase of a multi-stage model a period belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Explicit (high) growth phase
    Growth,
    /// Growth linearly fading toward a lower rate
    Fade,
    /// Long-run stable growth
    Stable,
}

/// Growth assumption for one projected period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthStep {
    pub rate: f64,
    pub stage: Stage,
}

impl GrowthStep {
    #[must_use]
    pub fn new(rate: f64, stage: Stage) -> Self {
        Self { rate, stage }
    }
}

/// One projected period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    /// 1-based period number; also the discounting exponent
    pub index: u32,
    pub nominal: f64,
    pub present_value: f64,
    pub growth_rate: f64,
    pub stage: Stage,
}

/// An ordered projection timeline together with the sum of its present values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub base: f64,
    pub discount_rate: f64,
    pub periods: Vec<CashFlowPeriod>,
    pub total_present_value: f64,
}

impl Projection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Number of the last projected period (0 when nothing was projected)
    #[must_use]
    pub fn last_index(&self) -> u32 {
        self.periods.last().map_or(0, |p| p.index)
    }

    /// Nominal amount of the final period, or the base when no period was projected
    #[must_use]
    pub fn terminal_nominal(&self) -> f64 {
        self.periods.last().map_or(self.base, |p| p.nominal)
    }

    /// Periods belonging to a given stage, in timeline order
    pub fn stage_periods(&self, stage: Stage) -> impl Iterator<Item = &CashFlowPeriod> {
        self.periods.iter().filter(move |p| p.stage == stage)
    }
}
