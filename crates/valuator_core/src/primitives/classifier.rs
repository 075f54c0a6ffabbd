//! Signal classification
//!
//! A `Band` pairs a buy cutoff with a sell cutoff; anything admitted by neither
//! is a hold. Bands can be scaled by a reference value so that rules written
//! against a multiple of something ("below 0.8x the industry P/E") compare the
//! raw metric against the scaled cutoff directly.

use serde::{Deserialize, Serialize};

use crate::model::Signal;

/// One side of a classification band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cutoff {
    Below(f64),
    AtOrBelow(f64),
    Above(f64),
    AtOrAbove(f64),
    /// Admits nothing
    Never,
}

impl Cutoff {
    #[must_use]
    pub fn admits(self, metric: f64) -> bool {
        match self {
            Cutoff::Below(x) => metric < x,
            Cutoff::AtOrBelow(x) => metric <= x,
            Cutoff::Above(x) => metric > x,
            Cutoff::AtOrAbove(x) => metric >= x,
            Cutoff::Never => false,
        }
    }

    /// Threshold level, if the cutoff has one
    #[must_use]
    pub fn level(self) -> Option<f64> {
        match self {
            Cutoff::Below(x) | Cutoff::AtOrBelow(x) | Cutoff::Above(x) | Cutoff::AtOrAbove(x) => {
                Some(x)
            }
            Cutoff::Never => None,
        }
    }

    #[must_use]
    pub fn scaled(self, reference: f64) -> Self {
        match self {
            Cutoff::Below(x) => Cutoff::Below(reference * x),
            Cutoff::AtOrBelow(x) => Cutoff::AtOrBelow(reference * x),
            Cutoff::Above(x) => Cutoff::Above(reference * x),
            Cutoff::AtOrAbove(x) => Cutoff::AtOrAbove(reference * x),
            Cutoff::Never => Cutoff::Never,
        }
    }
}

/// Which cutoff wins when a metric satisfies both
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Buy,
    Sell,
}

/// Buy/sell thresholds for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub buy: Cutoff,
    pub sell: Cutoff,
    #[serde(default)]
    pub priority: Priority,
}

impl Band {
    #[must_use]
    pub const fn new(buy: Cutoff, sell: Cutoff) -> Self {
        Self {
            buy,
            sell,
            priority: Priority::Buy,
        }
    }

    /// The usual "price / value" band: below 0.8 buy, above 1.2 sell
    #[must_use]
    pub const fn ratio() -> Self {
        Band::new(Cutoff::Below(0.8), Cutoff::Above(1.2))
    }

    #[must_use]
    pub const fn sell_first(mut self) -> Self {
        self.priority = Priority::Sell;
        self
    }

    /// Multiply both cutoffs by a reference value
    #[must_use]
    pub fn scaled(self, reference: f64) -> Self {
        Self {
            buy: self.buy.scaled(reference),
            sell: self.sell.scaled(reference),
            priority: self.priority,
        }
    }

    /// Classify a metric; non-finite metrics are neutral
    #[must_use]
    pub fn classify(&self, metric: f64) -> Signal {
        if !metric.is_finite() {
            return Signal::Neutral;
        }
        let buy = self.buy.admits(metric);
        let sell = self.sell.admits(metric);
        match (self.priority, buy, sell) {
            (Priority::Buy, true, _) | (Priority::Sell, true, false) => Signal::Buy,
            (_, _, true) => Signal::Sell,
            _ => Signal::Hold,
        }
    }

    /// Classify `metric` only when a meaningful (positive) value exists
    #[must_use]
    pub fn classify_if(&self, meaningful: Option<f64>, metric: impl FnOnce(f64) -> f64) -> Signal {
        match meaningful {
            Some(value) => self.classify(metric(value)),
            None => Signal::Neutral,
        }
    }
}

/// `ratio < low` is buy, `ratio > high` is sell, otherwise hold
#[must_use]
pub fn classify(ratio: f64, low: f64, high: f64) -> Signal {
    Band::new(Cutoff::Below(low), Cutoff::Above(high)).classify(ratio)
}
