//! Macro scenarios
//!
//! Five fixed cases pair a growth multiplier with a discount-rate shift,
//! ordered from most pessimistic to most optimistic.

use serde::{Deserialize, Serialize};

use super::results::Estimate;

/// The fixed macro scenarios, ordered from most to least pessimistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioName {
    Pessimistic,
    Conservative,
    Base,
    Optimistic,
    HyperOptimistic,
}

impl ScenarioName {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScenarioName::Pessimistic => "Pessimistic",
            ScenarioName::Conservative => "Conservative",
            ScenarioName::Base => "Base",
            ScenarioName::Optimistic => "Optimistic",
            ScenarioName::HyperOptimistic => "Hyper-optimistic",
        }
    }
}

/// Growth multiplier and discount-rate shift applied by a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioCase {
    pub name: ScenarioName,
    pub growth_multiplier: f64,
    pub discount_rate_delta: f64,
}

pub const SCENARIO_CASES: [ScenarioCase; 5] = [
    ScenarioCase {
        name: ScenarioName::Pessimistic,
        growth_multiplier: 0.5,
        discount_rate_delta: 0.02,
    },
    ScenarioCase {
        name: ScenarioName::Conservative,
        growth_multiplier: 0.75,
        discount_rate_delta: 0.01,
    },
    ScenarioCase {
        name: ScenarioName::Base,
        growth_multiplier: 1.0,
        discount_rate_delta: 0.0,
    },
    ScenarioCase {
        name: ScenarioName::Optimistic,
        growth_multiplier: 1.25,
        discount_rate_delta: -0.01,
    },
    ScenarioCase {
        name: ScenarioName::HyperOptimistic,
        growth_multiplier: 1.5,
        discount_rate_delta: -0.02,
    },
];

/// Result of re-running a valuation under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: ScenarioName,
    pub growth_multiplier: f64,
    pub discount_rate_delta: f64,
    pub result_value: Estimate,
    /// `(value / price - 1) * 100`
    pub upside_percent: Estimate,
}
