//! Macro scenario runner

use crate::model::{Estimate, SCENARIO_CASES, Scenario};

/// The parameters a scenario perturbs, plus the price used for upside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParams {
    pub growth_rate: f64,
    pub discount_rate: f64,
    pub current_price: f64,
}

/// Re-run `valuation(growth, discount_rate)` under each fixed scenario.
///
/// Growth is multiplied by the scenario multiplier and the discount rate is
/// shifted by the scenario delta. Output order follows `SCENARIO_CASES`.
pub fn run_scenarios<F>(params: &ScenarioParams, valuation: F) -> Vec<Scenario>
where
    F: Fn(f64, f64) -> Estimate,
{
    SCENARIO_CASES
        .iter()
        .map(|case| {
            let growth = params.growth_rate * case.growth_multiplier;
            let rate = params.discount_rate + case.discount_rate_delta;
            let result_value = valuation(growth, rate);
            Scenario {
                name: case.name,
                growth_multiplier: case.growth_multiplier,
                discount_rate_delta: case.discount_rate_delta,
                result_value,
                upside_percent: result_value.upside_percent(params.current_price),
            }
        })
        .collect()
}
