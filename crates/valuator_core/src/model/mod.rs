mod grid;
mod inputs;
mod projection;
mod results;
mod scenario;

pub use grid::{GRID_POINTS, GridAxis, SensitivityGrid};
pub use inputs::{DividendInputs, GrowthInputs, MAX_PERIODS, ValuationInputs, ValueInputs};
pub use projection::{CashFlowPeriod, GrowthStep, Projection, Stage};
pub use results::{
    Detail, Estimate, Figure, ModelKind, Signal, Unit, ValuationResult, checked_div,
};
pub use scenario::{SCENARIO_CASES, Scenario, ScenarioCase, ScenarioName};
