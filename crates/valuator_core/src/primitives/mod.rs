//! Shared numerical building blocks used by every model suite

mod classifier;
mod perpetuity;
mod projector;
mod scenarios;
mod sensitivity;
mod solver;

pub use classifier::{Band, Cutoff, Priority, classify};
pub use perpetuity::{discounted_terminal_value, perpetuity_value};
pub use projector::{constant_schedule, discount, fade_schedule, project_cash_flows, project_from};
pub use scenarios::{ScenarioParams, run_scenarios};
pub use sensitivity::{GridParams, build_sensitivity_grid};
pub use solver::{
    Bisection, REVERSE_DCF_PERIODS, reverse_dcf_value, solve_implied_growth,
    solve_implied_growth_with,
};
