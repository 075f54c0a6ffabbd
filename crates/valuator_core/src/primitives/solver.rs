//! Reverse DCF solver
//!
//! Recovers the constant growth rate implied by an observed market value by
//! bisecting over a fixed bracket for a fixed number of iterations. There is no
//! tolerance check: the iteration count alone bounds the work and makes the
//! output deterministic. A target outside the bracket converges onto the
//! nearer bound.

use serde::{Deserialize, Serialize};

use super::projector::{constant_schedule, discount, project_cash_flows};
use crate::model::Stage;

/// Explicit periods projected by the reverse DCF
pub const REVERSE_DCF_PERIODS: u32 = 10;

/// Bracket and iteration count for a bisection search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bisection {
    pub lower: f64,
    pub upper: f64,
    pub iterations: usize,
}

impl Default for Bisection {
    fn default() -> Self {
        Self {
            lower: -0.10,
            upper: 1.00,
            iterations: 100,
        }
    }
}

impl Bisection {
    /// Find `x` in the bracket where the increasing function `f` reaches `target`.
    ///
    /// Returns the midpoint of the final bracket.
    pub fn solve(&self, target: f64, f: impl Fn(f64) -> f64) -> f64 {
        let mut low = self.lower;
        let mut high = self.upper;

        for _ in 0..self.iterations {
            let mid = f64::midpoint(low, high);
            if f(mid) < target {
                low = mid;
            } else {
                high = mid;
            }
        }

        f64::midpoint(low, high)
    }
}

/// Enterprise value implied by growing `fcf` at `growth` for ten periods and
/// capitalising the final cash flow with a Gordon terminal value.
///
/// The terminal formula is applied as-is; callers wanting the non-computable
/// guard check `wacc > terminal_growth` themselves.
#[must_use]
pub fn reverse_dcf_value(fcf: f64, growth: f64, wacc: f64, terminal_growth: f64) -> f64 {
    let schedule = constant_schedule(growth, REVERSE_DCF_PERIODS, Stage::Growth);
    let projection = project_cash_flows(fcf, &schedule, wacc);
    let terminal_value =
        projection.terminal_nominal() * (1.0 + terminal_growth) / (wacc - terminal_growth);
    projection.total_present_value + discount(terminal_value, wacc, REVERSE_DCF_PERIODS)
}

/// Growth rate at which `reverse_dcf_value` equals `target_value`, using the default bracket
#[must_use]
pub fn solve_implied_growth(target_value: f64, fcf: f64, wacc: f64, terminal_growth: f64) -> f64 {
    solve_implied_growth_with(
        &Bisection::default(),
        target_value,
        fcf,
        wacc,
        terminal_growth,
    )
}

/// Growth rate at which `reverse_dcf_value` equals `target_value`, using a caller-supplied bracket
#[must_use]
pub fn solve_implied_growth_with(
    bisection: &Bisection,
    target_value: f64,
    fcf: f64,
    wacc: f64,
    terminal_growth: f64,
) -> f64 {
    let implied = bisection.solve(target_value, |g| {
        reverse_dcf_value(fcf, g, wacc, terminal_growth)
    });
    tracing::trace!(target_value, implied, "reverse DCF bisection finished");
    implied
}
