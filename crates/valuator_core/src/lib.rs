//! Equity valuation engine
//!
//! Pure, deterministic valuation models grouped into three suites:
//! - Value: Graham number, P/E, P/B, single-stage DCF, NCAV, residual income
//! - Dividend: Gordon growth, two-stage DDM, H-model, income ratios, reinvestment
//! - Growth: PEG, three-stage DCF, EV/EBITDA, P/S, Rule of 40, reverse DCF, scenarios
//!
//! Every model returns a `ValuationResult` whose headline is an `Estimate`,
//! either a number or `NonComputable` when a perpetuity formula is undefined.
//!
//! ```ignore
//! use valuator_core::{ValuationInputs, evaluate_all};
//!
//! let mut inputs = ValuationInputs::default();
//! inputs.set("value.eps", 3.1)?;
//! let results = evaluate_all(&inputs);
//! println!("{:?}", results.value.graham_number.value);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod evaluate;
pub mod primitives;
pub mod suites;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::ThresholdTable;
pub use error::InputError;
pub use evaluate::{AllResults, evaluate_all, evaluate_all_with};
pub use model::{
    Estimate, Figure, ModelKind, Signal, Unit, ValuationInputs, ValuationResult,
};
