//! Whole-snapshot evaluation
//!
//! `evaluate_all` runs every suite against one input snapshot. It holds no
//! state between calls, so identical inputs always produce identical output.

use serde::{Deserialize, Serialize};

use crate::config::ThresholdTable;
use crate::model::{Signal, ValuationInputs, ValuationResult};
use crate::suites::{DividendReport, GrowthReport, ValueReport, dividend, growth, value};

/// Every suite's output for one input snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllResults {
    pub value: ValueReport,
    pub dividend: DividendReport,
    pub growth: GrowthReport,
}

impl AllResults {
    /// Headline results of all three suites in presentation order
    pub fn results(&self) -> impl Iterator<Item = &ValuationResult> {
        self.value
            .results()
            .into_iter()
            .chain(self.dividend.results())
            .chain(self.growth.results())
    }

    /// Number of results carrying `signal`
    pub fn count_signal(&self, signal: Signal) -> usize {
        self.results().filter(|r| r.signal == signal).count()
    }
}

/// Evaluate every suite with the default threshold table
pub fn evaluate_all(inputs: &ValuationInputs) -> AllResults {
    evaluate_all_with(inputs, &ThresholdTable::default())
}

pub fn evaluate_all_with(inputs: &ValuationInputs, thresholds: &ThresholdTable) -> AllResults {
    let results = AllResults {
        value: value::evaluate(&inputs.value, thresholds),
        dividend: dividend::evaluate(&inputs.dividend, thresholds),
        growth: growth::evaluate(&inputs.growth, thresholds),
    };

    tracing::debug!(
        buy = results.count_signal(Signal::Buy),
        hold = results.count_signal(Signal::Hold),
        sell = results.count_signal(Signal::Sell),
        neutral = results.count_signal(Signal::Neutral),
        "evaluated all suites"
    );

    results
}
