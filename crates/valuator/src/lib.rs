//! Command line front end for the valuation engine
//!
//! Loads a YAML inputs file (or the built-in defaults), applies `--set`
//! overrides, evaluates every model and renders the selected suites as text,
//! YAML or JSON.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod data;
pub mod logging;
pub mod report;
pub mod util;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use data::{StorageError, ValuationFile, load_inputs, save_inputs};
pub use logging::init_logging;

use std::path::PathBuf;

use clap::ValueEnum;
use color_eyre::eyre::WrapErr;
use valuator_core::{ThresholdTable, ValuationInputs, evaluate_all_with};

/// Which suite(s) to report on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Suite {
    Value,
    Dividend,
    Growth,
    #[default]
    All,
}

impl Suite {
    /// Whether a report for `self` contains `suite`
    pub fn includes(self, suite: Suite) -> bool {
        self == Suite::All || self == suite
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
    Json,
}

/// Everything one invocation needs
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Inputs file; defaults are used when absent
    pub input: Option<PathBuf>,
    pub suite: Suite,
    /// `suite.field=value` assignments, applied in order
    pub overrides: Vec<String>,
    pub format: OutputFormat,
    /// Write the default inputs file here and exit
    pub write_defaults: Option<PathBuf>,
}

/// Run one invocation and return what should be printed
pub fn run(options: &RunOptions) -> color_eyre::Result<String> {
    if let Some(path) = &options.write_defaults {
        save_inputs(path, &ValuationFile::default())?;
        return Ok(format!("Wrote default inputs to {}\n", path.display()));
    }

    let (mut inputs, thresholds) = load(options)?;
    data::apply_overrides(&mut inputs, &options.overrides)
        .wrap_err("Failed to apply --set overrides")?;

    let results = evaluate_all_with(&inputs, &thresholds);
    tracing::info!(
        suite = ?options.suite,
        format = ?options.format,
        overrides = options.overrides.len(),
        "evaluated valuation models"
    );

    let rendered = report::render(&results, options.suite, options.format)?;
    Ok(rendered)
}

fn load(options: &RunOptions) -> color_eyre::Result<(ValuationInputs, ThresholdTable)> {
    match &options.input {
        Some(path) => {
            let file = load_inputs(path)
                .wrap_err_with(|| format!("Failed to load inputs from {}", path.display()))?;
            Ok(file.into_parts())
        }
        None => {
            tracing::debug!("no inputs file given, using defaults");
            Ok(ValuationFile::default().into_parts())
        }
    }
}
