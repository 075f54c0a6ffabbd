//! `--set suite.field=value` command line overrides

use valuator_core::{InputError, ValuationInputs};

#[derive(Debug)]
pub enum OverrideError {
    /// Not of the form `suite.field=value`
    Syntax(String),
    InvalidNumber { assignment: String },
    Input(InputError),
}

impl std::fmt::Display for OverrideError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverrideError::Syntax(assignment) => {
                write!(f, "expected suite.field=value, got '{assignment}'")
            }
            OverrideError::InvalidNumber { assignment } => {
                write!(f, "value in '{assignment}' is not a number")
            }
            OverrideError::Input(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OverrideError {}

impl From<InputError> for OverrideError {
    fn from(err: InputError) -> Self {
        OverrideError::Input(err)
    }
}

/// Split `suite.field=value` into its path and number
pub fn parse_override(assignment: &str) -> Result<(&str, f64), OverrideError> {
    let (path, raw) = assignment
        .split_once('=')
        .ok_or_else(|| OverrideError::Syntax(assignment.to_string()))?;
    let path = path.trim();
    if path.is_empty() {
        return Err(OverrideError::Syntax(assignment.to_string()));
    }
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| OverrideError::InvalidNumber {
            assignment: assignment.to_string(),
        })?;
    Ok((path, value))
}

/// Apply overrides in order; a later assignment to the same field wins
pub fn apply_overrides(
    inputs: &mut ValuationInputs,
    assignments: &[String],
) -> Result<(), OverrideError> {
    for assignment in assignments {
        let (path, value) = parse_override(assignment)?;
        inputs.set(path, value)?;
        tracing::debug!(path, value, "applied input override");
    }
    Ok(())
}
