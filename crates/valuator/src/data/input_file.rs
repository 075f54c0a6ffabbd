//! YAML inputs file
//!
//! Every section and field is optional; anything omitted takes its default.
//!
//! ```yaml
//! value:
//!   current_price: 25.0
//!   eps: 2.5
//! growth:
//!   wacc: 0.11
//! thresholds:
//!   price_to_book:
//!     buy: { below: 0.9 }
//!     sell: { above: 2.5 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use valuator_core::model::{DividendInputs, GrowthInputs, ValueInputs};
use valuator_core::{InputError, ThresholdTable, ValuationInputs};

use crate::util::io::atomic_write;

/// Error types for inputs-file operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    /// The file parsed but holds values the engine rejects
    Invalid(InputError),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Invalid(err) => write!(f, "Invalid inputs: {}", err),
        }
    }
}

impl std::error::Error for StorageError {}

/// Contents of an inputs file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationFile {
    pub value: ValueInputs,
    pub dividend: DividendInputs,
    pub growth: GrowthInputs,
    pub thresholds: ThresholdTable,
}

impl ValuationFile {
    pub fn into_parts(self) -> (ValuationInputs, ThresholdTable) {
        let inputs = ValuationInputs {
            value: self.value,
            dividend: self.dividend,
            growth: self.growth,
        };
        (inputs, self.thresholds)
    }
}

/// Read and validate an inputs file
pub fn load_inputs(path: &Path) -> Result<ValuationFile, StorageError> {
    let content = fs::read_to_string(path).map_err(|e| {
        StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let file: ValuationFile = serde_saphyr::from_str(&content)
        .map_err(|e| StorageError::Parse(format!("Failed to parse YAML: {}", e)))?;

    file.value.validate().map_err(StorageError::Invalid)?;
    file.dividend.validate().map_err(StorageError::Invalid)?;
    file.growth.validate().map_err(StorageError::Invalid)?;
    file.thresholds.validate().map_err(StorageError::Invalid)?;

    tracing::debug!(path = %path.display(), "loaded inputs file");
    Ok(file)
}

pub fn save_inputs(path: &Path, file: &ValuationFile) -> Result<(), StorageError> {
    let yaml = serde_saphyr::to_string(file)
        .map_err(|e| StorageError::Serialize(format!("Failed to serialize inputs: {}", e)))?;

    atomic_write(path, &yaml).map_err(|e| {
        StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
    })?;

    tracing::info!(path = %path.display(), "wrote inputs file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inputs.yaml");

        save_inputs(&path, &ValuationFile::default()).unwrap();
        let loaded = load_inputs(&path).unwrap();
        assert_eq!(loaded, ValuationFile::default());
    }

    #[test]
    fn test_nan_cutoff_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inputs.yaml");
        fs::write(
            &path,
            "thresholds:\n  price_to_book:\n    buy:\n      below: .nan\n    sell:\n      above: 3.0\n",
        )
        .unwrap();

        let err = load_inputs(&path).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Invalid(InputError::NonFinite { field: "price_to_book", .. })
        ));
    }

    #[test]
    fn test_huge_period_count_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inputs.yaml");
        fs::write(&path, "dividend:\n  years_to_project: 4294967295\n").unwrap();

        let err = load_inputs(&path).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Invalid(InputError::InvalidCount { field: "years_to_project", .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_inputs(&temp_dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
