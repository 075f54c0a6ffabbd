pub mod input_file;
pub mod overrides;

pub use input_file::{StorageError, ValuationFile, load_inputs, save_inputs};
pub use overrides::{OverrideError, apply_overrides, parse_override};
