//! I/O utility functions

use std::fs;
use std::io;
use std::path::Path;

/// Write content to a file atomically using write-then-rename.
///
/// A partially written inputs file is never left at `path`. Missing parent
/// directories are created.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("yaml.tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inputs.yaml");

        atomic_write(&path, "value:\n  eps: 2.5\n").unwrap();
        atomic_write(&path, "value:\n  eps: 3.0\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "value:\n  eps: 3.0\n");
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("company").join("inputs.yaml");

        atomic_write(&path, "growth:\n  wacc: 0.11\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "growth:\n  wacc: 0.11\n");
    }
}
