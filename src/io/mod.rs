pub mod walker;

pub use walker::{find_source_files, FileWalker, SOURCE_EXTENSIONS};

use crate::errors::{FlogError, Result};
use std::fs;
use std::path::Path;

/// Read a source unit, attaching the path to any failure.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| FlogError::io(e.to_string(), path))
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| FlogError::io(e.to_string(), path))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| FlogError::io(e.to_string(), path))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("subdirs").join("out.json");
        write_file(&nested, "{}").unwrap();
        assert_eq!(fs::read_to_string(&nested).unwrap(), "{}");
    }

    #[test]
    fn test_read_missing_source_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.js");
        let err = read_source(&missing).unwrap_err();
        assert_eq!(err.category(), "io");
        assert!(err.to_string().contains("missing.js"));
    }
}
