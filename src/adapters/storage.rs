use crate::core::Storage;
use crate::utils::error::{PayrollError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads input files from disk. Relative paths resolve against `base_path`;
/// absolute paths are used as given.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_to_string(&self, path: &str) -> Result<String> {
        let full_path = self.base_path.join(Path::new(path));
        fs::read_to_string(&full_path).map_err(|source| PayrollError::FileReadError {
            path: full_path,
            source,
        })
    }
}
