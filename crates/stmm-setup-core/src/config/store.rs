//! Loads the defaults file from a source tree.

use std::path::{Path, PathBuf};

use super::{SetupDefaults, parser};
use crate::error::SetupError;

/// File name looked up in the source package root.
pub const DEFAULTS_FILE_NAME: &str = "stmm-setup.toml";

#[derive(Debug, Clone)]
pub struct DefaultsStore {
    path: PathBuf,
}

impl DefaultsStore {
    pub fn from_source_dir(source_dir: &Path) -> Self {
        Self {
            path: source_dir.join(DEFAULTS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the defaults, or the empty set when the file does not exist.
    ///
    /// A file that exists but does not parse is a usage error.
    pub fn load(&self) -> anyhow::Result<SetupDefaults> {
        if !self.path.exists() {
            return Ok(SetupDefaults::new());
        }
        tracing::debug!(path = %self.path.display(), "loading defaults file");
        parser::parse_defaults_toml(&self.path).map_err(|e| {
            SetupError::InvalidDefaults {
                path: self.path.clone(),
                message: e.root_cause().to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_empty_defaults() {
        let temp = TempDir::new().unwrap();
        let store = DefaultsStore::from_source_dir(temp.path());
        assert_eq!(store.load().unwrap(), SetupDefaults::new());
    }

    #[test]
    fn test_existing_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(DEFAULTS_FILE_NAME), "buildtype = \"MinSizeRel\"\n")
            .unwrap();

        let store = DefaultsStore::from_source_dir(temp.path());
        let defaults = store.load().unwrap();
        assert_eq!(defaults.buildtype.as_deref(), Some("MinSizeRel"));
    }

    #[test]
    fn test_invalid_file_is_a_usage_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(DEFAULTS_FILE_NAME), "buildtype = \"Fast\"\n").unwrap();

        let err = DefaultsStore::from_source_dir(temp.path()).load().unwrap_err();
        let setup = err.downcast_ref::<SetupError>().unwrap();
        assert_eq!(setup.exit_code(), 2);
        assert!(err.to_string().contains("Fast"));
    }
}
