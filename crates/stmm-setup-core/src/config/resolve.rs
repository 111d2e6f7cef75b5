//! Option resolution: flag value, then defaults file, then built-in default.

use std::path::{Path, PathBuf};

use super::SetupDefaults;
use super::paths::resolve_dir;
use crate::error::SetupError;
use crate::types::BuildType;

pub const DEFAULT_INSTALL_DIR: &str = "/usr/local";
pub const DEFAULT_SCHEMAS_DIR: &str = "/usr";

/// Resolves raw option values into normalized record fields.
#[derive(Debug, Clone)]
pub struct OptionResolver {
    defaults: SetupDefaults,
    home_dir: Option<PathBuf>,
    cwd: PathBuf,
}

impl OptionResolver {
    pub fn new(defaults: SetupDefaults, home_dir: Option<PathBuf>, cwd: PathBuf) -> Self {
        Self {
            defaults,
            home_dir,
            cwd,
        }
    }

    /// Resolver using the real home and working directories.
    pub fn with_defaults(defaults: SetupDefaults) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(defaults, dirs::home_dir(), cwd))
    }

    pub fn install_dir(&self, flag: Option<&str>) -> Result<PathBuf, SetupError> {
        let raw = flag
            .or(self.defaults.installdir.as_deref())
            .unwrap_or(DEFAULT_INSTALL_DIR);
        self.dir(raw)
    }

    pub fn schemas_dir(&self, flag: Option<&str>) -> Result<PathBuf, SetupError> {
        let raw = flag
            .or(self.defaults.schemasdir.as_deref())
            .unwrap_or(DEFAULT_SCHEMAS_DIR);
        self.dir(raw)
    }

    /// The flag wins; otherwise the defaults file, which may still hold a
    /// misspelled value.
    pub fn build_type(&self, flag: Option<BuildType>) -> Result<BuildType, SetupError> {
        match (flag, self.defaults.buildtype.as_deref()) {
            (Some(build_type), _) => Ok(build_type),
            (None, Some(raw)) => raw.parse(),
            (None, None) => Ok(BuildType::default()),
        }
    }

    /// `--no-sudo` always wins; otherwise the defaults file decides.
    pub fn sudo(&self, no_sudo: bool) -> bool {
        !no_sudo && self.defaults.sudo.unwrap_or(true)
    }

    /// Resolve any directory flag (used for `--source-dir`).
    pub fn dir(&self, raw: &str) -> Result<PathBuf, SetupError> {
        resolve_dir(raw, self.home_dir.as_deref(), &self.cwd)
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}
