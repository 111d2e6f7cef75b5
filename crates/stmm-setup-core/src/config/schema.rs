//! Schema of the optional `stmm-setup.toml` defaults file.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::types::BuildType;

/// Defaults that replace the built-in ones when no flag is given.
///
/// ```toml
/// installdir = "~/.local"
/// schemasdir = "~/.local"
/// buildtype = "Debug"
/// sudo = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupDefaults {
    #[serde(default)]
    pub installdir: Option<String>,

    #[serde(default)]
    pub schemasdir: Option<String>,

    #[serde(default)]
    pub buildtype: Option<String>,

    /// Run privileged steps through sudo (built-in default: true)
    #[serde(default)]
    pub sudo: Option<bool>,
}

impl SetupDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(build_type) = &self.buildtype {
            build_type
                .parse::<BuildType>()
                .context("Invalid buildtype in defaults file")?;
        }
        for (key, value) in [("installdir", &self.installdir), ("schemasdir", &self.schemasdir)] {
            if value.as_deref().is_some_and(str::is_empty) {
                anyhow::bail!("'{}' must not be empty", key);
            }
        }
        Ok(())
    }
}
