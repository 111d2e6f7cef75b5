//! Shared value types used by the configuration records and translators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// CMake build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum), value(rename_all = "verbatim"))]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    MinSizeRel,
    RelWithDebInfo,
}

impl BuildType {
    /// Accepted spellings, in the order they are shown to the user.
    pub const VARIANTS: [&'static str; 4] = ["Debug", "Release", "MinSizeRel", "RelWithDebInfo"];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::MinSizeRel => "MinSizeRel",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
        }
    }
}

impl FromStr for BuildType {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Debug" => Ok(BuildType::Debug),
            "Release" => Ok(BuildType::Release),
            "MinSizeRel" => Ok(BuildType::MinSizeRel),
            "RelWithDebInfo" => Ok(BuildType::RelWithDebInfo),
            _ => Err(SetupError::InvalidChoice {
                option: "buildtype",
                value: s.to_string(),
                expected: Self::VARIANTS.join(", "),
            }),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way switch for optional build features.
///
/// `Cache` leaves the value CMake already has in its cache untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum), value(rename_all = "verbatim"))]
pub enum Tristate {
    On,
    Off,
    #[default]
    Cache,
}

impl Tristate {
    pub fn as_str(self) -> &'static str {
        match self {
            Tristate::On => "On",
            Tristate::Off => "Off",
            Tristate::Cache => "Cache",
        }
    }

    /// The CMake boolean for this switch, `None` when the cache should win.
    pub fn cmake_value(self) -> Option<&'static str> {
        match self {
            Tristate::On => Some("ON"),
            Tristate::Off => Some("OFF"),
            Tristate::Cache => None,
        }
    }
}

impl fmt::Display for Tristate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CMake `ON`/`OFF` for a plain boolean.
pub fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}
