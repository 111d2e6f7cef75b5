//! stmm-setup Core Library
//!
//! Install and uninstall orchestration for the stmm-input-bt source
//! package: option resolution, CMake flag translation, sequential command
//! execution and the uninstall confirmation gate.

pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod orchestration;
pub mod project;
pub mod runner;
pub mod translate;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{
        AppInstallConfig, DefaultsStore, InstallAllConfig, InstallSteps, LibInstallConfig,
        OptionResolver, SetupDefaults, UninstallConfig,
    };

    // Context
    pub use crate::context::SetupContext;
    pub use crate::env::Environment;
    pub use crate::error::SetupError;

    // Orchestration
    pub use crate::orchestration::{
        AggregateState, Aggregator, Confirmation, ConfirmationGate, UninstallOutcome,
    };

    // Projects
    pub use crate::project::{DEPENDENCY_ORDER, SubProject};

    // Runners
    pub use crate::runner::{
        CommandRunner, CommandSpec, Invocation, Pipeline, RecordingRunner, SystemRunner,
    };

    // Values
    pub use crate::types::{BuildType, Tristate};
}
