//! Install and uninstall flows for the sub-projects.

pub mod aggregate;
pub mod gate;
pub mod install;
pub mod uninstall;

pub use aggregate::{
    AggregateState, Aggregator, NestedAction, NestedRun, install_all_plan, uninstall_all_plan,
};
pub use gate::{Confirmation, ConfirmationGate, uninstall_target};
pub use install::{app_install_pipeline, install_app, install_lib, lib_install_pipeline};
pub use uninstall::{UninstallOutcome, uninstall, uninstall_pipeline};
