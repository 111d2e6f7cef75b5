//! Translation of configuration records into external argument lists.
//!
//! Everything here is a pure function of its inputs.

pub mod cmake;
pub mod forward;

pub use cmake::{app_configure_args, install_args, lib_configure_args, make_args, schemas_cache_dir};
pub use forward::{install_app_args, install_lib_args, uninstall_args};
