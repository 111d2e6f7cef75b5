//! CMake and make argument vocabulary.

use std::path::{Path, PathBuf};

use crate::config::{AppInstallConfig, LibInstallConfig};
use crate::env::Environment;
use crate::project::SCHEMAS_SUBDIR;
use crate::types::{Tristate, on_off};

fn define(args: &mut Vec<String>, name: &str, value: &str) {
    args.push("-D".to_string());
    args.push(format!("{name}={value}"));
}

fn define_path(args: &mut Vec<String>, name: &str, value: &Path) {
    define(args, name, &value.to_string_lossy());
}

fn define_tristate(args: &mut Vec<String>, name: &str, value: Tristate) {
    if let Some(value) = value.cmake_value() {
        define(args, name, value);
    }
}

/// Configure defines for the input backend library.
pub fn lib_configure_args(cfg: &LibInstallConfig) -> Vec<String> {
    let mut args = Vec::new();
    define(&mut args, "CMAKE_BUILD_TYPE", cfg.build_type.as_str());
    define_path(&mut args, "CMAKE_INSTALL_PREFIX", &cfg.install_dir);
    define_tristate(&mut args, "BUILD_STATIC_LIBS", cfg.static_lib);
    define_tristate(&mut args, "BUILD_TESTING", cfg.tests);
    define_tristate(&mut args, "BUILD_DOCS", cfg.docs);
    define(&mut args, "BUILD_DOCS_WARNINGS_TO_LOG_FILE", on_off(cfg.docs_to_log));
    define(&mut args, "STMM_SANITIZE_ADDRESS", on_off(cfg.sanitize));
    args
}

/// Configure defines for the keyboard application.
pub fn app_configure_args(cfg: &AppInstallConfig) -> Vec<String> {
    let mut args = Vec::new();
    define(&mut args, "CMAKE_BUILD_TYPE", cfg.build_type.as_str());
    define_path(&mut args, "CMAKE_INSTALL_PREFIX", &cfg.install_dir);
    define_path(&mut args, "STMM_GSETTINGS_SCHEMA_INSTALL_PREFIX", &cfg.schemas_dir);
    define(&mut args, "STMM_INSTALL_ICONS", on_off(cfg.icons));
    define(&mut args, "STMM_INSTALL_LAUNCHER", on_off(cfg.installs_launcher()));
    define(&mut args, "STMM_INSTALL_MAN_PAGE", on_off(cfg.man));
    args
}

/// Arguments of the build step, `STMM_MAKE_OPTIONS` included.
pub fn make_args(env: &Environment) -> Vec<String> {
    env.make_options().to_vec()
}

/// Arguments of the install step.
pub fn install_args(env: &Environment) -> Vec<String> {
    let mut args = vec!["install".to_string()];
    if let Some(dest) = env.dest_dir() {
        args.push(format!("DESTDIR={dest}"));
    }
    args
}

/// Directory handed to `glib-compile-schemas`.
pub fn schemas_cache_dir(schemas_dir: &Path) -> PathBuf {
    schemas_dir.join(SCHEMAS_SUBDIR)
}
