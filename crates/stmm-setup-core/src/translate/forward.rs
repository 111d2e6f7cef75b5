//! Flags forwarded by the aggregate commands to per-project subcommands.
//!
//! Each function returns the arguments that make the nested subcommand
//! rebuild the same record on its side.

use crate::config::{AppInstallConfig, LibInstallConfig, UninstallConfig};
use crate::project::SubProject;

fn flag(args: &mut Vec<String>, set: bool, name: &str) {
    if set {
        args.push(name.to_string());
    }
}

fn option(args: &mut Vec<String>, name: &str, value: impl AsRef<str>) {
    args.push(name.to_string());
    args.push(value.as_ref().to_string());
}

pub fn install_lib_args(cfg: &LibInstallConfig) -> Vec<String> {
    let mut args = Vec::new();
    option(&mut args, "-s", cfg.static_lib.as_str());
    option(&mut args, "-t", cfg.tests.as_str());
    option(&mut args, "-d", cfg.docs.as_str());
    flag(&mut args, cfg.docs_to_log, "--docs-to-log");
    option(&mut args, "-b", cfg.build_type.as_str());
    option(&mut args, "--installdir", cfg.install_dir.to_string_lossy());
    flag(&mut args, !cfg.steps.configure, "--no-configure");
    flag(&mut args, !cfg.steps.make, "--no-make");
    flag(&mut args, !cfg.steps.install, "--no-install");
    flag(&mut args, !cfg.sudo, "--no-sudo");
    flag(&mut args, cfg.sanitize, "--sanitize");
    args
}

pub fn install_app_args(cfg: &AppInstallConfig) -> Vec<String> {
    let mut args = Vec::new();
    option(&mut args, "-b", cfg.build_type.as_str());
    option(&mut args, "--installdir", cfg.install_dir.to_string_lossy());
    option(&mut args, "--schemasdir", cfg.schemas_dir.to_string_lossy());
    flag(&mut args, !cfg.steps.configure, "--no-configure");
    flag(&mut args, !cfg.steps.make, "--no-make");
    flag(&mut args, !cfg.steps.install, "--no-install");
    flag(&mut args, !cfg.compile_schemas, "--no-compile-schemas");
    flag(&mut args, !cfg.sudo, "--no-sudo");
    flag(&mut args, !cfg.icons, "--no-icons");
    flag(&mut args, !cfg.launcher, "--no-launcher");
    flag(&mut args, !cfg.man, "--no-man");
    args
}

/// Uninstall flags; the aggregate already asked, so `-y` is always passed.
pub fn uninstall_args(project: SubProject, cfg: &UninstallConfig) -> Vec<String> {
    let mut args = vec!["-y".to_string()];
    flag(&mut args, !cfg.clean, "--no-clean");
    flag(&mut args, !cfg.uninstall, "--no-uninstall");
    option(&mut args, "--installdir", cfg.install_dir.to_string_lossy());
    if project.has_schemas() {
        option(&mut args, "--schemasdir", cfg.schemas_dir.to_string_lossy());
        flag(&mut args, !cfg.compile_schemas, "--no-compile-schemas");
    }
    flag(&mut args, !cfg.sudo, "--no-sudo");
    args
}
