//! Configuration records, one per subcommand.
//!
//! Records are produced once from the command line (through
//! [`OptionResolver`]) and only read afterwards. Values come from three
//! layers, highest first:
//! - command-line flags
//! - `stmm-setup.toml` in the source package root
//! - built-in defaults

pub mod parser;
pub mod paths;
pub mod resolve;
pub mod schema;
pub mod store;

use std::path::PathBuf;

use serde::Serialize;

use crate::types::{BuildType, Tristate};

pub use parser::{parse_defaults_toml, parse_defaults_toml_str};
pub use paths::resolve_dir;
pub use resolve::{DEFAULT_INSTALL_DIR, DEFAULT_SCHEMAS_DIR, OptionResolver};
pub use schema::SetupDefaults;
pub use store::{DEFAULTS_FILE_NAME, DefaultsStore};

/// Which of the build stages run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallSteps {
    pub configure: bool,
    pub make: bool,
    pub install: bool,
}

impl Default for InstallSteps {
    fn default() -> Self {
        Self {
            configure: true,
            make: true,
            install: true,
        }
    }
}

impl InstallSteps {
    /// Steps from the `--no-configure`, `--no-make` and `--no-install` flags.
    pub fn from_flags(no_configure: bool, no_make: bool, no_install: bool) -> Self {
        Self {
            configure: !no_configure,
            make: !no_make,
            install: !no_install,
        }
    }
}

/// Record for installing the input backend library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibInstallConfig {
    pub build_type: BuildType,
    pub static_lib: Tristate,
    pub tests: Tristate,
    pub docs: Tristate,
    /// Send documentation warnings to a log file
    pub docs_to_log: bool,
    /// Compile with the address sanitizer (meant for Debug builds)
    pub sanitize: bool,
    pub install_dir: PathBuf,
    pub steps: InstallSteps,
    pub sudo: bool,
}

impl LibInstallConfig {
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_type: BuildType::default(),
            static_lib: Tristate::default(),
            tests: Tristate::default(),
            docs: Tristate::default(),
            docs_to_log: false,
            sanitize: false,
            install_dir: install_dir.into(),
            steps: InstallSteps::default(),
            sudo: true,
        }
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn with_static_lib(mut self, static_lib: Tristate) -> Self {
        self.static_lib = static_lib;
        self
    }

    pub fn with_tests(mut self, tests: Tristate) -> Self {
        self.tests = tests;
        self
    }

    pub fn with_docs(mut self, docs: Tristate, to_log: bool) -> Self {
        self.docs = docs;
        self.docs_to_log = to_log;
        self
    }

    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn with_steps(mut self, steps: InstallSteps) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }
}

/// Record for installing the keyboard application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInstallConfig {
    pub build_type: BuildType,
    pub install_dir: PathBuf,
    /// Prefix under which the gsettings schema is installed
    pub schemas_dir: PathBuf,
    pub steps: InstallSteps,
    pub compile_schemas: bool,
    pub sudo: bool,
    pub icons: bool,
    /// Desktop launcher; ignored when `icons` is off
    pub launcher: bool,
    pub man: bool,
}

impl AppInstallConfig {
    pub fn new(install_dir: impl Into<PathBuf>, schemas_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_type: BuildType::default(),
            install_dir: install_dir.into(),
            schemas_dir: schemas_dir.into(),
            steps: InstallSteps::default(),
            compile_schemas: true,
            sudo: true,
            icons: true,
            launcher: true,
            man: true,
        }
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn with_steps(mut self, steps: InstallSteps) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_compile_schemas(mut self, compile: bool) -> Self {
        self.compile_schemas = compile;
        self
    }

    pub fn with_sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    pub fn with_icons(mut self, icons: bool) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_launcher(mut self, launcher: bool) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn with_man(mut self, man: bool) -> Self {
        self.man = man;
        self
    }

    /// Whether the launcher really gets installed.
    pub fn installs_launcher(&self) -> bool {
        self.icons && self.launcher
    }
}

/// Record for installing every sub-project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallAllConfig {
    pub build_type: BuildType,
    pub static_lib: Tristate,
    pub tests: Tristate,
    pub docs: Tristate,
    pub docs_to_log: bool,
    pub sanitize: bool,
    pub install_dir: PathBuf,
    pub schemas_dir: PathBuf,
    pub steps: InstallSteps,
    pub compile_schemas: bool,
    pub sudo: bool,
    pub man: bool,
}

impl InstallAllConfig {
    pub fn new(install_dir: impl Into<PathBuf>, schemas_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_type: BuildType::default(),
            static_lib: Tristate::default(),
            tests: Tristate::default(),
            docs: Tristate::default(),
            docs_to_log: false,
            sanitize: false,
            install_dir: install_dir.into(),
            schemas_dir: schemas_dir.into(),
            steps: InstallSteps::default(),
            compile_schemas: true,
            sudo: true,
            man: true,
        }
    }

    /// The part of this record the library install sees.
    pub fn lib_config(&self) -> LibInstallConfig {
        LibInstallConfig::new(self.install_dir.clone())
            .with_build_type(self.build_type)
            .with_static_lib(self.static_lib)
            .with_tests(self.tests)
            .with_docs(self.docs, self.docs_to_log)
            .with_sanitize(self.sanitize)
            .with_steps(self.steps)
            .with_sudo(self.sudo)
    }

    /// The part of this record the application install sees.
    pub fn app_config(&self) -> AppInstallConfig {
        AppInstallConfig::new(self.install_dir.clone(), self.schemas_dir.clone())
            .with_build_type(self.build_type)
            .with_steps(self.steps)
            .with_compile_schemas(self.compile_schemas)
            .with_sudo(self.sudo)
            .with_man(self.man)
    }
}

/// Record for any of the uninstall subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UninstallConfig {
    pub install_dir: PathBuf,
    pub schemas_dir: PathBuf,
    /// Remove the build folders
    pub clean: bool,
    /// Remove the installed files
    pub uninstall: bool,
    /// Ask for confirmation first
    pub prompt: bool,
    pub compile_schemas: bool,
    pub sudo: bool,
}

impl UninstallConfig {
    pub fn new(install_dir: impl Into<PathBuf>, schemas_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            schemas_dir: schemas_dir.into(),
            clean: true,
            uninstall: true,
            prompt: true,
            compile_schemas: true,
            sudo: true,
        }
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn with_uninstall(mut self, uninstall: bool) -> Self {
        self.uninstall = uninstall;
        self
    }

    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_compile_schemas(mut self, compile: bool) -> Self {
        self.compile_schemas = compile;
        self
    }

    pub fn with_sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }
}
