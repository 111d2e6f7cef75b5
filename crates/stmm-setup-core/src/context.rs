//! Per-invocation context shared by every operation.

use std::path::{Path, PathBuf};

use crate::env::Environment;
use crate::project::SubProject;

/// Everything an operation needs besides its configuration record.
///
/// Frontends build this once and pass it down. No operation changes the
/// process working directory; paths are derived from `source_dir`.
#[derive(Debug, Clone)]
pub struct SetupContext {
    source_dir: PathBuf,
    env: Environment,
    self_exe: PathBuf,
    dry_run: bool,
}

impl SetupContext {
    /// `self_exe` is the binary the aggregate commands re-invoke.
    pub fn new(source_dir: PathBuf, env: Environment, self_exe: PathBuf) -> Self {
        Self {
            source_dir,
            env,
            self_exe,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn self_exe(&self) -> &Path {
        &self.self_exe
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn project_dir(&self, project: SubProject) -> PathBuf {
        project.dir(&self.source_dir)
    }

    pub fn build_dir(&self, project: SubProject) -> PathBuf {
        project.build_dir(&self.source_dir)
    }
}
