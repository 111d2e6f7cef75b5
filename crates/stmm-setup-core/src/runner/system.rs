//! Runner that spawns real processes.

use std::path::Path;
use std::process::Command;

use anyhow::Context;
use tracing::{debug, info};

use super::{CommandRunner, CommandSpec};
use crate::error::SetupError;

/// Runs each command to completion with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> anyhow::Result<()> {
        let argv = spec.argv();
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("Empty command"))?;

        info!(command = %spec, "running");

        let mut command = Command::new(program);
        command.args(args).envs(&spec.env);
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }

        let status = command.status().map_err(|source| SetupError::Spawn {
            command: spec.to_string(),
            source,
        })?;

        if !status.success() {
            return Err(SetupError::CommandFailed {
                command: spec.to_string(),
                code: status.code(),
            }
            .into());
        }

        debug!(command = %spec, "finished");
        Ok(())
    }

    fn ensure_dir(&mut self, dir: &Path) -> anyhow::Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        info!(dir = %dir.display(), "creating directory");
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))
    }
}
