//! Runner that records invocations instead of executing them.
//!
//! Backs `--dry-run` and lets tests script failures.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::{CommandRunner, CommandSpec};
use crate::error::SetupError;

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Invocation {
    Command(CommandSpec),
    CreateDir { path: PathBuf },
}

#[derive(Debug, Clone)]
struct ScriptedFailure {
    tokens: Vec<String>,
    code: i32,
}

#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Vec<Invocation>,
    failures: Vec<ScriptedFailure>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command starting with `tokens` exit with `code`.
    ///
    /// The failing call is still recorded.
    pub fn fail_on(mut self, tokens: &[&str], code: i32) -> Self {
        self.failures.push(ScriptedFailure {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            code,
        });
        self
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    pub fn into_invocations(self) -> Vec<Invocation> {
        self.invocations
    }

    /// Recorded commands, created directories left out.
    pub fn commands(&self) -> Vec<&CommandSpec> {
        self.invocations
            .iter()
            .filter_map(|i| match i {
                Invocation::Command(spec) => Some(spec),
                Invocation::CreateDir { .. } => None,
            })
            .collect()
    }

    /// Recorded commands rendered as strings.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, spec: &CommandSpec) -> anyhow::Result<()> {
        info!(command = %spec, "would run");
        self.invocations.push(Invocation::Command(spec.clone()));

        let tokens_match = |f: &&ScriptedFailure| {
            let tokens: Vec<&str> = f.tokens.iter().map(String::as_str).collect();
            spec.starts_with(&tokens)
        };
        if let Some(failure) = self.failures.iter().find(tokens_match) {
            return Err(SetupError::CommandFailed {
                command: spec.to_string(),
                code: Some(failure.code),
            }
            .into());
        }
        Ok(())
    }

    fn ensure_dir(&mut self, dir: &Path) -> anyhow::Result<()> {
        self.invocations.push(Invocation::CreateDir {
            path: dir.to_path_buf(),
        });
        Ok(())
    }
}
