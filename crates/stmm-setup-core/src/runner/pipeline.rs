//! Linear pipeline of optional steps.

use std::path::PathBuf;

use tracing::debug;

use super::{CommandRunner, CommandSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Run(CommandSpec),
    CreateDir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub enabled: bool,
    pub action: StepAction,
}

/// Names of the steps that ran and of those that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub executed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Ordered steps; each one runs only when enabled and only after every
/// previous enabled step succeeded.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, name: impl Into<String>, enabled: bool, action: StepAction) -> Self {
        self.push(name, enabled, action);
        self
    }

    pub fn command(self, name: impl Into<String>, enabled: bool, spec: CommandSpec) -> Self {
        self.step(name, enabled, StepAction::Run(spec))
    }

    pub fn push(&mut self, name: impl Into<String>, enabled: bool, action: StepAction) {
        self.steps.push(Step {
            name: name.into(),
            enabled,
            action,
        });
    }

    pub fn extend(&mut self, other: Pipeline) {
        self.steps.extend(other.steps);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps that will run, in order.
    pub fn enabled(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.enabled)
    }

    /// Run every enabled step in order.
    ///
    /// The first failure is returned as is; completed steps are not undone.
    pub fn run(&self, runner: &mut dyn CommandRunner) -> anyhow::Result<PipelineReport> {
        let mut report = PipelineReport::default();
        for step in &self.steps {
            if !step.enabled {
                debug!(step = %step.name, "skipping");
                report.skipped.push(step.name.clone());
                continue;
            }
            match &step.action {
                StepAction::Run(spec) => runner.run(spec)?,
                StepAction::CreateDir(dir) => runner.ensure_dir(dir)?,
            }
            report.executed.push(step.name.clone());
        }
        Ok(report)
    }
}
