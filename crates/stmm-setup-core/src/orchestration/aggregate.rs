//! Aggregate commands that run each sub-project's own subcommand.
//!
//! Every sub-project runs as a nested process of the current executable,
//! in [`DEPENDENCY_ORDER`]. A failure stops the sequence; sub-projects
//! after the failing one are never started. In a dry run the children's
//! steps are expanded in place instead, so the recorded plan shows every
//! command the nested runs would execute.

use std::io::Write;

use anyhow::Context;
use tracing::info;

use super::install::{app_install_pipeline, lib_install_pipeline};
use super::uninstall::uninstall_pipeline;
use crate::config::{InstallAllConfig, UninstallConfig};
use crate::context::SetupContext;
use crate::project::{DEPENDENCY_ORDER, SubProject};
use crate::runner::{CommandRunner, CommandSpec, Pipeline};
use crate::translate::{install_app_args, install_lib_args, uninstall_args};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateState {
    NotStarted,
    Running(SubProject),
    Done,
    /// The nested run for this sub-project failed
    Aborted(SubProject),
}

/// What a nested run does.
#[derive(Debug, Clone)]
pub enum NestedAction {
    /// Start the sub-project's subcommand as a child process
    Spawn(CommandSpec),
    /// Run the sub-project's steps on the aggregate's own runner
    Inline(Pipeline),
}

/// One nested subcommand run.
#[derive(Debug, Clone)]
pub struct NestedRun {
    pub project: SubProject,
    /// `install` or `uninstall`, for messages
    pub verb: &'static str,
    pub banner: Option<String>,
    pub action: NestedAction,
}

impl NestedRun {
    /// The child command line, `None` when the steps run inline.
    pub fn spec(&self) -> Option<&CommandSpec> {
        match &self.action {
            NestedAction::Spawn(spec) => Some(spec),
            NestedAction::Inline(_) => None,
        }
    }
}

fn nested_command(ctx: &SetupContext, subcommand: &str, args: Vec<String>) -> CommandSpec {
    CommandSpec::new(ctx.self_exe().to_string_lossy())
        .arg("--source-dir")
        .path_arg(ctx.source_dir())
        .arg(subcommand)
        .args(args)
}

fn install_banner(project: SubProject, cfg: &InstallAllConfig) -> String {
    format!(
        "== install {} ==== {} == static {} ==",
        project.name(),
        cfg.build_type.as_str(),
        cfg.static_lib.as_str()
    )
}

fn install_action(
    ctx: &SetupContext,
    project: SubProject,
    cfg: &InstallAllConfig,
) -> NestedAction {
    if ctx.dry_run() {
        return NestedAction::Inline(match project {
            SubProject::GtkBt => lib_install_pipeline(ctx, &cfg.lib_config()),
            SubProject::Btkb => app_install_pipeline(ctx, &cfg.app_config()),
        });
    }
    let args = match project {
        SubProject::GtkBt => install_lib_args(&cfg.lib_config()),
        SubProject::Btkb => install_app_args(&cfg.app_config()),
    };
    NestedAction::Spawn(nested_command(ctx, project.install_subcommand(), args))
}

/// Nested runs for `install`, library first.
pub fn install_all_plan(ctx: &SetupContext, cfg: &InstallAllConfig) -> Vec<NestedRun> {
    DEPENDENCY_ORDER
        .iter()
        .map(|&project| NestedRun {
            project,
            verb: "install",
            banner: Some(install_banner(project, cfg)),
            action: install_action(ctx, project, cfg),
        })
        .collect()
}

/// Nested runs for `uninstall`, library first.
///
/// The caller confirms once; children always get `-y`. A dry run lists
/// installed files up front, which is why building the plan can fail.
pub fn uninstall_all_plan(
    ctx: &SetupContext,
    cfg: &UninstallConfig,
) -> anyhow::Result<Vec<NestedRun>> {
    DEPENDENCY_ORDER
        .iter()
        .map(|&project| {
            let action = if ctx.dry_run() {
                NestedAction::Inline(uninstall_pipeline(ctx, project, cfg)?)
            } else {
                NestedAction::Spawn(nested_command(
                    ctx,
                    project.uninstall_subcommand(),
                    uninstall_args(project, cfg),
                ))
            };
            Ok(NestedRun {
                project,
                verb: "uninstall",
                banner: None,
                action,
            })
        })
        .collect()
}

/// Drives a list of nested runs and tracks where it got to.
#[derive(Debug)]
pub struct Aggregator {
    state: AggregateState,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            state: AggregateState::NotStarted,
        }
    }

    pub fn state(&self) -> AggregateState {
        self.state
    }

    /// Run `plan` in order, writing banners to `out`.
    pub fn run(
        &mut self,
        plan: &[NestedRun],
        runner: &mut dyn CommandRunner,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        for nested in plan {
            self.state = AggregateState::Running(nested.project);
            if let Some(banner) = &nested.banner {
                writeln!(out, "{banner}")?;
            }
            info!(project = %nested.project, "{} started", nested.verb);

            let result = match &nested.action {
                NestedAction::Spawn(spec) => runner.run(spec),
                NestedAction::Inline(pipeline) => pipeline.run(runner).map(|_| ()),
            };
            if let Err(e) = result {
                self.state = AggregateState::Aborted(nested.project);
                return Err(e).with_context(|| format!("Failed to {} {}", nested.verb, nested.project));
            }
        }
        self.state = AggregateState::Done;
        Ok(())
    }
}
