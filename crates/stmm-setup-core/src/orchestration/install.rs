//! Configure, build and install of one sub-project.

use anyhow::Context;

use crate::config::{AppInstallConfig, InstallSteps, LibInstallConfig};
use crate::context::SetupContext;
use crate::project::SubProject;
use crate::runner::{CommandRunner, CommandSpec, Pipeline, PipelineReport, StepAction};
use crate::translate::{
    app_configure_args, install_args, lib_configure_args, make_args, schemas_cache_dir,
};

fn build_steps(
    ctx: &SetupContext,
    project: SubProject,
    configure_args: Vec<String>,
    steps: InstallSteps,
    sudo: bool,
) -> Pipeline {
    let build_dir = ctx.build_dir(project);

    let configure = CommandSpec::new("cmake")
        .args(configure_args)
        .path_arg(&ctx.project_dir(project))
        .current_dir(&build_dir);
    let make = CommandSpec::new("make")
        .args(make_args(ctx.env()))
        .current_dir(&build_dir);
    let install = CommandSpec::new("make")
        .args(install_args(ctx.env()))
        .current_dir(&build_dir)
        .elevated(sudo);

    Pipeline::new()
        .step("create build dir", true, StepAction::CreateDir(build_dir.clone()))
        .command("configure", steps.configure, configure)
        .command("make", steps.make, make)
        .command("install", steps.install, install)
}

/// Steps installing the input backend library.
pub fn lib_install_pipeline(ctx: &SetupContext, cfg: &LibInstallConfig) -> Pipeline {
    let project = SubProject::GtkBt;
    // A staged install does not touch the system linker cache.
    let refresh_linker_cache = cfg.sudo && cfg.steps.install && ctx.env().dest_dir().is_none();

    build_steps(ctx, project, lib_configure_args(cfg), cfg.steps, cfg.sudo).command(
        "ldconfig",
        refresh_linker_cache,
        CommandSpec::new("ldconfig").elevated(true),
    )
}

/// Steps installing the keyboard application.
pub fn app_install_pipeline(ctx: &SetupContext, cfg: &AppInstallConfig) -> Pipeline {
    let project = SubProject::Btkb;
    let compile = CommandSpec::new("glib-compile-schemas")
        .path_arg(&schemas_cache_dir(&cfg.schemas_dir))
        .elevated(cfg.sudo);

    build_steps(ctx, project, app_configure_args(cfg), cfg.steps, cfg.sudo).command(
        "compile schemas",
        cfg.compile_schemas,
        compile,
    )
}

pub fn install_lib(
    ctx: &SetupContext,
    cfg: &LibInstallConfig,
    runner: &mut dyn CommandRunner,
) -> anyhow::Result<PipelineReport> {
    lib_install_pipeline(ctx, cfg)
        .run(runner)
        .with_context(|| format!("Failed to install {}", SubProject::GtkBt))
}

pub fn install_app(
    ctx: &SetupContext,
    cfg: &AppInstallConfig,
    runner: &mut dyn CommandRunner,
) -> anyhow::Result<PipelineReport> {
    app_install_pipeline(ctx, cfg)
        .run(runner)
        .with_context(|| format!("Failed to install {}", SubProject::Btkb))
}
