//! Removal of installed files and build folders.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use super::gate::{Confirmation, ConfirmationGate, uninstall_target};
use crate::config::UninstallConfig;
use crate::context::SetupContext;
use crate::project::{Artifact, ProjectKind, SubProject};
use crate::runner::{CommandRunner, CommandSpec, Pipeline, PipelineReport};
use crate::translate::schemas_cache_dir;

/// How an uninstall ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// The user answered `no`; nothing was touched.
    Declined,
    Completed(PipelineReport),
}

fn remove(path: &Path, sudo: bool) -> CommandSpec {
    CommandSpec::new("rm")
        .args(["-r", "-f"])
        .path_arg(path)
        .elevated(sudo)
}

/// Entries of `dir` whose file name starts with `prefix`, sorted.
fn matching_entries(dir: &Path, prefix: &str) -> anyhow::Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list {}", dir.display()));
        }
    };

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            matches.push(entry.path());
        }
    }
    matches.sort();
    Ok(matches)
}

/// Paths one artifact expands to.
fn artifact_paths(
    artifact: &Artifact,
    target: &Path,
    schemas_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    Ok(match artifact {
        Artifact::Installed(rel) => vec![target.join(rel)],
        Artifact::InstalledMatching { dir, prefix } => matching_entries(&target.join(dir), prefix)?,
        Artifact::Schema(rel) => vec![schemas_dir.join(rel)],
    })
}

/// Removal steps for `project`.
///
/// Versioned shared objects are looked up on disk, so building the plan
/// reads the install directory.
pub fn uninstall_pipeline(
    ctx: &SetupContext,
    project: SubProject,
    cfg: &UninstallConfig,
) -> anyhow::Result<Pipeline> {
    let mut pipeline = Pipeline::new();

    if let Some(target) = uninstall_target(cfg, ctx.env()) {
        for artifact in project.artifacts() {
            for path in artifact_paths(artifact, &target, &cfg.schemas_dir)? {
                let name = format!("remove {}", path.display());
                pipeline = pipeline.command(name, true, remove(&path, cfg.sudo));
            }
        }
    }

    if project.kind() == ProjectKind::Library {
        pipeline = pipeline.command(
            "ldconfig",
            cfg.uninstall && cfg.sudo && ctx.env().dest_dir().is_none(),
            CommandSpec::new("ldconfig").elevated(true),
        );
    }

    pipeline = pipeline.command(
        "remove build dir",
        cfg.clean,
        remove(&ctx.build_dir(project), cfg.sudo),
    );

    if project.has_schemas() {
        let compile = CommandSpec::new("glib-compile-schemas")
            .path_arg(&schemas_cache_dir(&cfg.schemas_dir))
            .elevated(cfg.sudo);
        pipeline = pipeline.command("compile schemas", cfg.compile_schemas, compile);
    }

    Ok(pipeline)
}

/// Confirm, then remove everything `project` installed.
pub fn uninstall<R: BufRead, W: Write>(
    ctx: &SetupContext,
    project: SubProject,
    cfg: &UninstallConfig,
    gate: &mut ConfirmationGate<R, W>,
    runner: &mut dyn CommandRunner,
) -> anyhow::Result<UninstallOutcome> {
    if gate.confirm(cfg, ctx.env())? == Confirmation::Declined {
        info!(%project, "uninstall declined");
        return Ok(UninstallOutcome::Declined);
    }

    let report = uninstall_pipeline(ctx, project, cfg)?
        .run(runner)
        .with_context(|| format!("Failed to uninstall {project}"))?;
    Ok(UninstallOutcome::Completed(report))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::env::Environment;
    use crate::runner::RecordingRunner;

    fn ctx(env: Environment) -> SetupContext {
        SetupContext::new(PathBuf::from("/src/bt"), env, PathBuf::from("/bin/stmm-setup"))
    }

    fn no_prompt(install_dir: &Path) -> UninstallConfig {
        UninstallConfig::new(install_dir, "/usr").with_prompt(false)
    }

    #[test]
    fn test_app_removal_order() {
        let ctx = ctx(Environment::default());
        let plan = uninstall_pipeline(&ctx, SubProject::Btkb, &no_prompt(Path::new("/usr/local")))
            .unwrap();

        let names: Vec<_> = plan.enabled().map(|s| s.name.clone()).collect();
        assert_eq!(names.first().unwrap(), "remove /usr/local/bin/stmm-input-btkb");
        assert_eq!(
            names[8],
            "remove /usr/share/glib-2.0/schemas/com.efanomars.stmm-input-btkb.gschema.xml"
        );
        assert_eq!(names[9], "remove build dir");
        assert_eq!(names[10], "compile schemas");
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_lib_expands_shared_objects() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        for name in [
            "libstmm-input-gtk-bt.so",
            "libstmm-input-gtk-bt.so.0",
            "libstmm-input-gtk-bt.so.0.1.0",
            "libother.so",
        ] {
            fs::write(lib.join(name), b"").unwrap();
        }

        let ctx = ctx(Environment::default());
        let mut runner = RecordingRunner::new();
        let mut gate = ConfirmationGate::new(&b""[..], Vec::new());
        let outcome =
            uninstall(&ctx, SubProject::GtkBt, &no_prompt(tmp.path()), &mut gate, &mut runner)
                .unwrap();

        let lines = runner.command_lines();
        let so_removals = lines.iter().filter(|l| l.contains(".so")).count();
        assert_eq!(so_removals, 3);
        assert!(!lines.iter().any(|l| l.contains("libother")));
        assert!(lines.contains(&"sudo ldconfig".to_string()));
        assert!(matches!(outcome, UninstallOutcome::Completed(_)));
    }

    #[test]
    fn test_missing_lib_dir_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let ctx = ctx(Environment::default());
        let plan = uninstall_pipeline(&ctx, SubProject::GtkBt, &no_prompt(tmp.path())).unwrap();
        assert!(plan.enabled().all(|s| !s.name.contains(".so")));
    }

    #[test]
    fn test_declined_runs_nothing() {
        let ctx = ctx(Environment::default());
        let mut runner = RecordingRunner::new();
        let mut gate = ConfirmationGate::new(&b"no\n"[..], Vec::new());
        let cfg = UninstallConfig::new("/usr/local", "/usr");

        let outcome = uninstall(&ctx, SubProject::Btkb, &cfg, &mut gate, &mut runner).unwrap();

        assert_eq!(outcome, UninstallOutcome::Declined);
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_no_uninstall_still_compiles_schemas() {
        let ctx = ctx(Environment::new(Some("/stage".to_string()), None));
        let cfg = no_prompt(Path::new("/usr/local"))
            .with_uninstall(false)
            .with_clean(false);
        let mut runner = RecordingRunner::new();
        let mut gate = ConfirmationGate::new(&b""[..], Vec::new());

        uninstall(&ctx, SubProject::Btkb, &cfg, &mut gate, &mut runner).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["sudo glib-compile-schemas /usr/share/glib-2.0/schemas"]
        );
    }

    #[test]
    fn test_destdir_prefixes_removals_but_not_schemas() {
        let ctx = ctx(Environment::new(Some("/stage".to_string()), None));
        let cfg = no_prompt(Path::new("/usr/local")).with_sudo(false);

        let plan = uninstall_pipeline(&ctx, SubProject::Btkb, &cfg).unwrap();
        let mut runner = RecordingRunner::new();
        plan.run(&mut runner).unwrap();

        let lines = runner.command_lines();
        assert_eq!(lines[0], "rm -r -f /stage/usr/local/bin/stmm-input-btkb");
        assert!(lines.contains(
            &"rm -r -f /usr/share/glib-2.0/schemas/com.efanomars.stmm-input-btkb.gschema.xml"
                .to_string()
        ));
        assert!(lines.contains(&"rm -r -f /src/bt/stmm-input-btkb/build".to_string()));
    }

    #[test]
    fn test_staged_lib_uninstall_leaves_linker_cache() {
        let ctx = ctx(Environment::new(Some("/stage".to_string()), None));
        let plan = uninstall_pipeline(&ctx, SubProject::GtkBt, &no_prompt(Path::new("/usr/local")))
            .unwrap();

        assert!(plan.steps().iter().any(|s| s.name == "ldconfig"));
        assert!(plan.enabled().all(|s| s.name != "ldconfig"));
    }

    #[test]
    fn test_removal_failure_aborts() {
        let ctx = ctx(Environment::default());
        let mut runner = RecordingRunner::new().fail_on(&["rm"], 1);
        let mut gate = ConfirmationGate::new(&b""[..], Vec::new());
        let cfg = no_prompt(Path::new("/usr/local"));

        let err = uninstall(&ctx, SubProject::Btkb, &cfg, &mut gate, &mut runner).unwrap_err();

        assert!(err.to_string().contains("Failed to uninstall stmm-input-btkb"));
        assert_eq!(runner.invocations().len(), 1);
    }
}
