//! SystemRunner against real processes.

use stmm_setup_core::error::SetupError;
use stmm_setup_core::runner::{CommandRunner, CommandSpec, Pipeline, SystemRunner};
use tempfile::TempDir;

#[test]
fn system_runner_reports_exit_status() {
    let mut runner = SystemRunner::new();
    runner.run(&CommandSpec::new("true")).unwrap();

    let err = runner
        .run(&CommandSpec::new("sh").args(["-c", "exit 7"]))
        .unwrap_err();
    let setup = err.downcast_ref::<SetupError>().unwrap();
    assert_eq!(setup.exit_code(), 7);
}

#[test]
fn system_runner_missing_program_is_spawn_error() {
    let mut runner = SystemRunner::new();
    let err = runner
        .run(&CommandSpec::new("stmm-setup-no-such-program"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SetupError>(),
        Some(SetupError::Spawn { .. })
    ));
}

#[test]
fn system_runner_uses_working_dir_and_env() {
    let temp = TempDir::new().unwrap();
    let build = temp.path().join("proj").join("build");

    let pipeline = Pipeline::new()
        .step(
            "create build dir",
            true,
            stmm_setup_core::runner::StepAction::CreateDir(build.clone()),
        )
        .command(
            "write marker",
            true,
            CommandSpec::new("sh")
                .args(["-c", "printf %s \"$MARKER\" > marker"])
                .env("MARKER", "configured")
                .current_dir(&build),
        );

    let report = pipeline.run(&mut SystemRunner::new()).unwrap();

    assert_eq!(report.executed.len(), 2);
    let marker = std::fs::read_to_string(build.join("marker")).unwrap();
    assert_eq!(marker, "configured");
}
