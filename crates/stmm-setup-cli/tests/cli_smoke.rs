//! CLI smoke tests for stmm-setup.
//!
//! Everything that would touch the system runs with `--dry-run`; the few
//! real runs only create and remove folders inside a temp dir.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn setup_cmd(source: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("stmm-setup");
    cmd.env_remove("DESTDIR")
        .env_remove("STMM_MAKE_OPTIONS")
        .env_remove("RUST_LOG")
        .arg("--source-dir")
        .arg(source.path());
    cmd
}

// =============================================================================
// Help & usage errors
// =============================================================================

#[test]
fn help_lists_subcommands() {
    cargo_bin_cmd!("stmm-setup")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install-lib"))
        .stdout(predicate::str::contains("uninstall-btkb"));
}

#[test]
fn invalid_build_type_is_usage_error() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .args(["install", "-b", "Fast"])
        .assert()
        .code(2);
}

#[test]
fn unknown_flag_is_usage_error() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .args(["install-btkb", "--staticlib", "On"])
        .assert()
        .code(2);
}

#[test]
fn invalid_defaults_file_is_usage_error() {
    let source = TempDir::new().unwrap();
    std::fs::write(source.path().join("stmm-setup.toml"), "colour = \"blue\"\n").unwrap();

    setup_cmd(&source)
        .args(["--dry-run", "install-lib"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("stmm-setup.toml"));
}

// =============================================================================
// Dry runs
// =============================================================================

#[test]
fn dry_run_install_lib_shows_defines() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .args(["--dry-run", "install-lib", "-s", "On", "-b", "Debug", "--sanitize"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-D BUILD_STATIC_LIBS=ON"))
        .stdout(predicate::str::contains("-D CMAKE_BUILD_TYPE=Debug"))
        .stdout(predicate::str::contains("-D STMM_SANITIZE_ADDRESS=ON"))
        .stdout(predicate::str::contains("sudo make install"))
        .stdout(predicate::str::contains("sudo ldconfig"));

    assert!(!source.path().join("libstmm-input-gtk-bt").exists());
}

#[test]
fn dry_run_install_announces_both_projects() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .args(["--dry-run", "install", "-s", "Off"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "== install libstmm-input-gtk-bt ==== Release == static Off ==",
        ))
        .stdout(predicate::str::contains(
            "== install stmm-input-btkb ==== Release == static Off ==",
        ))
        .stdout(predicate::str::contains("install-btkb").not());
}

#[test]
fn dry_run_install_expands_nested_steps() {
    let source = TempDir::new().unwrap();
    let lib = source.path().join("libstmm-input-gtk-bt");
    setup_cmd(&source)
        .args(["--dry-run", "install", "-s", "On"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-D BUILD_STATIC_LIBS=ON"))
        .stdout(predicate::str::contains("sudo ldconfig"))
        .stdout(predicate::str::contains(
            "sudo glib-compile-schemas /usr/share/glib-2.0/schemas",
        ))
        .stdout(predicate::str::contains("--dry-run").not());

    assert!(!lib.exists());
}

#[test]
fn dry_run_make_options_and_destdir() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .env("DESTDIR", "/tmp/pkgroot")
        .env("STMM_MAKE_OPTIONS", "-j3")
        .args(["--dry-run", "install-btkb", "--no-compile-schemas"])
        .assert()
        .success()
        .stdout(predicate::str::contains("make -j3"))
        .stdout(predicate::str::contains("sudo make install DESTDIR=/tmp/pkgroot"))
        .stdout(predicate::str::contains("glib-compile-schemas").not());
}

#[test]
fn dry_run_json_is_parseable() {
    let source = TempDir::new().unwrap();
    let output = setup_cmd(&source)
        .args(["--dry-run", "--format", "json", "uninstall-btkb", "-y", "--no-sudo"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &plan[0];
    assert_eq!(first["kind"], "command");
    assert_eq!(first["program"], "rm");
    assert_eq!(first["elevated"], false);
    assert_eq!(first["args"][2], "/usr/local/bin/stmm-input-btkb");
}

#[test]
fn dry_run_json_with_prompt_keeps_stdout_parseable() {
    let source = TempDir::new().unwrap();
    let output = setup_cmd(&source)
        .args(["--dry-run", "--format", "json", "uninstall-btkb", "--no-sudo"])
        .write_stdin("yes\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan[0]["program"], "rm");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Are you sure? (yes/no) >"));
}

// =============================================================================
// Confirmation
// =============================================================================

#[test]
fn uninstall_declined_exits_zero_without_commands() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .args(["--dry-run", "uninstall-btkb"])
        .write_stdin("maybe\nNO\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Uninstall from dir: /usr/local   Remove build folders: true",
        ))
        .stdout(predicate::str::contains("Nothing to run."));
}

#[test]
fn uninstall_destdir_warning() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .env("DESTDIR", "/stage")
        .args(["--dry-run", "uninstall", "--installdir", "/opt/stmm"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: DESTDIR value is prepended to the installation dir!",
        ))
        .stdout(predicate::str::contains("Uninstall from dir: /stage/opt/stmm"));
}

#[test]
fn uninstall_closed_stdin_is_an_error() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .args(["--dry-run", "uninstall-lib"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("input closed"));
}

// =============================================================================
// Real runs inside a temp dir
// =============================================================================

#[test]
fn install_lib_with_every_step_off_creates_build_dir() {
    let source = TempDir::new().unwrap();
    setup_cmd(&source)
        .args([
            "install-lib",
            "--no-configure",
            "--no-make",
            "--no-install",
            "--no-sudo",
        ])
        .assert()
        .success();

    assert!(source.path().join("libstmm-input-gtk-bt/build").is_dir());
}

#[test]
fn uninstall_lib_clean_removes_build_dir() {
    let source = TempDir::new().unwrap();
    let build = source.path().join("libstmm-input-gtk-bt/build");
    std::fs::create_dir_all(&build).unwrap();
    std::fs::write(build.join("Makefile"), "all:\n").unwrap();

    setup_cmd(&source)
        .args(["uninstall-lib", "-y", "--no-uninstall", "--no-sudo"])
        .assert()
        .success();

    assert!(!build.exists());
}
