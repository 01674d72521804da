//! End-to-end activation tests. The sandbox shell is `env`, so the replaced
//! process prints the environment it inherited.

mod common;

use common::Sandbox;
use predicates::prelude::*;

#[test]
fn test_use_exports_profile_variables() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "demo", "FOO=bar"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["use", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FOO=bar"))
        .stdout(predicate::str::contains("profile_name=demo"));

    let record = std::fs::read_to_string(sandbox.workdir().join(".profiler")).unwrap();
    assert!(record.contains("export FOO=\"bar\""));
}

#[test]
fn test_envrc_overrides_profile() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["add", "demo", "A=1"]).assert().success();
    sandbox.write_workdir_file(".envrc", "export A=2\n");

    sandbox
        .cmd()
        .args(["use", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A=2"))
        .stdout(predicate::str::contains("A=1").not());
}

#[test]
fn test_bare_invocation_reuses_record_and_ambient_files() {
    let sandbox = Sandbox::new();
    sandbox.write_workdir_file(".profiler", "export profile_name=\"demo\"\n");
    sandbox.write_workdir_file(".env.yml", "FROM_YAML: yes-yaml\n");

    sandbox
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("profile_name=demo"))
        .stdout(predicate::str::contains("FROM_YAML=yes-yaml"));
}

#[test]
fn test_record_removed_when_not_preserved() {
    let sandbox = Sandbox::with_config("preserveProfile: false\n");
    sandbox.cmd().args(["add", "demo", "A=1"]).assert().success();

    sandbox
        .cmd()
        .args(["use", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A=1"));
    assert!(!sandbox.workdir().join(".profiler").exists());
}

#[test]
fn test_env_override_of_shell() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["add", "demo"]).assert().success();

    sandbox
        .cmd()
        .env("PROFILER_SHELL", "profiler-test-missing-shell")
        .args(["use", "demo"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("profiler-test-missing-shell"));
}
