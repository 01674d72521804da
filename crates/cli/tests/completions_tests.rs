//! Integration tests for the completions command.

mod common;

use common::Sandbox;
use predicates::prelude::*;

#[test]
fn test_completions_outputs_non_empty() {
    let sandbox = Sandbox::new();
    for shell in ["bash", "zsh", "fish", "powershell"] {
        sandbox
            .cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("profiler"));
    }
}

#[test]
fn test_completions_do_not_need_valid_config() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("PROFILER_TIMEOUT", "not-a-number")
        .args(["completions", "bash"])
        .assert()
        .success();
}
