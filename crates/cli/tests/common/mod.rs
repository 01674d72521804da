//! Shared test utilities for profiler integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory rooted in a temporary home.
//! - Write the config file the command reads through `PROFILER_CFG`.
//!
//! Invariants / Assumptions:
//! - Every `PROFILER_*` variable from the host is cleared.
//! - The configured shell is `env`, so activation prints the exported environment.
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HOST_VARS: [&str; 16] = [
    "PROFILER_PROFILES_FOLDER",
    "PROFILER_REPOSITORY_PATH",
    "PROFILER_SHELL",
    "PROFILER_PRESERVE_PROFILE",
    "PROFILER_K8S_SWITCH_NAMESPACE",
    "PROFILER_NAMESPACE_KEY",
    "PROFILER_SSM_ENABLED",
    "PROFILER_SSM_REGION",
    "PROFILER_SSM_PARAMETER_TIER",
    "PROFILER_SSM_ENDPOINT",
    "PROFILER_CONSUL_ADDRESS",
    "PROFILER_CONSUL_TOKEN",
    "PROFILER_CONSUL_TOKEN_FILE",
    "PROFILER_TIMEOUT",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
];

/// A temporary home with a config file and a separate working directory.
pub struct Sandbox {
    pub home: TempDir,
    pub workdir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Sandbox whose config file also contains `extra` YAML lines.
    pub fn with_config(extra: &str) -> Self {
        let home = TempDir::new().unwrap();
        let workdir = TempDir::new().unwrap();
        let config = format!(
            "profilesFolder: {}\nshell: env\nk8sSwitchNamespace: false\ntimeoutSeconds: 5\n{extra}",
            home.path().join("profiles").display()
        );
        std::fs::write(home.path().join("profiler_cfg.yml"), config).unwrap();
        Self { home, workdir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.path().join("profiler_cfg.yml")
    }

    pub fn profiles(&self) -> PathBuf {
        self.home.path().join("profiles")
    }

    pub fn write_workdir_file(&self, name: &str, contents: &str) {
        std::fs::write(self.workdir.path().join(name), contents).unwrap();
    }

    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// Hermetic `profiler` command running in the sandbox working directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("profiler");
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG")
            .env_remove("AWS_SESSION_TOKEN")
            .env("PROFILER_CFG", self.config_path())
            .current_dir(self.workdir.path());
        cmd
    }
}
