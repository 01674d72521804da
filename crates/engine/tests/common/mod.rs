//! Shared helpers for engine integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use profiler_config::{Config, NamespaceHookConfig, SsmConfig};
use profiler_engine::{NamespaceHook, ProcessReplacer};

/// Config rooted entirely inside `home`.
pub fn test_config(home: &Path) -> Config {
    let profiles_folder = home.join(".profiles");
    Config {
        repository_path: profiles_folder.join(".repository.json"),
        profiles_folder,
        shell: "/bin/sh".to_string(),
        preserve_profile: true,
        namespace_hook: NamespaceHookConfig::default(),
        ssm: SsmConfig::default(),
        consul: None,
        timeout: Duration::from_secs(5),
    }
}

/// A replacement request, with the environment observed at that moment.
#[derive(Debug, Clone)]
pub struct Replacement {
    pub program: PathBuf,
    pub arg0: String,
    pub observed: Vec<(String, Option<String>)>,
    pub record_existed: bool,
}

/// Records replacement instead of exec'ing.
pub struct RecordingReplacer {
    watch: Vec<String>,
    record_path: PathBuf,
    pub calls: RefCell<Vec<Replacement>>,
}

impl RecordingReplacer {
    pub fn new(record_path: &Path, watch: &[&str]) -> Self {
        Self {
            watch: watch.iter().map(|s| s.to_string()).collect(),
            record_path: record_path.to_path_buf(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ProcessReplacer for &RecordingReplacer {
    fn replace(&self, program: &Path, arg0: &str) -> io::Result<()> {
        let observed = self
            .watch
            .iter()
            .map(|key| (key.clone(), std::env::var(key).ok()))
            .collect();
        self.calls.borrow_mut().push(Replacement {
            program: program.to_path_buf(),
            arg0: arg0.to_string(),
            observed,
            record_existed: self.record_path.exists(),
        });
        Ok(())
    }
}

/// Records namespace switches; optionally fails every call.
#[derive(Default)]
pub struct RecordingHook {
    pub fail: bool,
    pub namespaces: RefCell<Vec<String>>,
}

impl NamespaceHook for &RecordingHook {
    fn switch_namespace(&self, namespace: &str) -> io::Result<()> {
        self.namespaces.borrow_mut().push(namespace.to_string());
        if self.fail {
            Err(io::Error::other("kubectl: context not found"))
        } else {
            Ok(())
        }
    }
}
