//! Activation: record, export, hook, then replace the process with a shell.
//!
//! Responsibilities:
//! - Write the activation record (`export NAME="VALUE"` per variable).
//! - Export every merged variable into the current process environment.
//! - Run the namespace hook for its trigger variable.
//! - Remove the record unless it is preserved, then hand over to the shell.
//!
//! Does NOT handle:
//! - Discovering or merging sources (see `sources` and `merge`).
//!
//! Invariants:
//! - Every variable is checked before the record is written, so an
//!   unexportable name aborts activation with no side effects.
//! - The record is fully written before any variable is exported.
//! - Hook failures are logged and never stop activation.
//! - Process replacement is the last step and only happens through `ProcessReplacer`.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use profiler_client::{Variables, check_exportable};
use profiler_config::{Config, NamespaceHookConfig};
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};

/// Replaces the running process with another program.
pub trait ProcessReplacer {
    /// Replace the process with `program`, passing `arg0` as `argv[0]` and
    /// inheriting the environment.
    ///
    /// A real replacement never returns on success; implementations that
    /// only record the request return `Ok(())`.
    fn replace(&self, program: &Path, arg0: &str) -> io::Result<()>;
}

/// `execvp`-style replacement.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecReplacer;

impl ProcessReplacer for ExecReplacer {
    #[cfg(unix)]
    fn replace(&self, program: &Path, arg0: &str) -> io::Result<()> {
        use std::os::unix::process::CommandExt;
        Err(Command::new(program).arg0(arg0).exec())
    }

    #[cfg(not(unix))]
    fn replace(&self, _program: &Path, _arg0: &str) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "process replacement requires a Unix platform",
        ))
    }
}

/// Side effect run when the trigger variable is activated.
pub trait NamespaceHook {
    fn switch_namespace(&self, namespace: &str) -> io::Result<()>;
}

/// Switches the current kubectl context's namespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct KubectlNamespaceHook;

impl NamespaceHook for KubectlNamespaceHook {
    fn switch_namespace(&self, namespace: &str) -> io::Result<()> {
        let output = Command::new("kubectl")
            .args(["config", "set-context", "--current"])
            .arg(format!("--namespace={namespace}"))
            .output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(io::Error::other(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// The configuration slice activation needs.
#[derive(Debug, Clone)]
pub struct ActivationSettings {
    pub record_path: PathBuf,
    pub shell: String,
    pub preserve_record: bool,
    pub namespace_hook: NamespaceHookConfig,
}

impl ActivationSettings {
    /// Settings for activating in `dir`.
    pub fn from_config(config: &Config, dir: &Path) -> Self {
        Self {
            record_path: dir.join(config.activation_record_name()),
            shell: config.shell.clone(),
            preserve_record: config.preserve_profile,
            namespace_hook: config.namespace_hook.clone(),
        }
    }
}

/// Applies a merged environment and hands over to the shell.
pub struct ActivationEngine<R = ExecReplacer, H = KubectlNamespaceHook> {
    settings: ActivationSettings,
    replacer: R,
    hook: H,
}

impl ActivationEngine {
    /// Engine that really execs and runs kubectl.
    pub fn system(settings: ActivationSettings) -> Self {
        Self::new(settings, ExecReplacer, KubectlNamespaceHook)
    }
}

impl<R: ProcessReplacer, H: NamespaceHook> ActivationEngine<R, H> {
    pub fn new(settings: ActivationSettings, replacer: R, hook: H) -> Self {
        Self {
            settings,
            replacer,
            hook,
        }
    }

    /// Activate `env`. With a real replacer this only returns on failure.
    pub fn activate(&self, env: &Variables) -> Result<()> {
        for (key, value) in env.iter() {
            check_exportable(key, value).map_err(|issue| EngineError::InvalidVariable {
                key: key.to_string(),
                issue,
            })?;
        }

        let record = &self.settings.record_path;
        write_record(record, env)?;

        for (key, value) in env.iter() {
            // SAFETY: activation runs after every backend call has completed and
            // nothing else in the process reads the environment concurrently.
            // Keys and values were checked above, so `set_var` cannot panic.
            unsafe { std::env::set_var(key, value) };
            self.run_hook(key, value);
        }

        if !self.settings.preserve_record {
            std::fs::remove_file(record).map_err(|source| EngineError::Record {
                path: record.clone(),
                source,
            })?;
            debug!(path = %record.display(), "Removed activation record");
        }

        let shell = resolve_shell(&self.settings.shell)?;
        info!(shell = %shell.display(), variables = env.len(), "Activating environment");
        self.replacer
            .replace(&shell, &self.settings.shell)
            .map_err(|source| EngineError::Exec {
                shell: self.settings.shell.clone(),
                source,
            })
    }

    fn run_hook(&self, key: &str, value: &str) {
        let hook = &self.settings.namespace_hook;
        if !hook.enabled || key != hook.key || value.is_empty() {
            return;
        }
        match self.hook.switch_namespace(value) {
            Ok(()) => info!(namespace = value, "Switched Kubernetes namespace"),
            Err(e) => warn!(namespace = value, error = %e, "Namespace switch failed"),
        }
    }
}

/// Render the activation record.
pub fn render_record(env: &Variables) -> String {
    let mut out = String::new();
    for (key, value) in env.iter() {
        out.push_str("export ");
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_double_quoted(value));
        out.push_str("\"\n");
    }
    out
}

fn escape_double_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn write_record(path: &Path, env: &Variables) -> Result<()> {
    std::fs::write(path, render_record(env)).map_err(|source| EngineError::Record {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Wrote activation record");
    Ok(())
}

/// Locate `shell`: paths are used as given, bare names are searched on `PATH`.
pub fn resolve_shell(shell: &str) -> Result<PathBuf> {
    if shell.contains(std::path::MAIN_SEPARATOR) || shell.contains('/') {
        return Ok(PathBuf::from(shell));
    }
    let path = std::env::var_os("PATH").ok_or_else(|| EngineError::ShellNotFound(shell.to_string()))?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(shell))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| EngineError::ShellNotFound(shell.to_string()))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_escapes_shell_metacharacters() {
        let env: Variables = [("A", "plain"), ("B", r#"say "hi" $HOME \o/"#)]
            .into_iter()
            .collect();
        assert_eq!(
            render_record(&env),
            "export A=\"plain\"\nexport B=\"say \\\"hi\\\" \\$HOME \\\\o/\"\n"
        );
    }

    #[test]
    fn test_resolve_shell_keeps_paths() {
        assert_eq!(
            resolve_shell("/bin/zsh").unwrap(),
            PathBuf::from("/bin/zsh")
        );
        assert_eq!(
            resolve_shell("./local/sh").unwrap(),
            PathBuf::from("./local/sh")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_shell_searches_path() {
        let resolved = resolve_shell("sh").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("sh"));
    }

    #[test]
    fn test_unknown_shell_is_not_found() {
        assert!(matches!(
            resolve_shell("definitely-not-a-shell-xyz"),
            Err(EngineError::ShellNotFound(_))
        ));
    }
}
