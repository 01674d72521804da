//! Variable sources: the profile itself plus files discovered in the working directory.
//!
//! Responsibilities:
//! - Discover ambient files relative to a directory, in precedence order.
//! - Parse shell-style files (`*.env`, `.envrc`, `.profiler`) with `dotenvy`.
//! - Parse `.env.yml` as a YAML mapping.
//!
//! Does NOT handle:
//! - Merging (see `merge`).
//! - Touching the process environment (see `activation`).
//!
//! Invariants:
//! - Discovery order is: every `*.env` (sorted by file name), `.env.yml`, `.envrc`.
//! - A file that exists but fails to parse is an error; parse errors never echo line contents.

use std::fmt;
use std::path::{Path, PathBuf};

use profiler_client::{Variables, parse_yaml_variables};
use profiler_config::constants::ACTIVATION_RECORD_FILE_NAME;
use tracing::debug;

use crate::error::{EngineError, Result};

/// YAML ambient file.
pub const ENV_YAML_FILE_NAME: &str = ".env.yml";
/// Shell-style ambient file read last.
pub const ENVRC_FILE_NAME: &str = ".envrc";
/// Suffix of shell-style ambient files read first.
pub const DOTENV_SUFFIX: &str = ".env";

/// Where a source's variables came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    /// A stored profile, by name.
    Profile(String),
    /// A file in the working directory.
    File(PathBuf),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::Profile(name) => write!(f, "profile {name}"),
            SourceOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One ordered input to the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub origin: SourceOrigin,
    pub variables: Variables,
}

impl Source {
    pub fn profile(name: &str, variables: Variables) -> Self {
        Self {
            origin: SourceOrigin::Profile(name.to_string()),
            variables,
        }
    }
}

/// Find and parse every ambient file in `dir`, in precedence order.
pub fn discover_ambient_sources(dir: &Path) -> Result<Vec<Source>> {
    let mut sources = Vec::new();

    for path in dotenv_files(dir)? {
        sources.push(read_shell_file(&path)?);
    }

    let env_yaml = dir.join(ENV_YAML_FILE_NAME);
    if env_yaml.is_file() {
        sources.push(read_yaml_file(&env_yaml)?);
    }

    let envrc = dir.join(ENVRC_FILE_NAME);
    if envrc.is_file() {
        sources.push(read_shell_file(&envrc)?);
    }

    debug!(dir = %dir.display(), count = sources.len(), "Discovered ambient sources");
    Ok(sources)
}

/// The existing activation record in `dir`, if any.
pub fn read_activation_record(dir: &Path) -> Result<Option<Source>> {
    let path = dir.join(ACTIVATION_RECORD_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    read_shell_file(&path).map(Some)
}

/// `*.env` files in `dir` (including `.env` itself), sorted by file name.
fn dotenv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(EngineError::SourceRead {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| EngineError::SourceRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_dotenv = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(DOTENV_SUFFIX));
        if is_dotenv && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Parse a shell-style `KEY=value` / `export KEY="value"` file.
pub fn read_shell_file(path: &Path) -> Result<Source> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| shell_error(path, e))?;
    let mut variables = Variables::new();
    for item in iter {
        let (key, value) = item.map_err(|e| shell_error(path, e))?;
        variables.set(key, value);
    }
    debug!(path = %path.display(), count = variables.len(), "Read shell-style source");
    Ok(Source {
        origin: SourceOrigin::File(path.to_path_buf()),
        variables,
    })
}

fn read_yaml_file(path: &Path) -> Result<Source> {
    let raw = std::fs::read_to_string(path).map_err(|source| EngineError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let variables =
        parse_yaml_variables(&raw, &path.display().to_string()).map_err(|e| {
            EngineError::SourceParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
    debug!(path = %path.display(), count = variables.len(), "Read YAML source");
    Ok(Source {
        origin: SourceOrigin::File(path.to_path_buf()),
        variables,
    })
}

/// Map a dotenvy error without echoing the offending line.
fn shell_error(path: &Path, err: dotenvy::Error) -> EngineError {
    match err {
        dotenvy::Error::Io(source) => EngineError::SourceRead {
            path: path.to_path_buf(),
            source,
        },
        dotenvy::Error::LineParse(_, index) => EngineError::SourceParse {
            path: path.to_path_buf(),
            message: format!("invalid syntax at character {index}"),
        },
        _ => EngineError::SourceParse {
            path: path.to_path_buf(),
            message: "unrecognized syntax".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_empty_directory_has_no_sources() {
        let dir = TempDir::new().unwrap();
        assert!(discover_ambient_sources(dir.path()).unwrap().is_empty());
        assert!(read_activation_record(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_discovery_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".envrc", "export RC=1\n");
        write(dir.path(), ".env.yml", "YML: 1\n");
        write(dir.path(), "b.env", "B=1\n");
        write(dir.path(), "a.env", "A=1\n");
        write(dir.path(), ".env", "DOT=1\n");
        write(dir.path(), "notes.txt", "ignored\n");

        let origins: Vec<String> = discover_ambient_sources(dir.path())
            .unwrap()
            .into_iter()
            .map(|s| match s.origin {
                SourceOrigin::File(p) => p.file_name().unwrap().to_string_lossy().into_owned(),
                SourceOrigin::Profile(n) => n,
            })
            .collect();
        assert_eq!(origins, vec![".env", "a.env", "b.env", ".env.yml", ".envrc"]);
    }

    #[test]
    fn test_shell_file_accepts_export_quotes_and_comments() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            ".envrc",
            "# comment\nexport A=\"quoted value\"\nB=plain\nexport C='single'\n\nEMPTY=\n",
        );
        let source = read_shell_file(&dir.path().join(".envrc")).unwrap();
        assert_eq!(
            source.variables.iter().collect::<Vec<_>>(),
            vec![
                ("A", "quoted value"),
                ("B", "plain"),
                ("C", "single"),
                ("EMPTY", ""),
            ]
        );
    }

    #[test]
    fn test_malformed_shell_file_is_fatal_and_does_not_leak_contents() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.env", "SECRET_TOKEN hunter2\n");
        let err = discover_ambient_sources(dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::SourceParse { .. }));
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn test_malformed_yaml_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".env.yml", "- not\n- a mapping\n");
        assert!(matches!(
            discover_ambient_sources(dir.path()),
            Err(EngineError::SourceParse { .. })
        ));
    }

    #[test]
    fn test_yaml_preserves_empty_values() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".env.yml", "EMPTY:\nSET: x\n");
        let sources = discover_ambient_sources(dir.path()).unwrap();
        assert_eq!(sources[0].variables.get("EMPTY"), Some(""));
    }

    #[test]
    fn test_activation_record_is_read() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".profiler", "export profile_name=\"demo\"\n");
        let record = read_activation_record(dir.path()).unwrap().unwrap();
        assert_eq!(record.variables.get("profile_name"), Some("demo"));
    }
}
