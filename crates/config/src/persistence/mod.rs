//! On-disk state owned by the configuration crate.
//!
//! Responsibilities:
//! - Resolve the default config file path and expand `~` in configured paths.
//! - Persist the profile registry (name → backend) as a JSON array.
//! - Provide the atomic write primitive shared by every file-backed store.
//!
//! Does NOT handle:
//! - Loading configuration values (see `loader`).
//! - Profile contents (owned by the adapters in `crates/client`).
//!
//! Invariants:
//! - Writes are atomic (temp file + rename) and never leave a partial file.
//! - Registry mutations happen under an exclusive advisory lock.

use std::path::Path;

mod path;
mod registry;

pub use path::{default_config_path, expand_tilde, home_dir};
pub use registry::{Registry, RegistryEntry, RegistryError};

/// Atomically replace `path` with `contents`.
///
/// Creates missing parent directories, writes a sibling temp file, then renames
/// it over the target.
pub fn atomic_write(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    std::fs::write(&temp_path, contents)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}
