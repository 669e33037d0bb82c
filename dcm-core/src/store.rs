//! YAML persistence for the managed project registry.
//!
//! # Storage layout
//!
//! ```text
//! ~/.config/dcm/
//!   config.yaml   (projects: [{alias, project: {name, path, file}}])
//! ```
//!
//! Load and save always take the store path explicitly. Callers without
//! `--config` resolve it with [`default_config_path`].

use std::path::{Path, PathBuf};

use crate::error::{io_err, StoreError};
use crate::managed::ManagedRegistry;

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.config/dcm/config.yaml`: pure, no I/O.
pub fn config_path_in(home: &Path) -> PathBuf {
    home.join(".config").join("dcm").join("config.yaml")
}

/// Default store location under the current user's home directory.
pub fn default_config_path() -> Result<PathBuf, StoreError> {
    Ok(config_path_in(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the managed registry from `path`.
///
/// A missing file is not an error: an empty store is written to `path` and
/// returned. Malformed YAML returns `StoreError::Parse` with path + line context.
pub fn load_at(path: &Path) -> Result<ManagedRegistry, StoreError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "managed store not found, creating empty store");
        let registry = ManagedRegistry::default();
        save_at(path, &registry)?;
        return Ok(registry);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(ManagedRegistry::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the registry to `path`.
///
/// Write flow: create parent dir → serialize → `.tmp` sibling → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem).
pub fn save_at(path: &Path, registry: &ManagedRegistry) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
        }
    }
    let tmp_path = tmp_sibling(path);

    let yaml = serde_yaml::to_string(registry)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    tracing::debug!(path = %path.display(), entries = registry.len(), "saved managed store");
    Ok(())
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, StoreError> {
    dirs::home_dir().ok_or(StoreError::HomeNotFound)
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "config.yaml".into());
    name.push(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
