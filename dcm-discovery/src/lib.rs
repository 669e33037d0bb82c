//! Compose project discovery for `dcm-discovery`.
//!
//! `discover(root)` walks the tree under `root` in pre-order, visiting entries
//! in file-name order within each directory, and reports one [`Project`] per
//! compose file found. Directories whose name starts with `.` or `#` are pruned
//! along with everything beneath them.
//!
//! Only a failure on `root` itself is fatal. Unreadable subdirectories, broken
//! links and similar per-entry errors are skipped; a partial scan beats none.
//!
//! A directory holding both `docker-compose.yml` and `docker-compose.yaml`
//! yields two projects with the same name and path. This is left as is.

use std::path::{Path, PathBuf};

use dcm_core::types::{ComposeFile, Project, ProjectName};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors from project discovery. Only the root can produce one.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot read root path {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root path {path} is not a directory")]
    NotADirectory { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Find every compose project beneath `root`, in traversal order.
pub fn discover(root: &Path) -> Result<Vec<Project>, DiscoveryError> {
    let meta = std::fs::metadata(root).map_err(|e| DiscoveryError::Root {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(DiscoveryError::NotADirectory { path: root.to_path_buf() });
    }
    // Surface an unreadable root here; the walker would only report it as an entry error.
    std::fs::read_dir(root).map_err(|e| DiscoveryError::Root {
        path: root.to_path_buf(),
        source: e,
    })?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e));

    let mut projects = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if let Some(project) = project_for(&entry) {
            tracing::debug!(name = %project.name, path = %project.path.display(), "found project");
            projects.push(project);
        }
    }
    Ok(projects)
}

// ---------------------------------------------------------------------------
// Entry rules
// ---------------------------------------------------------------------------

/// Hidden (`.`) and temp (`#`) directories below the root are skipped whole.
fn is_pruned(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('#')
}

fn project_for(entry: &DirEntry) -> Option<Project> {
    let file = ComposeFile::from_file_name(entry.file_name().to_str()?)?;
    if !is_regular_file(entry) {
        return None;
    }
    let dir = entry.path().parent()?;
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned());
    Some(Project {
        name: ProjectName::from(name),
        path: dir.to_path_buf(),
        file,
    })
}

/// Regular files, or links that resolve to one.
fn is_regular_file(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    if ft.is_file() {
        return true;
    }
    ft.is_symlink() && entry.path().is_file()
}
