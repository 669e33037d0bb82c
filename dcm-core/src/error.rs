//! Error types for dcm-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Alias;

/// Failures loading or saving the managed project store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure, with the path that was being touched.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse managed store at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`: cannot locate `~/.config/dcm/`.
    #[error("cannot determine home directory; set $HOME or pass --config")]
    HomeNotFound,
}

/// Precondition violations when mutating the managed registry.
///
/// The registry is left untouched whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagedError {
    #[error("a project with alias '{0}' already exists")]
    DuplicateAlias(Alias),

    #[error("no project found with alias '{0}'")]
    MissingAlias(Alias),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}
