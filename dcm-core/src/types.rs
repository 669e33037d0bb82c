//! Domain types for compose project management.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Everything that lands in the managed store is serializable via serde + serde_yaml.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Name of a discovered project: the base name of its containing directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// User-chosen handle for a managed project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alias(pub String);

impl Alias {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Alias {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Alias {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The compose definition file that marks a directory as a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComposeFile {
    #[serde(rename = "docker-compose.yml")]
    Yml,
    #[serde(rename = "docker-compose.yaml")]
    Yaml,
}

impl ComposeFile {
    /// Every recognized marker filename, in match priority order.
    pub const ALL: [ComposeFile; 2] = [ComposeFile::Yml, ComposeFile::Yaml];

    pub fn file_name(self) -> &'static str {
        match self {
            ComposeFile::Yml => "docker-compose.yml",
            ComposeFile::Yaml => "docker-compose.yaml",
        }
    }

    /// Exact, case-sensitive match against a directory entry name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.file_name() == name)
    }
}

impl fmt::Display for ComposeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// What a caller wants done to one or more projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    List,
    Start,
    Stop,
    Status,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::List => write!(f, "list"),
            ActionType::Start => write!(f, "start"),
            ActionType::Stop => write!(f, "stop"),
            ActionType::Status => write!(f, "status"),
        }
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(ActionType::List),
            "start" => Ok(ActionType::Start),
            "stop" => Ok(ActionType::Stop),
            "status" => Ok(ActionType::Status),
            other => Err(format!(
                "unknown action '{other}'; expected: list, start, stop, status"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A directory containing a recognized compose file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub name: ProjectName,
    /// Directory holding the compose file; external commands run here.
    pub path: PathBuf,
    pub file: ComposeFile,
}

impl Project {
    pub fn new(name: impl Into<ProjectName>, path: impl Into<PathBuf>, file: ComposeFile) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            file,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.path
    }

    /// `path/file`
    pub fn compose_path(&self) -> PathBuf {
        self.path.join(self.file.file_name())
    }
}

/// A project saved under an alias in the managed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedProject {
    pub alias: Alias,
    pub project: Project,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
