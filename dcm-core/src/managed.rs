//! In-memory managed project registry.
//!
//! This is the snapshot the store loads and saves. Mutations check their
//! preconditions first and leave the list untouched on failure.

use serde::{Deserialize, Serialize};

use crate::error::ManagedError;
use crate::lookup;
use crate::types::{Alias, ManagedProject, Project};

/// Root of the managed store YAML: `projects: [{alias, project}]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManagedRegistry {
    #[serde(default)]
    pub projects: Vec<ManagedProject>,
}

impl ManagedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `project` under `alias`.
    ///
    /// Fails with [`ManagedError::DuplicateAlias`] if the exact alias is taken.
    pub fn add(&mut self, project: Project, alias: impl Into<Alias>) -> Result<(), ManagedError> {
        let alias = alias.into();
        if self.projects.iter().any(|m| m.alias == alias) {
            return Err(ManagedError::DuplicateAlias(alias));
        }
        self.projects.push(ManagedProject { alias, project });
        Ok(())
    }

    /// Remove the entry whose alias equals `alias` exactly, returning it.
    pub fn remove(&mut self, alias: &str) -> Result<ManagedProject, ManagedError> {
        let idx = self
            .projects
            .iter()
            .position(|m| m.alias.as_str() == alias)
            .ok_or_else(|| ManagedError::MissingAlias(Alias::from(alias)))?;
        Ok(self.projects.remove(idx))
    }

    /// See [`lookup::find_managed_by_alias`].
    pub fn find_by_alias(&self, query: &str) -> Option<&ManagedProject> {
        lookup::find_managed_by_alias(&self.projects, query)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManagedProject> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
