pub mod lifecycle;
pub mod list;
pub mod managed;
pub mod status;

use anyhow::{bail, Result};

use dcm_core::Project;

use crate::render;
use crate::settings::Settings;

/// Resolve one project by name.
///
/// Without `--path` the managed store is searched by alias and a miss is an
/// error. With `--path` the tree is discovered and a miss only prints a
/// notice, returning `None`.
pub(crate) fn resolve_single(settings: &Settings, query: &str) -> Result<Option<Project>> {
    if settings.root.is_none() {
        let managed = settings.load_managed()?;
        return match managed.find_by_alias(query) {
            Some(entry) => {
                tracing::debug!(alias = %entry.alias, project = %entry.project.name, "resolved managed project");
                Ok(Some(entry.project.clone()))
            }
            None => bail!("no managed project found with alias '{query}', use --path to search a directory"),
        };
    }

    let projects = settings.discover()?;
    if projects.is_empty() {
        render::no_projects();
        return Ok(None);
    }
    match dcm_core::find_by_name(&projects, query) {
        Some(project) => Ok(Some(project.clone())),
        None => {
            render::not_found(query);
            Ok(None)
        }
    }
}
