//! Name-based lookup over discovered and managed projects.
//!
//! Matching ignores case. Project names match by substring; aliases prefer an
//! exact match and fall back to substring.

use crate::types::{ManagedProject, Project};

/// First project, in registry order, whose name contains `query` ignoring case.
pub fn find_by_name<'a>(projects: &'a [Project], query: &str) -> Option<&'a Project> {
    let needle = query.to_lowercase();
    projects
        .iter()
        .find(|p| p.name.as_str().to_lowercase().contains(&needle))
}

/// Resolve a managed project by alias.
///
/// An exact case-insensitive alias match always beats a substring match, even
/// when the substring match sits earlier in the list.
pub fn find_managed_by_alias<'a>(
    managed: &'a [ManagedProject],
    query: &str,
) -> Option<&'a ManagedProject> {
    let needle = query.to_lowercase();
    managed
        .iter()
        .find(|m| m.alias.as_str().to_lowercase() == needle)
        .or_else(|| {
            managed
                .iter()
                .find(|m| m.alias.as_str().to_lowercase().contains(&needle))
        })
}
