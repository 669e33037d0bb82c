//! dcm core library: domain types, project lookup, managed registry, errors.
//!
//! - [`types`]: newtypes and domain structs
//! - [`lookup`]: fuzzy name / alias resolution
//! - [`managed`]: [`ManagedRegistry`] and its mutations
//! - [`store`]: load / save of the managed registry
//! - [`error`]: [`StoreError`], [`ManagedError`]

pub mod error;
pub mod lookup;
pub mod managed;
pub mod store;
pub mod types;

pub use error::{ManagedError, StoreError};
pub use lookup::{find_by_name, find_managed_by_alias};
pub use managed::ManagedRegistry;
pub use types::{ActionType, Alias, ComposeFile, ManagedProject, Project, ProjectName};
