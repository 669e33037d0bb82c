//! Compose orchestration engine: command boundary, single-project start/stop/status,
//! and concurrent bulk start/stop under a shared deadline.

pub mod bulk;
pub mod config;
mod error;
pub mod orchestrator;
pub mod runner;

pub use bulk::{BulkAction, Deadline};
pub use config::{ComposeTool, EngineConfig};
pub use error::{ActionError, CommandError, RunError, StatusError};
pub use orchestrator::{is_running_status, ActionResult, Orchestrator, ProjectStatus};
pub use runner::{CommandRunner, SystemRunner};
