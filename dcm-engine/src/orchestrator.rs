//! Single-project start / stop / status against the compose tool.
//!
//! The orchestrator holds no state between calls. Every operation runs
//! synchronously on the caller's thread; concurrency only exists across
//! projects, in [`bulk`](crate::bulk).

use std::collections::BTreeMap;
use std::sync::Arc;

use dcm_core::types::Project;

use crate::bulk::BulkAction;
use crate::config::EngineConfig;
use crate::error::{ActionError, CommandError, RunError, StatusError};
use crate::runner::{CommandRunner, SystemRunner};

const UP: &[&str] = &["up", "-d"];
const DOWN: &[&str] = &["down"];
const LIST_CONTAINERS: &[&str] = &["ps", "-a", "--format", "json"];
const LIST_SERVICES: &[&str] = &["config", "--services"];
const STATUS_TEMPLATE: &str = "{{.Status}}";

/// Recorded for a service whose status query failed or printed nothing.
pub const NOT_RUNNING: &str = "not running";

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of one action against one project.
#[derive(Debug)]
pub struct ActionResult {
    pub project: Project,
    pub outcome: Result<String, ActionError>,
}

impl ActionResult {
    pub fn succeeded(project: Project, message: String) -> Self {
        Self {
            project,
            outcome: Ok(message),
        }
    }

    pub fn failed(project: Project, error: ActionError) -> Self {
        Self {
            project,
            outcome: Err(error),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn message(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&ActionError> {
        self.outcome.as_ref().err()
    }
}

/// Aggregate and per-service status of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectStatus {
    /// True when any service reports up/running.
    pub running: bool,
    /// Service name → status text as printed by the compose tool.
    pub services: BTreeMap<String, String>,
}

/// Whether a service status line means the service is alive.
pub fn is_running_status(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("up") || lower.contains("running")
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct Orchestrator {
    runner: Arc<dyn CommandRunner>,
    config: Arc<EngineConfig>,
}

impl Orchestrator {
    pub fn new(runner: Arc<dyn CommandRunner>, config: EngineConfig) -> Self {
        Self {
            runner,
            config: Arc::new(config),
        }
    }

    /// Orchestrator backed by real processes.
    pub fn system(config: EngineConfig) -> Self {
        Self::new(Arc::new(SystemRunner), config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `compose up -d` in the project directory.
    pub fn start(&self, project: &Project) -> ActionResult {
        self.apply(project, BulkAction::Start)
    }

    /// `compose down` in the project directory.
    pub fn stop(&self, project: &Project) -> ActionResult {
        self.apply(project, BulkAction::Stop)
    }

    pub(crate) fn apply(&self, project: &Project, action: BulkAction) -> ActionResult {
        let verb = match action {
            BulkAction::Start => UP,
            BulkAction::Stop => DOWN,
        };
        match self.compose(project, verb) {
            Ok(_) => ActionResult::succeeded(
                project.clone(),
                format!("Successfully {} {}", action.past_tense(), project.name),
            ),
            Err(source) => {
                tracing::warn!(project = %project.name, %action, error = %source, "compose command failed");
                let err = CommandError {
                    project: project.name.clone(),
                    action,
                    source,
                };
                ActionResult::failed(project.clone(), err.into())
            }
        }
    }

    /// Container list, then service list, then one status query per service.
    ///
    /// No containers at all (blank or `[]`) means not running and nothing else
    /// is queried. A failing or blank per-service query records
    /// [`NOT_RUNNING`] for that service and moves on to the next.
    pub fn status(&self, project: &Project) -> Result<ProjectStatus, StatusError> {
        let containers = self
            .compose(project, LIST_CONTAINERS)
            .map_err(|source| StatusError::ListContainers {
                project: project.name.clone(),
                source,
            })?;
        if no_containers(&containers) {
            return Ok(ProjectStatus::default());
        }

        let listing = self
            .compose(project, LIST_SERVICES)
            .map_err(|source| StatusError::ListServices {
                project: project.name.clone(),
                source,
            })?;
        let listing = String::from_utf8_lossy(&listing);
        let services: Vec<&str> = listing
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let mut status = ProjectStatus::default();
        for service in services {
            let text = match self.compose(project, &["ps", service, "--format", STATUS_TEMPLATE]) {
                Ok(out) => String::from_utf8_lossy(&out).trim().to_string(),
                Err(err) => {
                    tracing::debug!(project = %project.name, service, error = %err, "service status query failed");
                    String::new()
                }
            };
            if text.is_empty() {
                status.services.insert(service.to_string(), NOT_RUNNING.to_string());
                continue;
            }
            if is_running_status(&text) {
                status.running = true;
            }
            status.services.insert(service.to_string(), text);
        }
        Ok(status)
    }

    fn compose(&self, project: &Project, verb: &[&str]) -> Result<Vec<u8>, RunError> {
        let tool = &self.config.compose;
        let args = tool.args(verb);
        tracing::debug!(project = %project.name, command = %tool, args = ?verb, "compose");
        self.runner.run(project.dir(), tool.program(), &args)
    }
}

fn no_containers(output: &[u8]) -> bool {
    let text = String::from_utf8_lossy(output);
    let text = text.trim();
    text.is_empty() || text == "[]"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Up 2 hours", true)]
    #[case("up", true)]
    #[case("running", true)]
    #[case("Up 5 seconds (healthy)", true)]
    #[case("Exited (0) 3 minutes ago", false)]
    #[case("Created", false)]
    #[case("", false)]
    fn running_status_rule(#[case] text: &str, #[case] want: bool) {
        assert_eq!(is_running_status(text), want);
    }

    #[rstest]
    #[case("", true)]
    #[case("   \n", true)]
    #[case("[]", true)]
    #[case("[]\n", true)]
    #[case("[{\"Name\":\"web-1\"}]", false)]
    #[case("{\"Name\":\"web-1\"}\n", false)]
    fn empty_container_listing(#[case] output: &str, #[case] want: bool) {
        assert_eq!(no_containers(output.as_bytes()), want);
    }

    #[test]
    fn result_accessors_expose_one_side() {
        let p = Project::new("api", "/srv/api", dcm_core::ComposeFile::Yml);
        let ok = ActionResult::succeeded(p.clone(), "done".into());
        assert!(ok.success());
        assert_eq!(ok.message(), Some("done"));
        assert!(ok.error().is_none());

        let bad = ActionResult::failed(p, ActionError::Cancelled);
        assert!(!bad.success());
        assert!(bad.message().is_none());
        assert!(matches!(bad.error(), Some(ActionError::Cancelled)));
    }
}
