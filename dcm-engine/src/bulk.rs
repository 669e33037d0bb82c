//! Concurrent start/stop across many projects.
//!
//! One task per project reports into an mpsc channel; the caller gets exactly
//! one [`ActionResult`] per input project, in completion order. Each unit checks
//! the shared [`Deadline`] once, on its blocking thread, right before it would
//! invoke the compose tool.
//! A command already running when the deadline passes is left to finish.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dcm_core::types::{ActionType, Project};
use tokio::sync::{mpsc, Semaphore};
use tokio::time::Instant;

use crate::error::ActionError;
use crate::orchestrator::{ActionResult, Orchestrator};

// ---------------------------------------------------------------------------
// BulkAction
// ---------------------------------------------------------------------------

/// The subset of [`ActionType`] that can be fanned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    Start,
    Stop,
}

impl BulkAction {
    pub fn gerund(self) -> &'static str {
        match self {
            BulkAction::Start => "starting",
            BulkAction::Stop => "stopping",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            BulkAction::Start => "started",
            BulkAction::Stop => "stopped",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&ActionType::from(*self), f)
    }
}

impl From<BulkAction> for ActionType {
    fn from(action: BulkAction) -> Self {
        match action {
            BulkAction::Start => ActionType::Start,
            BulkAction::Stop => ActionType::Stop,
        }
    }
}

impl TryFrom<ActionType> for BulkAction {
    type Error = ActionType;

    /// `List` and `Status` come back unchanged as the error.
    fn try_from(action: ActionType) -> Result<Self, Self::Error> {
        match action {
            ActionType::Start => Ok(BulkAction::Start),
            ActionType::Stop => Ok(BulkAction::Stop),
            other => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Point in time after which bulk units stop launching commands, plus a flag
/// that cancels the remaining units early. Clones share the flag.
#[derive(Debug, Clone)]
pub struct Deadline {
    at: Instant,
    cancelled: Arc<AtomicBool>,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Self {
            at,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// `Err` once cancelled or expired.
    pub fn check(&self) -> Result<(), ActionError> {
        if self.is_cancelled() {
            return Err(ActionError::Cancelled);
        }
        if Instant::now() >= self.at {
            return Err(ActionError::DeadlineExceeded);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fan-out
// ---------------------------------------------------------------------------

impl Orchestrator {
    /// Apply `action` to every project concurrently.
    ///
    /// Returns once all `projects.len()` results are in. Order is completion
    /// order, not input order. A failure on one project never affects another.
    pub async fn bulk_manage(
        &self,
        projects: &[Project],
        action: BulkAction,
        deadline: &Deadline,
    ) -> Vec<ActionResult> {
        if projects.is_empty() {
            return Vec::new();
        }
        tracing::info!(
            count = projects.len(),
            %action,
            max_parallel = ?self.config().max_parallel,
            remaining = ?deadline.remaining(),
            "dispatching bulk operation"
        );

        let limiter = self
            .config()
            .max_parallel
            .map(|n| Arc::new(Semaphore::new(n.get())));
        let (result_tx, mut result_rx) = mpsc::channel::<ActionResult>(projects.len());

        for project in projects.iter().cloned() {
            let result_tx = result_tx.clone();
            let orchestrator = self.clone();
            let deadline = deadline.clone();
            let limiter = limiter.clone();
            tokio::spawn(async move {
                // Held until this unit's result is sent.
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                let result = orchestrator.run_unit(project, action, &deadline).await;
                if result_tx.send(result).await.is_err() {
                    tracing::error!("bulk result channel closed before all units reported");
                }
            });
        }
        drop(result_tx);

        let mut results = Vec::with_capacity(projects.len());
        while let Some(result) = result_rx.recv().await {
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.success()).count();
        tracing::info!(%action, total = results.len(), failed, "bulk operation finished");
        results
    }

    async fn run_unit(
        &self,
        project: Project,
        action: BulkAction,
        deadline: &Deadline,
    ) -> ActionResult {
        let orchestrator = self.clone();
        let deadline = deadline.clone();
        let target = project.clone();
        // Checked on the blocking thread, so time spent queued for the pool counts.
        let unit = move || match deadline.check() {
            Ok(()) => orchestrator.apply(&target, action),
            Err(err) => {
                tracing::warn!(project = %target.name, %action, error = %err, "skipping project");
                ActionResult::failed(target, err)
            }
        };
        match tokio::task::spawn_blocking(unit).await {
            Ok(result) => result,
            Err(join_err) => ActionResult::failed(project, ActionError::Aborted(join_err.to_string())),
        }
    }
}
