use dcm_core::types::ProjectName;
use thiserror::Error;

use crate::bulk::BulkAction;

/// Failure of a single external command.
#[derive(Debug, Error)]
pub enum RunError {
    /// The program could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully. `output` is what it printed.
    #[error("{program} exited with {}", exit_label(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        output: Vec<u8>,
    },
}

impl RunError {
    /// Output captured before the failure; empty when the program never started.
    pub fn output(&self) -> &[u8] {
        match self {
            RunError::Spawn { .. } => &[],
            RunError::Exit { output, .. } => output,
        }
    }
}

/// A start/stop invocation that failed for one project.
#[derive(Debug, Error)]
#[error("error {} {project}: {source}: {}", .action.gerund(), captured(.source.output()))]
pub struct CommandError {
    pub project: ProjectName,
    pub action: BulkAction,
    #[source]
    pub source: RunError,
}

impl CommandError {
    pub fn output(&self) -> &[u8] {
        self.source.output()
    }
}

/// Why an orchestrated action produced a failed result.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("deadline exceeded before the operation started")]
    DeadlineExceeded,

    #[error("operation cancelled before it started")]
    Cancelled,

    /// The worker running this project's command died without reporting.
    #[error("worker aborted: {0}")]
    Aborted(String),
}

/// The container or service listing step of a status check failed.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("error checking status of {project}: {source}")]
    ListContainers {
        project: ProjectName,
        #[source]
        source: RunError,
    },

    #[error("error getting services of {project}: {source}")]
    ListServices {
        project: ProjectName,
        #[source]
        source: RunError,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (killed by signal)".to_string(),
    }
}

fn captured(output: &[u8]) -> String {
    String::from_utf8_lossy(output).trim().to_string()
}
