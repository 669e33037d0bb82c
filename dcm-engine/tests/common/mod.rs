//! Deterministic `CommandRunner` fake shared by the engine integration tests.
//!
//! Replies are scripted per command line (`"docker compose up -d"`), optionally
//! narrowed to one working directory. Unscripted commands succeed with empty
//! output. Every call is recorded, and the peak number of concurrent calls is
//! tracked so fan-out limits can be asserted.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use dcm_core::{ComposeFile, Project};
use dcm_engine::{CommandRunner, EngineConfig, Orchestrator, RunError};

#[derive(Debug, Clone)]
pub enum Reply {
    Ok(String),
    Exit { code: i32, output: String },
    SpawnFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub dir: PathBuf,
    pub command: String,
}

#[derive(Default)]
pub struct ScriptedRunner {
    replies: Mutex<HashMap<(Option<PathBuf>, String), Reply>>,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Reply for `command` in any directory.
    pub fn on(&self, command: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .expect("replies lock")
            .insert((None, command.to_string()), reply);
        self
    }

    /// Reply for `command` only when run in `dir`.
    pub fn on_in(&self, dir: &Path, command: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .expect("replies lock")
            .insert((Some(dir.to_path_buf()), command.to_string()), reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls().iter().filter(|c| c.command == command).count()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>, RunError> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().expect("calls lock").push(Call {
            dir: dir.to_path_buf(),
            command: command.clone(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let reply = {
            let replies = self.replies.lock().expect("replies lock");
            replies
                .get(&(Some(dir.to_path_buf()), command.clone()))
                .or_else(|| replies.get(&(None, command.clone())))
                .cloned()
        };
        match reply.unwrap_or(Reply::Ok(String::new())) {
            Reply::Ok(out) => Ok(out.into_bytes()),
            Reply::Exit { code, output } => Err(RunError::Exit {
                program: program.to_string(),
                code: Some(code),
                output: output.into_bytes(),
            }),
            Reply::SpawnFailure => Err(RunError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

pub fn project(name: &str) -> Project {
    Project::new(name, format!("/srv/{name}"), ComposeFile::Yml)
}

pub fn orchestrator(runner: &Arc<ScriptedRunner>) -> Orchestrator {
    Orchestrator::new(runner.clone(), EngineConfig::default())
}
