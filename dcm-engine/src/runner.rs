//! Boundary to external programs.
//!
//! The orchestrator only ever talks to a [`CommandRunner`]; tests substitute a
//! scripted fake, production uses [`SystemRunner`]. Runners do not time out or
//! retry. Deadline handling lives in the bulk dispatcher.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::RunError;

/// Run `program args...` with `dir` as working directory.
///
/// Returns the combined stdout + stderr on success. A non-zero exit is an
/// error that still carries whatever the program printed.
pub trait CommandRunner: Send + Sync {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>, RunError>;
}

/// Spawns real processes via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>, RunError> {
        tracing::debug!(dir = %dir.display(), program, args = ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| RunError::Spawn {
                program: program.to_string(),
                source: e,
            })?;

        // stdout first, then stderr.
        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if output.status.success() {
            Ok(combined)
        } else {
            Err(RunError::Exit {
                program: program.to_string(),
                code: output.status.code(),
                output: combined,
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn captures_stdout_and_stderr() {
        let dir = env::temp_dir();
        let out = SystemRunner
            .run(&dir, "sh", &["-c", "echo out; echo err >&2"])
            .expect("run");
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("out"));
        assert!(text.contains("err"));
    }

    #[test]
    fn runs_in_given_directory() {
        let dir = env::temp_dir().canonicalize().expect("canonical tmp");
        let out = SystemRunner.run(&dir, "pwd", &[]).expect("run");
        let printed = String::from_utf8_lossy(&out).trim().to_string();
        assert_eq!(std::path::PathBuf::from(printed).canonicalize().expect("canon"), dir);
    }

    #[test]
    fn non_zero_exit_keeps_output() {
        let err = SystemRunner
            .run(&env::temp_dir(), "sh", &["-c", "echo boom; exit 3"])
            .unwrap_err();
        match &err {
            RunError::Exit { code, .. } => assert_eq!(*code, Some(3)),
            other => panic!("expected exit error, got {other:?}"),
        }
        assert!(String::from_utf8_lossy(err.output()).contains("boom"));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = SystemRunner
            .run(&env::temp_dir(), "dcm-definitely-not-a-real-binary", &[])
            .unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
        assert!(err.output().is_empty());
    }
}
