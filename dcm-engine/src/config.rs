//! Engine configuration passed explicitly into the [`Orchestrator`](crate::Orchestrator).

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// The compose command line every verb is appended to, e.g. `docker compose`
/// or `docker-compose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeTool {
    program: String,
    prefix: Vec<String>,
}

impl ComposeTool {
    pub fn new(program: impl Into<String>, prefix: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Leading arguments followed by `verb`.
    pub fn args<'a>(&'a self, verb: &[&'a str]) -> Vec<&'a str> {
        self.prefix
            .iter()
            .map(String::as_str)
            .chain(verb.iter().copied())
            .collect()
    }
}

impl Default for ComposeTool {
    fn default() -> Self {
        Self::new("docker", vec!["compose".to_string()])
    }
}

impl FromStr for ComposeTool {
    type Err = String;

    /// Whitespace-split: first word is the program, the rest lead every invocation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| "compose command must not be empty".to_string())?;
        Ok(Self::new(program, words.collect()))
    }
}

impl fmt::Display for ComposeTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.prefix {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub compose: ComposeTool,
    /// Cap on concurrently running bulk units. `None` fans out one unit per project.
    pub max_parallel: Option<NonZeroUsize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_docker_compose_plugin() {
        let tool = ComposeTool::default();
        assert_eq!(tool.program(), "docker");
        assert_eq!(tool.args(&["down"]), ["compose", "down"]);
        assert_eq!(tool.to_string(), "docker compose");
    }

    #[test]
    fn parses_standalone_binary() {
        let tool: ComposeTool = "docker-compose".parse().expect("parse");
        assert_eq!(tool.program(), "docker-compose");
        assert_eq!(tool.args(&["up", "-d"]), ["up", "-d"]);
    }

    #[test]
    fn parses_multi_word_command() {
        let tool: ComposeTool = "  podman   compose ".parse().expect("parse");
        assert_eq!(tool.program(), "podman");
        assert_eq!(tool.to_string(), "podman compose");
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!("   ".parse::<ComposeTool>().is_err());
    }
}
