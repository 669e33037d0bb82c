//! Global flags and the explicit configuration every command receives.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;

use dcm_core::{store, ManagedRegistry, Project};
use dcm_engine::{ComposeTool, EngineConfig, Orchestrator};

/// Flags accepted by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Root path to search for docker-compose projects.
    #[arg(long, short = 'p', global = true, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Managed projects file [default: ~/.config/dcm/config.yaml].
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compose command line every verb is appended to.
    #[arg(long, global = true, value_name = "CMD", default_value = "docker compose")]
    pub compose: ComposeTool,

    /// Deadline in seconds for --all start/stop.
    #[arg(long, global = true, value_name = "SECS", default_value_t = 300)]
    pub timeout: u64,

    /// Run at most N projects at once during --all start/stop.
    #[arg(long, global = true, value_name = "N")]
    pub max_parallel: Option<NonZeroUsize>,

    /// Debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug)]
pub struct Settings {
    pub root: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub engine: EngineConfig,
    pub timeout: Duration,
}

impl From<GlobalArgs> for Settings {
    fn from(args: GlobalArgs) -> Self {
        Self {
            root: args.path,
            config_path: args.config,
            engine: EngineConfig {
                compose: args.compose,
                max_parallel: args.max_parallel,
            },
            timeout: Duration::from_secs(args.timeout),
        }
    }
}

impl Settings {
    pub fn require_root(&self) -> Result<&Path> {
        match self.root.as_deref() {
            Some(root) => Ok(root),
            None => bail!("path is required to find projects, use --path flag"),
        }
    }

    /// Discover projects under `--path`.
    pub fn discover(&self) -> Result<Vec<Project>> {
        let root = self.require_root()?;
        dcm_discovery::discover(root).context("error finding projects")
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => store::default_config_path().context("cannot locate managed projects file"),
        }
    }

    pub fn load_managed(&self) -> Result<ManagedRegistry> {
        let path = self.store_path()?;
        store::load_at(&path).context("error loading managed projects")
    }

    pub fn save_managed(&self, registry: &ManagedRegistry) -> Result<()> {
        let path = self.store_path()?;
        store::save_at(&path, registry).context("error saving managed projects")
    }

    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::system(self.engine.clone())
    }
}
