//! dcm: find and drive many docker-compose projects at once.
//!
//! # Usage
//!
//! ```text
//! dcm --path <root> list [--json]
//! dcm --path <root> start [<project>] [--all]
//! dcm --path <root> stop [<project>] [--all]
//! dcm --path <root> status [<project>] [--all] [--json]
//! dcm start <alias>                      (managed project, no --path)
//! dcm list-managed [--json]
//! dcm --path <root> add-managed <project> [--alias <alias>]
//! dcm remove-managed <alias>
//! ```

mod commands;
mod render;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    lifecycle::LifecycleArgs,
    list::ListArgs,
    managed::{AddManagedArgs, ListManagedArgs, RemoveManagedArgs},
    status::StatusArgs,
};
use dcm_core::ActionType;
use settings::{GlobalArgs, Settings};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "dcm",
    version,
    about = "Docker Compose Manager - manage multiple docker-compose projects",
    long_about = "Find docker-compose projects beneath a directory tree and list, start, \
                  stop, or check the status of them one at a time or all together.",
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all docker-compose projects under --path.
    List(ListArgs),

    /// Start one project, or all of them with --all.
    Start(LifecycleArgs),

    /// Stop one project, or all of them with --all.
    Stop(LifecycleArgs),

    /// Show per-service status of one project, or all of them with --all.
    Status(StatusArgs),

    /// List saved (managed) projects.
    #[command(name = "list-managed", visible_alias = "lsm")]
    ListManaged(ListManagedArgs),

    /// Save a discovered project under an alias.
    #[command(name = "add-managed", visible_alias = "add")]
    AddManaged(AddManagedArgs),

    /// Forget a managed project by its alias.
    #[command(name = "remove-managed", visible_alias = "rm")]
    RemoveManaged(RemoveManagedArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    let settings = Settings::from(cli.global);

    match cli.command {
        Commands::List(args) => args.run(&settings),
        Commands::Start(args) => args.run(&settings, ActionType::Start),
        Commands::Stop(args) => args.run(&settings, ActionType::Stop),
        Commands::Status(args) => args.run(&settings),
        Commands::ListManaged(args) => args.run(&settings),
        Commands::AddManaged(args) => args.run(&settings),
        Commands::RemoveManaged(args) => args.run(&settings),
    }
}

/// Logs go to stderr; stdout carries rendered output only.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
