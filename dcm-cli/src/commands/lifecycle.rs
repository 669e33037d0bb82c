//! `dcm start` / `dcm stop`: one project, or every discovered one with `--all`.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use dcm_core::{ActionType, Project};
use dcm_engine::{ActionResult, BulkAction, Deadline, Orchestrator};

use super::resolve_single;
use crate::render;
use crate::settings::Settings;

#[derive(Args, Debug)]
pub struct LifecycleArgs {
    /// Project name (substring match) or managed alias.
    #[arg(conflicts_with = "project")]
    pub target: Option<String>,

    /// Same as the positional project name.
    #[arg(long = "project", short = 'n', value_name = "NAME")]
    pub project: Option<String>,

    /// Act on every project discovered under --path.
    #[arg(long, short = 'a', conflicts_with_all = ["target", "project"])]
    pub all: bool,
}

impl LifecycleArgs {
    pub fn run(self, settings: &Settings, action: ActionType) -> Result<()> {
        let action = BulkAction::try_from(action)
            .map_err(|other| anyhow!("'{other}' is not a start/stop action"))?;

        if self.all {
            return run_all(settings, action);
        }

        let Some(query) = self.target.or(self.project) else {
            bail!("project name is required, or use --all to {action} every project");
        };
        let Some(project) = resolve_single(settings, &query)? else {
            return Ok(());
        };

        let orchestrator = settings.orchestrator();
        render::action_start(&project, action);
        let result = match action {
            BulkAction::Start => orchestrator.start(&project),
            BulkAction::Stop => orchestrator.stop(&project),
        };
        render::action_result(&result);
        if !result.success() {
            bail!("failed to {action} {}", project.name);
        }
        Ok(())
    }
}

fn run_all(settings: &Settings, action: BulkAction) -> Result<()> {
    let projects = settings.discover()?;
    if projects.is_empty() {
        render::no_projects();
        return Ok(());
    }

    render::bulk_header(projects.len(), action);
    let orchestrator = settings.orchestrator();
    let deadline = Deadline::after(settings.timeout);
    let results = block_on_bulk(&orchestrator, &projects, action, &deadline)?;

    for result in &results {
        render::action_result(result);
    }
    let failed = results.iter().filter(|r| !r.success()).count();
    if failed > 0 {
        bail!("{failed} of {} project(s) failed to {action}", results.len());
    }
    Ok(())
}

/// Drive the bulk operation on a fresh runtime; Ctrl-C cancels units that
/// have not launched yet.
fn block_on_bulk(
    orchestrator: &Orchestrator,
    projects: &[Project],
    action: BulkAction,
    deadline: &Deadline,
) -> Result<Vec<ActionResult>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let results = runtime.block_on(async {
        let watcher = deadline.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling remaining projects");
                watcher.cancel();
            }
        });
        let results = orchestrator.bulk_manage(projects, action, deadline).await;
        interrupt.abort();
        results
    });
    Ok(results)
}
