//! `dcm status`: per-service state of one project or all of them.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use dcm_core::Project;
use dcm_engine::{Orchestrator, ProjectStatus, StatusError};

use super::resolve_single;
use crate::render;
use crate::settings::Settings;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Project name (substring match) or managed alias.
    #[arg(conflicts_with = "project")]
    pub target: Option<String>,

    /// Same as the positional project name.
    #[arg(long = "project", short = 'n', value_name = "NAME")]
    pub project: Option<String>,

    /// Check every project discovered under --path.
    #[arg(long, short = 'a', conflicts_with_all = ["target", "project"])]
    pub all: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson {
    name: String,
    path: String,
    running: bool,
    services: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl StatusJson {
    fn new(project: &Project, outcome: &Result<ProjectStatus, StatusError>) -> Self {
        let (running, services, error) = match outcome {
            Ok(status) => (status.running, status.services.clone(), None),
            Err(err) => (false, BTreeMap::new(), Some(err.to_string())),
        };
        Self {
            name: project.name.to_string(),
            path: project.path.display().to_string(),
            running,
            services,
            error,
        }
    }
}

impl StatusArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let projects = if self.all {
            let projects = settings.discover()?;
            if projects.is_empty() {
                render::no_projects();
                return Ok(());
            }
            projects
        } else {
            let Some(query) = self.target.or(self.project) else {
                bail!("project name is required, or use --all to check every project");
            };
            match resolve_single(settings, &query)? {
                Some(project) => vec![project],
                None => return Ok(()),
            }
        };

        let orchestrator = settings.orchestrator();
        let report = check_all(&orchestrator, &projects);

        if self.json {
            let payload: Vec<StatusJson> = report
                .iter()
                .map(|(project, outcome)| StatusJson::new(project, outcome))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
            );
        } else {
            for (project, outcome) in &report {
                match outcome {
                    Ok(status) => render::project_status(project, status),
                    Err(err) => render::status_error(project, err),
                }
            }
        }

        // A single project whose check fails is an error; --all keeps going.
        if !self.all {
            if let Some((project, Err(_))) = report.first() {
                bail!("status check failed for {}", project.name);
            }
        }
        Ok(())
    }
}

fn check_all<'a>(
    orchestrator: &Orchestrator,
    projects: &'a [Project],
) -> Vec<(&'a Project, Result<ProjectStatus, StatusError>)> {
    projects
        .iter()
        .map(|project| {
            let outcome = orchestrator.status(project);
            if let Err(err) = &outcome {
                tracing::warn!(project = %project.name, error = %err, "status check failed");
            }
            (project, outcome)
        })
        .collect()
}
