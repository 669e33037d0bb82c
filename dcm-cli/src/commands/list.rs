//! `dcm list`: every compose project under `--path`.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::render;
use crate::settings::Settings;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ProjectJson {
    name: String,
    path: String,
    compose_file: String,
}

impl ListArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let projects = settings.discover()?;

        if self.json {
            let payload: Vec<ProjectJson> = projects
                .iter()
                .map(|p| ProjectJson {
                    name: p.name.to_string(),
                    path: p.path.display().to_string(),
                    compose_file: p.compose_path().display().to_string(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize project JSON")?
            );
            return Ok(());
        }

        render::project_table(&projects);
        Ok(())
    }
}
