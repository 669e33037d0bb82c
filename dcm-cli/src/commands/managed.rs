//! `dcm list-managed`, `dcm add-managed`, `dcm remove-managed`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::render;
use crate::settings::Settings;

#[derive(Args, Debug)]
pub struct ListManagedArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ManagedJson {
    alias: String,
    name: String,
    path: String,
    compose_file: String,
}

impl ListManagedArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let managed = settings.load_managed()?;

        if self.json {
            let payload: Vec<ManagedJson> = managed
                .iter()
                .map(|m| ManagedJson {
                    alias: m.alias.to_string(),
                    name: m.project.name.to_string(),
                    path: m.project.path.display().to_string(),
                    compose_file: m.project.compose_path().display().to_string(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload)
                    .context("failed to serialize managed projects JSON")?
            );
            return Ok(());
        }

        render::managed_table(managed.iter());
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddManagedArgs {
    /// Project name to look up under --path (substring match).
    pub project: String,

    /// Alias to save it under. Defaults to the project name.
    #[arg(long, short = 'a')]
    pub alias: Option<String>,
}

impl AddManagedArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let projects = settings.discover()?;
        let Some(project) = dcm_core::find_by_name(&projects, &self.project) else {
            anyhow::bail!("no project matching '{}' found under --path", self.project);
        };
        let project = project.clone();
        let alias = self.alias.unwrap_or_else(|| project.name.to_string());

        let mut managed = settings.load_managed()?;
        managed
            .add(project.clone(), alias.as_str())
            .with_context(|| format!("cannot add '{}'", project.name))?;
        settings.save_managed(&managed)?;

        println!(
            "{} Added '{}' as '{}' ({})",
            "✓".green().bold(),
            project.name,
            alias,
            project.path.display()
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RemoveManagedArgs {
    /// Exact alias to forget.
    pub alias: String,
}

impl RemoveManagedArgs {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let mut managed = settings.load_managed()?;
        let removed = managed
            .remove(&self.alias)
            .context("cannot remove managed project")?;
        settings.save_managed(&managed)?;

        println!(
            "{} Removed '{}' ({})",
            "✓".green().bold(),
            removed.alias,
            removed.project.name
        );
        Ok(())
    }
}
