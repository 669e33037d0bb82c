//! Human-readable terminal output. Everything here writes to stdout.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use dcm_core::{ManagedProject, Project};
use dcm_engine::{is_running_status, ActionResult, BulkAction, ProjectStatus};

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "compose file")]
    compose_file: String,
}

#[derive(Tabled)]
struct ManagedRow {
    #[tabled(rename = "alias")]
    alias: String,
    #[tabled(rename = "project")]
    project: String,
    #[tabled(rename = "compose file")]
    compose_file: String,
}

pub fn no_projects() {
    println!("{}", "No Docker Compose projects found".yellow());
}

pub fn project_table(projects: &[Project]) {
    if projects.is_empty() {
        no_projects();
        return;
    }
    println!("Found {} Docker Compose project(s):", projects.len());
    let rows: Vec<ProjectRow> = projects
        .iter()
        .enumerate()
        .map(|(i, p)| ProjectRow {
            index: i + 1,
            name: p.name.to_string(),
            compose_file: p.compose_path().display().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

pub fn managed_table<'a>(managed: impl Iterator<Item = &'a ManagedProject>) {
    let rows: Vec<ManagedRow> = managed
        .map(|m| ManagedRow {
            alias: m.alias.to_string(),
            project: m.project.name.to_string(),
            compose_file: m.project.compose_path().display().to_string(),
        })
        .collect();
    if rows.is_empty() {
        println!("{}", "No managed projects.".yellow());
        println!("Run: dcm --path <root> add-managed <project>");
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

pub fn not_found(query: &str) {
    println!("{}", format!("No project matching '{query}' found").yellow());
}

pub fn action_start(project: &Project, action: BulkAction) {
    let verb = match action {
        BulkAction::Start => "Starting",
        BulkAction::Stop => "Stopping",
    };
    println!("{verb} project: {} ({})", project.name.to_string().bold(), project.path.display());
}

pub fn bulk_header(count: usize, action: BulkAction) {
    let verb = match action {
        BulkAction::Start => "Starting",
        BulkAction::Stop => "Stopping",
    };
    println!("{verb} {count} project(s)...");
}

pub fn action_result(result: &ActionResult) {
    match &result.outcome {
        Ok(message) => println!("{} {message}", "✓".green().bold()),
        Err(err) => println!("{} {}: {err}", "✗".red().bold(), result.project.name),
    }
}

pub fn project_status(project: &Project, status: &ProjectStatus) {
    println!(
        "\n=== Status of {} ({}) ===",
        project.name.to_string().bold(),
        project.path.display()
    );
    if status.services.is_empty() {
        println!("{}", "Project is not running (no containers)".yellow());
        return;
    }
    for (service, text) in &status.services {
        if is_running_status(text) {
            println!("  {} {service}: {text}", "●".green());
        } else {
            println!("  {} {service}: {}", "○".yellow(), text.yellow());
        }
    }
}

pub fn status_error(project: &Project, err: &dyn std::fmt::Display) {
    println!("{} {}: {err}", "✗".red().bold(), project.name);
}
