//! Project deletion, single or bulk.
//!
//! `pj delete all` fans the directory removals out concurrently and reports
//! per-project results; metadata is cleared unconditionally afterwards so a
//! half-failed bulk delete never leaves stale records behind.

use anyhow::Result;
use clap::Args;
use console::style;
use rayon::prelude::*;
use std::fs;

use super::utils::{cancelled, confirm_opt, pick_project};
use crate::error::Error;
use crate::store::{list_projects, project_exists, MetadataStore, ProjectInfo};
use crate::utils::paths::Workspace;
use crate::utils::ui;

#[derive(Args)]
pub struct DeleteArgs {
    /// Project name, or `all` to delete every project
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub fn run(workspace: &Workspace, args: DeleteArgs) -> Result<()> {
    let projects = list_projects(workspace)?;

    if projects.is_empty() {
        println!();
        ui::info("no projects to delete");
        println!();
        return Ok(());
    }

    if args.name.as_deref() == Some("all") {
        return delete_all(workspace, &projects);
    }

    let name = match args.name {
        Some(name) => {
            if !project_exists(workspace, &name) {
                return Err(Error::NotFound {
                    kind: "project",
                    name,
                    hint: Some("use `pj ls` to see all projects".to_string()),
                }
                .into());
            }
            name
        }
        None => match pick_project("choose a project to delete", &projects)? {
            Some(name) => name,
            None => {
                cancelled();
                return Ok(());
            }
        },
    };

    match confirm_opt(&format!("delete {}? this cannot be undone", ui::accent(&name)))? {
        Some(true) => {}
        _ => {
            cancelled();
            return Ok(());
        }
    }

    let project_path = workspace.project_path(&name);
    let spinner = ui::spinner(format!("deleting {name}..."));
    fs::remove_dir_all(&project_path)
        .map_err(|err| {
            spinner.finish_and_clear();
            anyhow::anyhow!("failed deleting {}: {err}", project_path.display())
        })?;
    MetadataStore::new(workspace).remove(&name)?;
    spinner.finish_and_clear();
    ui::success(&format!("deleted {}", ui::accent(&name)));
    Ok(())
}

fn delete_all(workspace: &Workspace, projects: &[ProjectInfo]) -> Result<()> {
    println!();
    println!("  {}", style("projects to delete:").dim());
    for project in projects {
        let tag = match &project.template {
            Some(template) => style(format!(" ({template})")).cyan().to_string(),
            None => String::new(),
        };
        println!("  {} {}{tag}", style("•").color256(214), project.name);
    }
    println!();

    let prompt = format!(
        "delete all {} projects? this cannot be undone",
        ui::accent(&projects.len().to_string())
    );
    match confirm_opt(&prompt)? {
        Some(true) => {}
        _ => {
            cancelled();
            return Ok(());
        }
    }

    let spinner = ui::spinner("deleting projects...".to_string());
    let results: Vec<(String, std::io::Result<()>)> = projects
        .par_iter()
        .map(|project| (project.name.clone(), fs::remove_dir_all(&project.path)))
        .collect();
    spinner.finish_and_clear();

    println!();
    let total = results.len();
    let mut failed = 0;
    for (index, (name, result)) in results.iter().enumerate() {
        match result {
            Ok(()) => {
                println!(
                    "  {} [{}/{}] {}",
                    style("✓").green(),
                    index + 1,
                    total,
                    name
                );
            }
            Err(err) => {
                failed += 1;
                println!(
                    "  {} [{}/{}] {} - {err}",
                    style("✗").red(),
                    index + 1,
                    total,
                    name
                );
            }
        }
    }

    // Cleared even when some removals failed; stale records are worse than
    // orphan directories the user can still see.
    MetadataStore::new(workspace).clear()?;

    println!();
    if failed > 0 {
        anyhow::bail!("deleted {} projects, {failed} failed", total - failed);
    }
    ui::success(&format!("deleted all {total} projects"));
    Ok(())
}
