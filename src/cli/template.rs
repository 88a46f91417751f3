//! Local template management.
//!
//! Bare `pj template` opens the template root in the IDE; `pj template add`
//! snapshots an existing project into the template root using the
//! git-aware file collector.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::utils::{cancelled, pick_project};
use crate::collect::{collect_project_files, copy_files};
use crate::config::loader::load_config;
use crate::error::Error;
use crate::shell;
use crate::store::{list_projects, project_exists};
use crate::utils::paths::Workspace;
use crate::utils::ui;

#[derive(Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub action: Option<TemplateAction>,
}

#[derive(Subcommand)]
pub enum TemplateAction {
    /// Snapshot an existing project into the template root
    Add {
        /// Project to templatize
        #[arg(value_name = "PROJECT")]
        project: Option<String>,
    },
}

pub fn run(workspace: &Workspace, args: TemplateArgs) -> Result<()> {
    match args.action {
        None => open_template_root(workspace),
        Some(TemplateAction::Add { project }) => add_template(workspace, project),
    }
}

fn open_template_root(workspace: &Workspace) -> Result<()> {
    let config = load_config(workspace)?;
    let spinner = ui::spinner(format!("opening the template root with {}...", config.ide));
    match shell::open_with_ide(&config.ide, &workspace.templates_dir) {
        Ok(()) => {
            spinner.finish_and_clear();
            ui::success(&format!(
                "opened template root: {}",
                ui::accent(&workspace.templates_dir.display().to_string())
            ));
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            ui::path_line("template root", &workspace.templates_dir);
            Err(err)
        }
    }
}

fn add_template(workspace: &Workspace, project: Option<String>) -> Result<()> {
    let projects = list_projects(workspace)?;
    if projects.is_empty() {
        println!();
        ui::info(&format!("no projects yet; use {} to create one", ui::accent("pj new")));
        println!();
        return Ok(());
    }

    let name = match project {
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
        None => match pick_project("choose a project to templatize", &projects)? {
            Some(name) => name,
            None => {
                cancelled();
                return Ok(());
            }
        },
    };

    let source_path = workspace.project_path(&name);

    let spinner = ui::spinner("analyzing project files...".to_string());
    let files = match collect_project_files(&source_path) {
        Ok(files) => files,
        Err(err) => {
            spinner.finish_and_clear();
            return Err(err);
        }
    };
    spinner.finish_and_clear();
    ui::success(&format!("found {} files", ui::accent(&files.len().to_string())));

    let target_path = workspace.templates_dir.join(&name);
    let spinner = ui::spinner("copying files into the template root...".to_string());
    copy_files(&source_path, &target_path, &files)?;
    spinner.finish_and_clear();

    ui::success(&format!(
        "template added: {} (usable immediately)",
        ui::accent(&name)
    ));
    println!();
    println!(
        "  {}",
        style("local templates register automatically; no config entry needed").dim()
    );
    println!(
        "  {}",
        style(format!(
            "to attach hooks, add to config.yaml:\n\n  templates:\n    {name}:\n      name: {name}\n      dir: {name}\n      hooks:\n        - gitInit"
        ))
        .dim()
    );
    println!();
    Ok(())
}
