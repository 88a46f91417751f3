//! Open an existing project in the configured IDE.

use anyhow::Result;
use clap::Args;

use super::utils::{cancelled, pick_project};
use crate::config::loader::load_config;
use crate::error::Error;
use crate::store::{list_projects, project_exists};
use crate::utils::paths::Workspace;
use crate::utils::ui;
use crate::shell;

#[derive(Args)]
pub struct OpenArgs {
    /// Project name
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub fn run(workspace: &Workspace, args: OpenArgs) -> Result<()> {
    let config = load_config(workspace)?;
    let projects = list_projects(workspace)?;

    if projects.is_empty() {
        println!();
        ui::info(&format!("no projects yet; use {} to create one", ui::accent("pj new")));
        println!();
        return Ok(());
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
        None => match pick_project("choose a project to open", &projects)? {
            Some(name) => name,
            None => {
                cancelled();
                return Ok(());
            }
        },
    };

    let project_path = workspace.project_path(&name);
    let spinner = ui::spinner(format!("opening {} with {}...", name, config.ide));
    match shell::open_with_ide(&config.ide, &project_path) {
        Ok(()) => {
            spinner.finish_with_message(format!("opened {}", name));
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            ui::path_line("project path", &project_path);
            Err(err)
        }
    }
}
