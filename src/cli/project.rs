//! Open the projects root in the configured IDE.

use anyhow::Result;

use crate::config::loader::load_config;
use crate::shell;
use crate::utils::paths::Workspace;
use crate::utils::ui;

pub fn run(workspace: &Workspace) -> Result<()> {
    let config = load_config(workspace)?;

    let spinner = ui::spinner(format!("opening the projects root with {}...", config.ide));
    match shell::open_with_ide(&config.ide, &workspace.projects_dir) {
        Ok(()) => {
            spinner.finish_and_clear();
            ui::success(&format!(
                "opened projects root: {}",
                ui::accent(&workspace.projects_dir.display().to_string())
            ));
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            ui::path_line("projects root", &workspace.projects_dir);
            Err(err)
        }
    }
}
