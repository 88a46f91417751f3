//! Open the config file in the configured IDE, seeding a default first.

use anyhow::Result;

use crate::config::loader::{load_config, seed_default_config};
use crate::shell;
use crate::utils::paths::Workspace;
use crate::utils::ui;

pub fn run(workspace: &Workspace) -> Result<()> {
    if seed_default_config(workspace)? {
        ui::info("created the default configuration");
    }

    let config = load_config(workspace)?;

    println!();
    println!("  {}", ui::accent("configuration"));
    ui::path_line("path", &workspace.config_file);
    println!();

    let spinner = ui::spinner(format!("opening the config file with {}...", config.ide));
    match shell::open_with_ide(&config.ide, &workspace.config_file) {
        Ok(()) => {
            spinner.finish_and_clear();
            ui::success("config file opened");
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            ui::path_line("config file", &workspace.config_file);
            Err(err)
        }
    }
}
