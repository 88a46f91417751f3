//! Open the metadata file in the configured IDE.

use anyhow::Result;

use crate::config::loader::load_config;
use crate::shell;
use crate::store::MetadataStore;
use crate::utils::paths::Workspace;
use crate::utils::ui;

pub fn run(workspace: &Workspace) -> Result<()> {
    let config = load_config(workspace)?;

    println!();
    println!("  {}", ui::accent("project metadata"));
    ui::path_line("path", &workspace.meta_file);
    println!();

    if MetadataStore::new(workspace).seed_empty()? {
        ui::info("created an empty metadata file");
        println!();
    }

    let spinner = ui::spinner(format!("opening the metadata file with {}...", config.ide));
    match shell::open_with_ide(&config.ide, &workspace.meta_file) {
        Ok(()) => {
            spinner.finish_and_clear();
            ui::success("metadata file opened");
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            ui::path_line("metadata file", &workspace.meta_file);
            Err(err)
        }
    }
}
