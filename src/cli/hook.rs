//! Open the hooks directory in the configured IDE, seeding an example.

use anyhow::{Context, Result};
use console::style;
use std::fs;

use crate::config::loader::load_config;
use crate::shell;
use crate::utils::paths::Workspace;
use crate::utils::ui;

const EXAMPLE_HOOK: &str = r#"#!/bin/sh
# Example hook script. Hooks receive three positional arguments:
#   $1 - project path
#   $2 - project name
#   $3 - template key

echo "custom hook for $2"
echo "project path: $1"
echo "template: $3"

# Put your own logic here: extra files, tool setup, anything the template
# itself should not hardcode.
"#;

pub fn run(workspace: &Workspace) -> Result<()> {
    let config = load_config(workspace)?;

    println!();
    println!("  {}", ui::accent("custom hooks"));
    println!();

    let is_empty = fs::read_dir(&workspace.hooks_dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true);
    if is_empty {
        let example = workspace.hooks_dir.join("example.sh");
        fs::write(&example, EXAMPLE_HOOK)
            .with_context(|| format!("failed writing {}", example.display()))?;
        ui::info("created an example hook script: example.sh");
        println!();
    }

    let spinner = ui::spinner(format!("opening the hooks directory with {}...", config.ide));
    match shell::open_with_ide(&config.ide, &workspace.hooks_dir) {
        Ok(()) => {
            spinner.finish_and_clear();
            ui::success("hooks directory opened");
            println!();
            println!(
                "  {}",
                style("drop script files here, then reference them from config.yaml").dim()
            );
            println!();
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            ui::path_line("hooks directory", &workspace.hooks_dir);
            Err(err)
        }
    }
}
