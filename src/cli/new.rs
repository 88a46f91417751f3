//! Project creation pipeline.
//!
//! Sequence: validate name → create directory → apply template → run hooks
//! → save metadata → open IDE. A template failure rolls back the created
//! directory; hook and IDE failures never revert completed work.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::collections::BTreeMap;
use std::fs;

use super::utils::{cancelled, input_opt, select_opt};
use crate::config::loader::load_config;
use crate::config::{Config, TemplateSpec};
use crate::error::Error;
use crate::hooks::run_hooks;
use crate::store::{validate_project_name, MetadataStore};
use crate::shell;
use crate::template::{apply_template, discover_templates};
use crate::utils::paths::Workspace;
use crate::utils::ui;

#[derive(Args)]
pub struct NewArgs {
    /// Project name
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Template key; pass the flag without a value to pick interactively
    #[arg(
        short = 't',
        long,
        value_name = "TEMPLATE",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub template: Option<String>,
}

pub fn run(workspace: &Workspace, args: NewArgs) -> Result<()> {
    let config = load_config(workspace)?;
    let templates = discover_templates(&workspace.templates_dir, &config.templates)?;

    // Quick mode: a bare name creates an empty project without prompting.
    if let (Some(name), None) = (&args.name, &args.template) {
        return quick_create(workspace, &config, name);
    }

    let name = match args.name {
        Some(name) => {
            validate_project_name(workspace, &name).map_err(Error::Validation)?;
            name
        }
        None => {
            let result = input_opt("project name", None, |value: &String| {
                validate_project_name(workspace, value)
            })?;
            match result {
                Some(name) => name,
                None => {
                    cancelled();
                    return Ok(());
                }
            }
        }
    };

    let template_key = match args.template.as_deref() {
        Some("") | None => match pick_template(&templates)? {
            Some(key) => key,
            None => {
                cancelled();
                return Ok(());
            }
        },
        Some(key) => {
            if !templates.contains_key(key) {
                return Err(Error::NotFound {
                    kind: "template",
                    name: key.to_string(),
                    hint: Some(format!(
                        "available templates: {}",
                        templates.keys().cloned().collect::<Vec<_>>().join(", ")
                    )),
                }
                .into());
            }
            key.to_string()
        }
    };

    let spec = &templates[&template_key];
    let project_path = workspace.project_path(&name);

    println!();
    ui::detail("project", &ui::accent(&name));
    ui::detail("template", &ui::accent_alt(&spec.name));
    ui::detail("path", &style(project_path.display()).dim().to_string());

    fs::create_dir_all(&project_path)
        .with_context(|| format!("failed creating {}", project_path.display()))?;

    if let Err(err) = apply_template(spec, &workspace.templates_dir, &project_path) {
        // Roll back the partial project before surfacing the error.
        let _ = fs::remove_dir_all(&project_path);
        return Err(err);
    }

    let executed = run_hooks(
        &spec.hooks,
        &config.hooks,
        &workspace.hooks_dir,
        &project_path,
        &name,
        &template_key,
    );
    tracing::debug!(?executed, "hooks finished");

    MetadataStore::new(workspace).record(&name, Some(&template_key))?;

    open_in_ide(&config, &project_path);
    println!();
    ui::success(&format!("{} created", ui::accent(&name)));
    Ok(())
}

fn quick_create(workspace: &Workspace, config: &Config, name: &str) -> Result<()> {
    validate_project_name(workspace, name).map_err(Error::Validation)?;

    let project_path = workspace.project_path(name);
    fs::create_dir_all(&project_path)
        .with_context(|| format!("failed creating {}", project_path.display()))?;

    // An `empty` template entry may attach hooks to quick-created projects.
    if let Some(empty) = config.templates.get("empty") {
        run_hooks(&empty.hooks, &config.hooks, &workspace.hooks_dir, &project_path, name, "empty");
    }

    MetadataStore::new(workspace).record(name, Some("empty"))?;

    open_in_ide(config, &project_path);
    ui::success(&format!("{} created", ui::accent(name)));
    Ok(())
}

fn pick_template(templates: &BTreeMap<String, TemplateSpec>) -> Result<Option<String>> {
    let keys: Vec<String> = templates.keys().cloned().collect();
    let items: Vec<String> = keys
        .iter()
        .map(|key| {
            let spec = &templates[key];
            format!("{}  {}", spec.name, style(format!("({})", spec.mode_label())).dim())
        })
        .collect();
    Ok(select_opt("choose a template", &items)?.map(|idx| keys[idx].clone()))
}

/// IDE launch failure is reported but leaves the created project intact.
fn open_in_ide(config: &Config, project_path: &std::path::Path) {
    let spinner = ui::spinner(format!("opening {}...", config.ide));
    match shell::open_with_ide(&config.ide, project_path) {
        Ok(()) => spinner.finish_with_message(format!("{} opened", config.ide)),
        Err(err) => {
            spinner.finish_and_clear();
            println!();
            ui::failure(&format!("{err:#}"));
            ui::path_line("project path", project_path);
        }
    }
}
