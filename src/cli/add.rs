//! Copy a template or project into the current working directory.
//!
//! `pj add name:alias [target]` materializes the source under
//! `<target>/<alias>`; with no arguments every choice is prompted. Non-empty
//! destinations require confirmation before the merge-copy overwrites.

use anyhow::Result;
use clap::Args;
use console::style;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::utils::{cancelled, confirm_opt, input_opt, pick_project, select_opt};
use crate::config::loader::load_config;
use crate::config::TemplateSpec;
use crate::error::Error;
use crate::store::{list_projects, project_exists, ProjectInfo};
use crate::template::discover_templates;
use crate::utils::copy_dir_all;
use crate::utils::paths::Workspace;
use crate::utils::ui;

#[derive(Args)]
pub struct AddArgs {
    /// Template or project name, with optional `name:alias` renaming
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Target base path, relative to the current directory (default `.`)
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}

enum SourceKind {
    Template,
    Project,
}

struct AddPlan {
    kind: SourceKind,
    name: String,
    alias: String,
    base_path: PathBuf,
}

const ILLEGAL_ALIAS_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

fn validate_alias(alias: &str) -> Result<(), String> {
    if alias.trim().is_empty() {
        return Err("alias cannot be empty".to_string());
    }
    if alias.contains(ILLEGAL_ALIAS_CHARS) {
        return Err("alias contains illegal characters".to_string());
    }
    Ok(())
}

fn validate_base_path(input: Option<&str>) -> Result<String, Error> {
    let trimmed = input.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return Ok(".".to_string());
    }
    if Path::new(trimmed).is_absolute() {
        return Err(Error::Validation("target path must be relative or `.`".to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn run(workspace: &Workspace, args: AddArgs) -> Result<()> {
    let config = load_config(workspace)?;
    let templates = discover_templates(&workspace.templates_dir, &config.templates)?;
    let projects = list_projects(workspace)?;

    let plan = match args.source {
        Some(source) => {
            let base = validate_base_path(args.target.as_deref())?;
            match resolve_source(workspace, &source, &templates)? {
                Some((kind, name, alias)) => AddPlan {
                    kind,
                    name,
                    alias,
                    base_path: env::current_dir()?.join(base),
                },
                None => {
                    cancelled();
                    return Ok(());
                }
            }
        }
        None => match interactive_plan(&templates, &projects)? {
            Some(plan) => plan,
            None => {
                cancelled();
                return Ok(());
            }
        },
    };

    let dest = plan.base_path.join(&plan.alias);
    fs::create_dir_all(&plan.base_path)?;

    if !ensure_destination(&dest)? {
        cancelled();
        return Ok(());
    }

    match plan.kind {
        SourceKind::Template => {
            let spec = templates.get(&plan.name).ok_or_else(|| Error::NotFound {
                kind: "template",
                name: plan.name.clone(),
                hint: None,
            })?;
            let dir_name = spec.dir.clone().unwrap_or_else(|| plan.name.clone());
            let template_dir = workspace.templates_dir.join(&dir_name);
            if !template_dir.is_dir() {
                return Err(Error::NotFound {
                    kind: "template directory",
                    name: dir_name,
                    hint: Some(format!("expected under {}", workspace.templates_dir.display())),
                }
                .into());
            }

            println!();
            ui::detail("template dir", &ui::accent_alt(&template_dir.display().to_string()));
            ui::detail("target", &style(dest.display()).dim().to_string());

            let spinner = ui::spinner("copying files...".to_string());
            copy_dir_all(&template_dir, &dest)?;
            spinner.finish_and_clear();
            ui::success(&format!("template copied to {}", ui::accent(&dest.display().to_string())));
        }
        SourceKind::Project => {
            if !project_exists(workspace, &plan.name) {
                return Err(Error::NotFound {
                    kind: "project",
                    name: plan.name,
                    hint: Some("use `pj ls` to see all projects".to_string()),
                }
                .into());
            }
            let source_path = workspace.project_path(&plan.name);

            println!();
            ui::detail("source project", &ui::accent_alt(&plan.name));
            ui::detail("target", &style(dest.display()).dim().to_string());

            let spinner = ui::spinner("copying files...".to_string());
            copy_dir_all(&source_path, &dest)?;
            spinner.finish_and_clear();
            ui::success(&format!("project copied to {}", ui::accent(&dest.display().to_string())));
        }
    }

    Ok(())
}

/// Split `name:alias`, classify the source, and disambiguate a name that is
/// both a template and a project. `None` means the user cancelled.
fn resolve_source(
    workspace: &Workspace,
    source: &str,
    templates: &BTreeMap<String, TemplateSpec>,
) -> Result<Option<(SourceKind, String, String)>> {
    let (name, alias) = match source.split_once(':') {
        Some((name, alias)) if !alias.is_empty() => (name.to_string(), alias.to_string()),
        Some((name, _)) => (name.to_string(), name.to_string()),
        None => (source.to_string(), source.to_string()),
    };
    if name.is_empty() {
        return Err(Error::Validation("missing template or project name".to_string()).into());
    }
    validate_alias(&alias).map_err(Error::Validation)?;

    let is_template = templates.contains_key(&name);
    let is_project = project_exists(workspace, &name);

    match (is_template, is_project) {
        (false, false) => Err(Error::NotFound {
            kind: "template or project",
            name,
            hint: Some(format!(
                "available templates: {}",
                templates.keys().cloned().collect::<Vec<_>>().join(", ")
            )),
        }
        .into()),
        (true, true) => {
            let items =
                vec!["template".to_string(), format!("project  {}", style("(same name)").dim())];
            match select_opt("both a template and a project match; pick a source", &items)? {
                Some(0) => Ok(Some((SourceKind::Template, name, alias))),
                Some(_) => Ok(Some((SourceKind::Project, name, alias))),
                None => Ok(None),
            }
        }
        (true, false) => Ok(Some((SourceKind::Template, name, alias))),
        (false, true) => Ok(Some((SourceKind::Project, name, alias))),
    }
}

fn interactive_plan(
    templates: &BTreeMap<String, TemplateSpec>,
    projects: &[ProjectInfo],
) -> Result<Option<AddPlan>> {
    if templates.is_empty() && projects.is_empty() {
        println!();
        ui::info("no templates or projects available");
        println!();
        return Ok(None);
    }

    let kinds = vec![
        format!("template  {}", style("(configured or local)").dim()),
        format!("project   {}", style("(managed directory)").dim()),
    ];
    let kind = match select_opt("choose a source type", &kinds)? {
        Some(0) => SourceKind::Template,
        Some(_) => SourceKind::Project,
        None => return Ok(None),
    };

    let name = match kind {
        SourceKind::Template => {
            if templates.is_empty() {
                println!();
                ui::info("no templates available");
                return Ok(None);
            }
            let keys: Vec<String> = templates.keys().cloned().collect();
            let items: Vec<String> = keys
                .iter()
                .map(|key| {
                    let spec = &templates[key];
                    format!("{}  {}", spec.name, style(format!("({})", spec.mode_label())).dim())
                })
                .collect();
            match select_opt("choose a template", &items)? {
                Some(idx) => keys[idx].clone(),
                None => return Ok(None),
            }
        }
        SourceKind::Project => {
            if projects.is_empty() {
                println!();
                ui::info("no projects available");
                return Ok(None);
            }
            match pick_project("choose a project", projects)? {
                Some(name) => name,
                None => return Ok(None),
            }
        }
    };

    let alias = match input_opt("directory name after adding", Some(&name), |value: &String| {
        validate_alias(value)
    })? {
        Some(alias) => alias,
        None => return Ok(None),
    };

    let base = match input_opt(
        "target base path (`.` for the current directory)",
        Some("."),
        |value: &String| match validate_base_path(Some(value)) {
            Ok(_) => Ok(()),
            Err(err) => Err(err.to_string()),
        },
    )? {
        Some(base) => validate_base_path(Some(&base))?,
        None => return Ok(None),
    };

    Ok(Some(AddPlan { kind, name, alias, base_path: env::current_dir()?.join(base) }))
}

/// Ask before merge-copying into a destination that already has content.
/// Returns whether the copy should proceed.
fn ensure_destination(dest: &Path) -> Result<bool> {
    if !dest.exists() {
        return Ok(true);
    }
    let occupied = fs::read_dir(dest)?.next().is_some();
    if !occupied {
        return Ok(true);
    }
    let prompt = format!(
        "{} target directory exists and is not empty; continuing will overwrite files. continue?",
        style("⚠").yellow()
    );
    Ok(matches!(confirm_opt(&prompt)?, Some(true)))
}
