//! Shared CLI utilities: prompt wrappers with uniform cancellation.
//!
//! Prompt cancellation (Esc, `q`, or Ctrl-C) is not an error: callers get
//! `None`, print the cancelled notice, and exit 0.

use crate::store::ProjectInfo;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

/// Print the uniform cancellation notice.
pub fn cancelled() {
    println!("{}", style("cancelled").dim());
}

fn interrupted(err: &dialoguer::Error) -> bool {
    let dialoguer::Error::IO(io_err) = err;
    io_err.kind() == std::io::ErrorKind::Interrupted
}

/// Single-choice menu. `None` means the user cancelled.
pub fn select_opt(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    match Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
    {
        Ok(choice) => Ok(choice),
        Err(err) if interrupted(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Yes/no confirmation defaulting to no. `None` means the user cancelled.
pub fn confirm_opt(prompt: &str) -> Result<Option<bool>> {
    match Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact_opt()
    {
        Ok(choice) => Ok(choice),
        Err(err) if interrupted(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Free-text input with validation. `None` means the user cancelled.
pub fn input_opt<V>(prompt: &str, initial: Option<&str>, validator: V) -> Result<Option<String>>
where
    V: FnMut(&String) -> Result<(), String>,
{
    let result = match initial {
        Some(initial) => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .with_initial_text(initial)
            .validate_with(validator)
            .interact_text(),
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .validate_with(validator)
            .interact_text(),
    };
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if interrupted(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Pick a project by name from a listing. `None` means the user cancelled.
pub fn pick_project(prompt: &str, projects: &[ProjectInfo]) -> Result<Option<String>> {
    let items: Vec<String> = projects
        .iter()
        .map(|p| match &p.template {
            Some(template) => format!("{}  {}", p.name, style(format!("[{template}]")).cyan()),
            None => format!("{}  {}", p.name, style(p.path.display()).dim()),
        })
        .collect();
    Ok(select_opt(prompt, &items)?.map(|idx| projects[idx].name.clone()))
}
