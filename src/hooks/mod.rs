//! Post-creation hook execution.
//!
//! Hooks run in declared order and are deliberately failure-tolerant: a
//! missing definition, an unrecognized script, or a non-zero exit is logged
//! and skipped, never aborting the remaining hooks or the command.

use crate::config::HookSpec;
use crate::shell;
use crate::utils::ui;
use console::style;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

/// Script extensions we know how to run, and what runs them.
const SCRIPT_INTERPRETERS: &[(&str, &str)] = &[
    ("sh", "sh"),
    ("bash", "bash"),
    ("js", "node"),
    ("py", "python3"),
];

fn interpreter_for(file: &str) -> Option<&'static str> {
    let ext = Path::new(file).extension()?.to_str()?;
    SCRIPT_INTERPRETERS.iter().find(|(known, _)| *known == ext).map(|(_, interp)| *interp)
}

/// Run `hook_keys` in order against a newly created project. Returns the
/// keys that actually executed successfully.
pub fn run_hooks(
    hook_keys: &[String],
    hook_defs: &BTreeMap<String, HookSpec>,
    hooks_dir: &Path,
    project_path: &Path,
    project_name: &str,
    template_key: &str,
) -> Vec<String> {
    let mut executed = Vec::new();
    if hook_keys.is_empty() {
        return executed;
    }

    println!();
    println!("  {}", style("running hooks:").dim());

    for key in hook_keys {
        let Some(def) = hook_defs.get(key) else {
            println!();
            println!("  {} {}", style("▸").dim(), style(format!("unknown hook: {key}")).yellow());
            continue;
        };

        println!();
        println!("  {} {}", style("▸").dim(), ui::accent_alt(&def.name));

        if execute_hook(def, hooks_dir, project_path, project_name, template_key) {
            executed.push(key.clone());
        } else {
            tracing::warn!("hook '{key}' did not complete");
        }
    }

    executed
}

fn execute_hook(
    def: &HookSpec,
    hooks_dir: &Path,
    project_path: &Path,
    project_name: &str,
    template_key: &str,
) -> bool {
    if let Some(command) = &def.command {
        return match shell::run_streaming(command, project_path) {
            Ok(true) => true,
            Ok(false) => {
                ui::warn("hook command exited with a non-zero status");
                false
            }
            Err(err) => {
                ui::warn(&format!("hook failed: {err}"));
                false
            }
        };
    }

    if let Some(file) = &def.file {
        let Some(interpreter) = interpreter_for(file) else {
            ui::warn(&format!("unrecognized script type: {file}"));
            return false;
        };
        let script = hooks_dir.join(file);
        if !script.exists() {
            ui::warn(&format!("script not found: {file}"));
            return false;
        }

        // Positional arguments: project path, project name, template key.
        let args: Vec<OsString> = vec![
            script.into_os_string(),
            project_path.as_os_str().to_os_string(),
            OsString::from(project_name),
            OsString::from(template_key),
        ];
        return match shell::run_program(interpreter, &args, project_path) {
            Ok(true) => true,
            Ok(false) => {
                ui::warn("hook script exited with a non-zero status");
                false
            }
            Err(err) => {
                ui::warn(&format!("hook failed: {err}"));
                false
            }
        };
    }

    ui::warn("hook has neither command nor file");
    false
}
