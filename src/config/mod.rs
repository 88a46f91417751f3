//! Configuration: domain types and the YAML loader.
//!
//! `config.yaml` maps arbitrary user-chosen keys to template and hook
//! specs. The shapes are validated once at load time so commands can rely
//! on every template having a usable mode.

pub mod loader;

pub use loader::{load_config, seed_default_config, DEFAULT_CONFIG};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// IDE launched after project creation (`cursor`, `code`, ... or a
    /// literal command).
    pub ide: String,
    #[serde(default)]
    pub hooks: BTreeMap<String, HookSpec>,
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateSpec>,
}

/// How a template materializes a new project. Derived from which fields the
/// spec carries, never stored explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateMode<'a> {
    /// Run a shell command inside the new project directory.
    Command(&'a str),
    /// Copy a subfolder of the template root into the project.
    Directory(&'a str),
    /// Nothing to materialize; only hooks run.
    HooksOnly,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateSpec {
    /// Display label shown in pickers.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Folder name under the template root supplying files to copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Hook keys to run after application, in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<String>,
}

impl TemplateSpec {
    /// Field precedence: command > dir > hooks. `None` means the spec is
    /// invalid.
    pub fn mode(&self) -> Option<TemplateMode<'_>> {
        if let Some(command) = self.command.as_deref() {
            Some(TemplateMode::Command(command))
        } else if let Some(dir) = self.dir.as_deref() {
            Some(TemplateMode::Directory(dir))
        } else if !self.hooks.is_empty() {
            Some(TemplateMode::HooksOnly)
        } else {
            None
        }
    }

    /// Implicit template for a directory discovered under the template root.
    pub fn for_local_dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            command: None,
            dir: Some(name.to_string()),
            hooks: Vec::new(),
        }
    }

    /// Short mode label for picker hints.
    pub fn mode_label(&self) -> &'static str {
        match self.mode() {
            Some(TemplateMode::Command(_)) => "command",
            Some(TemplateMode::Directory(_)) => "local template",
            Some(TemplateMode::HooksOnly) => "hooks only",
            None => "invalid",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HookSpec {
    /// Display label shown while the hook runs.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Script filename under the hooks directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl HookSpec {
    pub fn is_runnable(&self) -> bool {
        self.command.is_some() || self.file.is_some()
    }
}

impl Config {
    /// Reject templates with no recognized shape; unrunnable hooks are only
    /// warned about here and skipped again at execution time.
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        for (key, spec) in &self.templates {
            if spec.mode().is_none() {
                return Err(crate::error::Error::ConfigParse {
                    reason: format!("template '{key}' needs one of command, dir, or hooks"),
                });
            }
        }
        for (key, hook) in &self.hooks {
            if !hook.is_runnable() {
                tracing::warn!("hook '{key}' has neither command nor file and will be skipped");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, TemplateMode, TemplateSpec};
    use std::collections::BTreeMap;

    fn spec(command: Option<&str>, dir: Option<&str>, hooks: &[&str]) -> TemplateSpec {
        TemplateSpec {
            name: "t".to_string(),
            command: command.map(String::from),
            dir: dir.map(String::from),
            hooks: hooks.iter().map(|h| h.to_string()).collect(),
        }
    }

    #[test]
    fn mode_prefers_command_over_dir_over_hooks() {
        assert!(matches!(
            spec(Some("cargo new ."), Some("x"), &["a"]).mode(),
            Some(TemplateMode::Command("cargo new ."))
        ));
        assert!(matches!(
            spec(None, Some("rust-cli"), &["a"]).mode(),
            Some(TemplateMode::Directory("rust-cli"))
        ));
        assert!(matches!(spec(None, None, &["a"]).mode(), Some(TemplateMode::HooksOnly)));
        assert!(spec(None, None, &[]).mode().is_none());
    }

    #[test]
    fn validate_rejects_shapeless_template() {
        let mut templates = BTreeMap::new();
        templates.insert("broken".to_string(), spec(None, None, &[]));
        let config =
            Config { ide: "code".to_string(), hooks: BTreeMap::new(), templates };
        let err = config.validate().expect_err("shapeless template must be rejected");
        assert!(err.to_string().contains("broken"));
    }
}
