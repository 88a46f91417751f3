//! Template discovery and application.

use crate::config::{TemplateMode, TemplateSpec};
use crate::error::Error;
use crate::shell;
use crate::utils::copy_dir_all;
use anyhow::{Context, Result};
use console::style;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Merge implicit templates with configured ones.
///
/// Every immediate subdirectory of the template root becomes an implicit
/// template keyed by its own name; configured entries with the same key
/// replace the implicit one wholesale (explicit configuration wins, no
/// field-level merge).
pub fn discover_templates(
    template_root: &Path,
    configured: &BTreeMap<String, TemplateSpec>,
) -> Result<BTreeMap<String, TemplateSpec>> {
    let mut merged = BTreeMap::new();

    if template_root.is_dir() {
        for entry in fs::read_dir(template_root)
            .with_context(|| format!("failed reading {}", template_root.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                merged.insert(name.to_string(), TemplateSpec::for_local_dir(name));
            }
        }
    }

    for (key, spec) in configured {
        merged.insert(key.clone(), spec.clone());
    }

    Ok(merged)
}

/// Apply `spec` to a freshly created project directory.
///
/// The caller owns rollback: on failure it must delete the project
/// directory before surfacing the error, so no partial project is left on
/// disk.
pub fn apply_template(
    spec: &TemplateSpec,
    template_root: &Path,
    project_dir: &Path,
) -> Result<()> {
    fs::create_dir_all(project_dir)
        .with_context(|| format!("failed creating {}", project_dir.display()))?;

    match spec.mode() {
        Some(TemplateMode::Command(command)) => {
            println!();
            println!("  {}", style("running template command:").dim());
            // Output streams straight to the terminal; nothing to capture.
            let ok = shell::run_streaming(command, project_dir)?;
            if !ok {
                return Err(Error::ChildProcess("template command failed".to_string()).into());
            }
            println!();
            Ok(())
        }
        Some(TemplateMode::Directory(dir)) => {
            let template_dir = template_root.join(dir);
            if !template_dir.is_dir() {
                return Err(Error::NotFound {
                    kind: "template directory",
                    name: dir.to_string(),
                    hint: Some(format!("expected under {}", template_root.display())),
                }
                .into());
            }
            println!();
            println!("  {}", style("copying template files:").dim());
            copy_dir_all(&template_dir, project_dir)?;
            println!("    {} {}", style("✓").green(), style("copied").dim());
            println!();
            Ok(())
        }
        Some(TemplateMode::HooksOnly) => Ok(()),
        None => Err(Error::Validation(
            "invalid template configuration: set one of command, dir, or hooks".to_string(),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_template, discover_templates};
    use crate::config::TemplateSpec;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn configured(name: &str, command: Option<&str>, dir: Option<&str>) -> TemplateSpec {
        TemplateSpec {
            name: name.to_string(),
            command: command.map(String::from),
            dir: dir.map(String::from),
            hooks: Vec::new(),
        }
    }

    #[test]
    fn discover_picks_up_local_template_directories() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("rust-cli")).expect("mkdir");
        fs::create_dir(tmp.path().join("web")).expect("mkdir");
        fs::write(tmp.path().join("stray-file"), "x").expect("write");

        let merged = discover_templates(tmp.path(), &BTreeMap::new()).expect("discover");
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["rust-cli"].dir.as_deref(), Some("rust-cli"));
        assert!(!merged.contains_key("stray-file"));
    }

    #[test]
    fn configured_template_replaces_implicit_one_wholesale() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("foo")).expect("mkdir");

        let mut cfg = BTreeMap::new();
        cfg.insert("foo".to_string(), configured("Foo (custom)", Some("cargo init"), None));

        let merged = discover_templates(tmp.path(), &cfg).expect("discover");
        let foo = &merged["foo"];
        assert_eq!(foo.name, "Foo (custom)");
        assert_eq!(foo.command.as_deref(), Some("cargo init"));
        // Full replacement: the implicit dir is gone, not merged in.
        assert!(foo.dir.is_none());
    }

    #[test]
    fn apply_directory_mode_merge_copies_with_overwrite() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path().join("templates");
        fs::create_dir_all(root.join("web/src")).expect("mkdir");
        fs::write(root.join("web/index.html"), "<html>").expect("write");
        fs::write(root.join("web/src/app.js"), "app").expect("write");

        let project = tmp.path().join("project");
        fs::create_dir_all(&project).expect("mkdir");
        fs::write(project.join("notes.md"), "mine").expect("write");

        let spec = configured("Web", None, Some("web"));
        apply_template(&spec, &root, &project).expect("apply");

        assert_eq!(fs::read_to_string(project.join("index.html")).expect("read"), "<html>");
        assert_eq!(fs::read_to_string(project.join("src/app.js")).expect("read"), "app");
        // Preexisting files not present in the template survive.
        assert_eq!(fs::read_to_string(project.join("notes.md")).expect("read"), "mine");
    }

    #[test]
    fn apply_missing_template_directory_fails() {
        let tmp = TempDir::new().expect("tmp");
        let project = tmp.path().join("project");
        let spec = configured("Ghost", None, Some("ghost"));

        let err = apply_template(&spec, tmp.path(), &project).expect_err("missing dir");
        assert!(err.to_string().contains("template directory not found"));
    }

    #[test]
    fn apply_shapeless_spec_fails_without_writing() {
        let tmp = TempDir::new().expect("tmp");
        let project = tmp.path().join("project");
        let spec = configured("Nothing", None, None);

        let err = apply_template(&spec, tmp.path(), &project).expect_err("invalid spec");
        assert!(err.to_string().contains("invalid template configuration"));
        // Directory creation is the only side effect.
        assert_eq!(fs::read_dir(&project).expect("read").count(), 0);
    }

    #[test]
    fn apply_hooks_only_spec_succeeds_trivially() {
        let tmp = TempDir::new().expect("tmp");
        let project = tmp.path().join("project");
        let spec = TemplateSpec {
            name: "Hooks".to_string(),
            command: None,
            dir: None,
            hooks: vec!["gitInit".to_string()],
        };
        apply_template(&spec, tmp.path(), &project).expect("apply");
        assert!(project.is_dir());
    }
}
