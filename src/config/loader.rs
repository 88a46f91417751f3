//! Config file loading

use crate::config::Config;
use crate::error::Error;
use crate::utils::paths::Workspace;
use anyhow::{Context, Result};
use std::fs;

/// Default configuration written by `pj config` on first use.
pub const DEFAULT_CONFIG: &str = include_str!("default.yaml");

pub fn load_config(workspace: &Workspace) -> Result<Config> {
    if !workspace.config_file.exists() {
        return Err(Error::ConfigMissing { path: workspace.config_file.clone() }.into());
    }

    let content = fs::read_to_string(&workspace.config_file)
        .with_context(|| format!("failed reading {}", workspace.config_file.display()))?;

    let config: Config = serde_yaml::from_str(&content)
        .map_err(|e| Error::ConfigParse { reason: e.to_string() })?;

    config.validate()?;
    Ok(config)
}

/// Write the embedded default config if none exists. Returns whether a file
/// was written.
pub fn seed_default_config(workspace: &Workspace) -> Result<bool> {
    if workspace.config_file.exists() {
        return Ok(false);
    }
    fs::write(&workspace.config_file, DEFAULT_CONFIG)
        .with_context(|| format!("failed writing {}", workspace.config_file.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{load_config, seed_default_config};
    use crate::error::Error;
    use crate::utils::paths::Workspace;
    use std::fs;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Workspace) {
        let tmp = TempDir::new().expect("tmp");
        let ws = Workspace::at(tmp.path().to_path_buf());
        ws.ensure_initialized().expect("init");
        (tmp, ws)
    }

    #[test]
    fn missing_config_is_a_domain_error() {
        let (_tmp, ws) = workspace();
        let err = load_config(&ws).expect_err("missing config must fail");
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::ConfigMissing { .. })));
    }

    #[test]
    fn seeded_default_config_parses_and_validates() {
        let (_tmp, ws) = workspace();
        assert!(seed_default_config(&ws).expect("seed"));
        // A second seed is a no-op.
        assert!(!seed_default_config(&ws).expect("seed again"));

        let config = load_config(&ws).expect("load");
        assert!(!config.ide.is_empty());
        assert!(config.templates.contains_key("empty"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let (_tmp, ws) = workspace();
        fs::write(&ws.config_file, "ide: [unclosed").expect("write");
        let err = load_config(&ws).expect_err("bad yaml must fail");
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::ConfigParse { .. })));
    }

    #[test]
    fn template_without_shape_fails_validation() {
        let (_tmp, ws) = workspace();
        fs::write(
            &ws.config_file,
            "ide: code\ntemplates:\n  broken:\n    name: Broken\n",
        )
        .expect("write");
        let err = load_config(&ws).expect_err("shapeless template must fail");
        assert!(err.to_string().contains("broken"));
    }
}
