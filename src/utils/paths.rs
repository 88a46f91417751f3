//! Fixed root directory layout.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding everything projectory manages.
pub const ROOT_DIR_NAME: &str = ".projectory";

/// Resolved paths of the fixed root and its subdirectories.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub meta_file: PathBuf,
    pub projects_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub hooks_dir: PathBuf,
}

impl Workspace {
    /// Resolve the root from `PROJECTORY_HOME` (test/CI override) or the
    /// user's home directory.
    pub fn resolve() -> Result<Self> {
        if let Some(root) = std::env::var_os("PROJECTORY_HOME") {
            return Ok(Self::at(PathBuf::from(root)));
        }
        let home = dirs::home_dir().context("could not determine the home directory")?;
        Ok(Self::at(home.join(ROOT_DIR_NAME)))
    }

    pub fn at(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            meta_file: root.join("meta.json"),
            projects_dir: root.join("projects"),
            templates_dir: root.join("templates"),
            hooks_dir: root.join("hooks"),
            root,
        }
    }

    /// Create the root directory tree. Safe to call on every invocation.
    pub fn ensure_initialized(&self) -> Result<()> {
        for dir in [&self.root, &self.projects_dir, &self.templates_dir, &self.hooks_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed creating {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn project_path(&self, name: &str) -> PathBuf {
        self.projects_dir.join(name)
    }
}

/// Convert backslashes to forward slashes so relative paths compare and
/// render the same on every platform.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use std::path::PathBuf;

    #[test]
    fn workspace_layout_hangs_off_root() {
        let ws = Workspace::at(PathBuf::from("/tmp/proot"));
        assert_eq!(ws.config_file, PathBuf::from("/tmp/proot/config.yaml"));
        assert_eq!(ws.meta_file, PathBuf::from("/tmp/proot/meta.json"));
        assert_eq!(ws.project_path("demo"), PathBuf::from("/tmp/proot/projects/demo"));
        assert_eq!(ws.templates_dir, PathBuf::from("/tmp/proot/templates"));
        assert_eq!(ws.hooks_dir, PathBuf::from("/tmp/proot/hooks"));
    }

    #[test]
    fn ensure_initialized_creates_the_tree() {
        let tmp = tempfile::TempDir::new().expect("tmp");
        let ws = Workspace::at(tmp.path().join("root"));
        ws.ensure_initialized().expect("init");
        assert!(ws.projects_dir.is_dir());
        assert!(ws.templates_dir.is_dir());
        assert!(ws.hooks_dir.is_dir());
    }
}
