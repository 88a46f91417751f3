//! Project metadata persistence and project listing.
//!
//! `meta.json` is a single document mapping project name to its originating
//! template and creation time. Read-modify-write on every mutation; the
//! short-lived single-process CLI makes locking unnecessary.

use crate::utils::paths::Workspace;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    pub fn new(workspace: &Workspace) -> Self {
        Self { path: workspace.meta_file.clone() }
    }

    /// A missing or corrupt metadata file reads as an empty store.
    pub fn load(&self) -> Metadata {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Metadata::default();
        };
        match serde_json::from_str(&content) {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!("ignoring unreadable metadata file {}: {err}", self.path.display());
                Metadata::default()
            }
        }
    }

    fn save(&self, metadata: &Metadata) -> Result<()> {
        let json = serde_json::to_string_pretty(metadata)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed writing {}", self.path.display()))?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<ProjectRecord> {
        self.load().projects.get(name).cloned()
    }

    /// Upsert a project record. `created_at` is set once and preserved by
    /// later saves; passing no template keeps whatever was stored.
    pub fn record(&self, name: &str, template: Option<&str>) -> Result<()> {
        let mut metadata = self.load();
        let existing = metadata.projects.get(name);
        let record = ProjectRecord {
            template: template
                .map(String::from)
                .or_else(|| existing.and_then(|r| r.template.clone())),
            created_at: existing.map(|r| r.created_at).unwrap_or_else(Utc::now),
        };
        metadata.projects.insert(name.to_string(), record);
        self.save(&metadata)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let mut metadata = self.load();
        metadata.projects.remove(name);
        self.save(&metadata)
    }

    /// Bulk clear, used by `delete all` regardless of per-project outcomes.
    pub fn clear(&self) -> Result<()> {
        self.save(&Metadata::default())
    }

    /// Write an empty document if none exists, so the file can be opened in
    /// an editor. Returns whether a file was written.
    pub fn seed_empty(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&Metadata::default())?;
        Ok(true)
    }
}

/// A managed project directory joined with its metadata record.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub name: String,
    pub path: PathBuf,
    pub template: Option<String>,
    pub modified_at: DateTime<Utc>,
}

/// All project directories under the projects root, most recently modified
/// first.
pub fn list_projects(workspace: &Workspace) -> Result<Vec<ProjectInfo>> {
    if !workspace.projects_dir.is_dir() {
        return Ok(Vec::new());
    }

    let metadata = MetadataStore::new(workspace).load();
    let mut projects = Vec::new();

    for entry in fs::read_dir(&workspace.projects_dir)
        .with_context(|| format!("failed reading {}", workspace.projects_dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(String::from) else {
            continue;
        };
        let path = entry.path();
        let modified_at = entry
            .metadata()?
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        let template = metadata.projects.get(&name).and_then(|r| r.template.clone());
        projects.push(ProjectInfo { name, path, template, modified_at });
    }

    projects.sort_by(|a, b| b.modified_at.cmp(&a.modified_at).then_with(|| a.name.cmp(&b.name)));
    Ok(projects)
}

pub fn project_exists(workspace: &Workspace, name: &str) -> bool {
    workspace.project_path(name).exists()
}

const ILLEGAL_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Validate a prospective project name. The error string is suitable for
/// direct display in prompts.
pub fn validate_project_name(workspace: &Workspace, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("project name cannot be empty".to_string());
    }
    if name.contains(ILLEGAL_NAME_CHARS) {
        return Err("project name contains illegal characters".to_string());
    }
    if name.starts_with('.') || name.starts_with(' ') || name.ends_with(' ') {
        return Err("project name cannot start with a dot or start/end with a space".to_string());
    }
    if project_exists(workspace, name) {
        return Err(format!("project already exists: {name}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{list_projects, validate_project_name, MetadataStore};
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
    fn record_round_trips_template_key() {
        let (_tmp, ws) = workspace();
        let store = MetadataStore::new(&ws);
        store.record("api", Some("rust-cli")).expect("save");
        assert_eq!(store.get("api").expect("record").template.as_deref(), Some("rust-cli"));
    }

    #[test]
    fn later_save_preserves_template_and_created_at() {
        let (_tmp, ws) = workspace();
        let store = MetadataStore::new(&ws);
        store.record("api", Some("rust-cli")).expect("save");
        let first = store.get("api").expect("record");

        store.record("api", None).expect("save again");
        let second = store.get("api").expect("record");
        assert_eq!(second.template.as_deref(), Some("rust-cli"));
        assert_eq!(second.created_at, first.created_at);
    }

    #[test]
    fn remove_and_clear_drop_records() {
        let (_tmp, ws) = workspace();
        let store = MetadataStore::new(&ws);
        store.record("a", None).expect("save");
        store.record("b", None).expect("save");

        store.remove("a").expect("remove");
        assert!(store.get("a").is_none());

        store.clear().expect("clear");
        assert!(store.load().projects.is_empty());
    }

    #[test]
    fn corrupt_metadata_reads_as_empty() {
        let (_tmp, ws) = workspace();
        fs::write(&ws.meta_file, "{not json").expect("write");
        let store = MetadataStore::new(&ws);
        assert!(store.load().projects.is_empty());
    }

    #[test]
    fn validate_rejects_illegal_and_duplicate_names() {
        let (_tmp, ws) = workspace();
        for bad in ["", "  ", "a/b", "a\\b", "a:b", "a*b", "a?b", "a<b", "a>b", "a|b", "a\"b"] {
            assert!(validate_project_name(&ws, bad).is_err(), "{bad:?} should be invalid");
        }
        assert!(validate_project_name(&ws, ".hidden").is_err());
        assert!(validate_project_name(&ws, " padded").is_err());
        assert!(validate_project_name(&ws, "padded ").is_err());

        fs::create_dir(ws.project_path("taken")).expect("mkdir");
        let err = validate_project_name(&ws, "taken").expect_err("duplicate");
        assert!(err.contains("already exists"));

        assert!(validate_project_name(&ws, "fresh-name").is_ok());
    }

    #[test]
    fn listing_joins_metadata_and_sorts_by_mtime() {
        let (_tmp, ws) = workspace();
        fs::create_dir(ws.project_path("alpha")).expect("mkdir");
        fs::create_dir(ws.project_path("beta")).expect("mkdir");
        let store = MetadataStore::new(&ws);
        store.record("alpha", Some("rust-cli")).expect("save");

        let projects = list_projects(&ws).expect("list");
        assert_eq!(projects.len(), 2);
        let alpha = projects.iter().find(|p| p.name == "alpha").expect("alpha");
        assert_eq!(alpha.template.as_deref(), Some("rust-cli"));
        let beta = projects.iter().find(|p| p.name == "beta").expect("beta");
        assert!(beta.template.is_none());
    }
}
