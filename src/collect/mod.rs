//! Project file collection for template snapshots.
//!
//! Git's own view of tracked and untracked-but-not-ignored files is the
//! source of truth whenever it is available: it honors nested `.gitignore`
//! files and global excludes that a hand-rolled walker cannot cheaply
//! replicate. A temporary `git init` extends that to un-initialized
//! projects that ship a `.gitignore`; the manual walk with a fixed ignore
//! list is the last resort.

use crate::error::Error;
use crate::shell;
use crate::utils::paths::normalize_path;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const GIT_LS_FILES: &str = "git ls-files --cached --others --exclude-standard";

/// Ignore list for the manual fallback walk. Coarser than real gitignore
/// semantics on purpose.
const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    ".next",
    ".nuxt",
    ".output",
    "coverage",
    ".vscode",
    ".idea",
    "*.log",
    ".DS_Store",
    "Thumbs.db",
];

fn is_git_repo(dir: &Path) -> bool {
    dir.join(".git").exists()
}

fn has_valid_gitignore(dir: &Path) -> bool {
    match fs::read_to_string(dir.join(".gitignore")) {
        Ok(content) => !content.trim().is_empty(),
        Err(_) => false,
    }
}

fn split_file_list(stdout: &str) -> Vec<String> {
    stdout.lines().map(str::trim).filter(|line| !line.is_empty()).map(String::from).collect()
}

/// Collect the relative paths of every regular file that belongs in a
/// template snapshot of `source`.
pub fn collect_project_files(source: &Path) -> Result<Vec<String>> {
    // Existing repository: ask git directly.
    if is_git_repo(source) {
        let output = shell::run_captured(GIT_LS_FILES, source)?;
        if !output.success {
            return Err(Error::ChildProcess("cannot get git file list".to_string()).into());
        }
        return Ok(split_file_list(&output.stdout));
    }

    // No repository, but a usable .gitignore: initialize git just long
    // enough to run ls-files, then drop the .git directory we created.
    if has_valid_gitignore(source) {
        let init = shell::run_captured("git init", source)?;
        if !init.success {
            return Err(Error::ChildProcess("git init failed".to_string()).into());
        }

        let result = shell::run_captured(GIT_LS_FILES, source);

        // The .git directory is ours; best-effort removal before returning
        // on every path.
        let _ = fs::remove_dir_all(source.join(".git"));

        let output = result?;
        if !output.success {
            return Err(Error::ChildProcess("cannot get git file list".to_string()).into());
        }
        return Ok(split_file_list(&output.stdout));
    }

    collect_by_walking(source)
}

static WILDCARD_IGNORES: Lazy<GlobSet> = Lazy::new(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORES.iter().filter(|p| p.contains('*')) {
        builder.add(Glob::new(pattern).unwrap());
    }
    builder.build().unwrap()
});

fn is_ignored(name: &OsStr) -> bool {
    let Some(name) = name.to_str() else {
        return false;
    };
    DEFAULT_IGNORES.iter().filter(|p| !p.contains('*')).any(|p| *p == name)
        || WILDCARD_IGNORES.is_match(name)
}

/// Manual recursive walk. Ignored directories are pruned, not descended
/// into; entries are visited in name order so repeated collections agree.
fn collect_by_walking(source: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry.file_name()));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(source)?;
            files.push(normalize_path(relative));
        }
    }

    Ok(files)
}

/// Mirror the collected relative paths from `source` into `target`,
/// creating parent directories as needed.
pub fn copy_files(source: &Path, target: &Path, files: &[String]) -> Result<()> {
    fs::create_dir_all(target)
        .with_context(|| format!("failed creating {}", target.display()))?;
    for file in files {
        let src = source.join(file);
        let dest = target.join(file);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating {}", parent.display()))?;
        }
        fs::copy(&src, &dest)
            .with_context(|| format!("failed copying {}", src.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{collect_project_files, copy_files};
    use crate::shell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn git_available(dir: &Path) -> bool {
        shell::run_captured("git --version", dir).map(|o| o.success).unwrap_or(false)
    }

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    #[test]
    fn manual_walk_applies_the_default_ignore_list() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), "src/index.ts", "export {}");
        write(tmp.path(), "node_modules/pkg/index.js", "module.exports = {}");
        write(tmp.path(), "app.log", "log line");

        let files = collect_project_files(tmp.path()).expect("collect");
        assert_eq!(files, vec!["src/index.ts".to_string()]);
    }

    #[test]
    fn manual_walk_prunes_ignored_directories_entirely() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), "dist/deep/nested/out.js", "x");
        write(tmp.path(), "keep.txt", "x");

        let files = collect_project_files(tmp.path()).expect("collect");
        assert_eq!(files, vec!["keep.txt".to_string()]);
    }

    #[test]
    fn manual_walk_is_idempotent_and_ordered() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), "b.txt", "b");
        write(tmp.path(), "a.txt", "a");
        write(tmp.path(), "sub/c.txt", "c");

        let first = collect_project_files(tmp.path()).expect("collect");
        let second = collect_project_files(tmp.path()).expect("collect");
        assert_eq!(first, second);
        assert_eq!(first, vec!["a.txt".to_string(), "b.txt".to_string(), "sub/c.txt".to_string()]);
    }

    #[test]
    fn git_repo_collection_respects_gitignore() {
        let tmp = TempDir::new().expect("tmp");
        if !git_available(tmp.path()) {
            return;
        }
        write(tmp.path(), "a.txt", "a");
        write(tmp.path(), "b/c.txt", "c");
        write(tmp.path(), "node_modules/x.js", "x");
        write(tmp.path(), ".gitignore", "node_modules/\n");
        shell::run_captured("git init", tmp.path()).expect("git init");

        let mut files = collect_project_files(tmp.path()).expect("collect");
        files.sort();
        assert_eq!(
            files,
            vec![".gitignore".to_string(), "a.txt".to_string(), "b/c.txt".to_string()]
        );
    }

    #[test]
    fn temporary_git_init_is_cleaned_up() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), "src/main.rs", "fn main() {}");
        write(tmp.path(), "dist/out.js", "x");
        write(tmp.path(), ".gitignore", "dist/\n");

        // Whether ls-files succeeded or not, no .git directory may remain.
        let result = collect_project_files(tmp.path());
        assert!(!tmp.path().join(".git").exists());

        if git_available(tmp.path()) {
            let mut files = result.expect("collect");
            files.sort();
            assert_eq!(
                files,
                vec![".gitignore".to_string(), "src/main.rs".to_string()]
            );
        }
    }

    #[test]
    fn copy_files_mirrors_relative_paths() {
        let tmp = TempDir::new().expect("tmp");
        let source = tmp.path().join("source");
        let target = tmp.path().join("target");
        write(&source, "a.txt", "a");
        write(&source, "b/c.txt", "c");

        copy_files(
            &source,
            &target,
            &["a.txt".to_string(), "b/c.txt".to_string()],
        )
        .expect("copy");

        assert_eq!(fs::read_to_string(target.join("a.txt")).expect("read"), "a");
        assert_eq!(fs::read_to_string(target.join("b/c.txt")).expect("read"), "c");
    }
}
