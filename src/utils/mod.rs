//! Shared helpers: path layout, terminal output, filesystem operations.

pub mod paths;
pub mod ui;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Recursively copy `source` into `target`, overwriting files that already
/// exist. Files present in `target` but not in `source` are left untouched
/// (merge-copy, not clean-then-copy).
pub fn copy_dir_all(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)
        .with_context(|| format!("failed creating {}", target.display()))?;
    for entry in fs::read_dir(source)
        .with_context(|| format!("failed reading {}", source.display()))?
    {
        let entry = entry?;
        let dest = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("failed copying {}", entry.path().display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::copy_dir_all;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn copy_dir_all_merges_and_overwrites() {
        let tmp = TempDir::new().expect("tmp");
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(src.join("nested")).expect("mkdir");
        fs::write(src.join("a.txt"), "new").expect("write");
        fs::write(src.join("nested/b.txt"), "b").expect("write");
        fs::create_dir_all(&dst).expect("mkdir dst");
        fs::write(dst.join("a.txt"), "old").expect("write");
        fs::write(dst.join("keep.txt"), "keep").expect("write");

        copy_dir_all(&src, &dst).expect("copy");

        assert_eq!(fs::read_to_string(dst.join("a.txt")).expect("read"), "new");
        assert_eq!(fs::read_to_string(dst.join("nested/b.txt")).expect("read"), "b");
        assert_eq!(fs::read_to_string(dst.join("keep.txt")).expect("read"), "keep");
    }
}
