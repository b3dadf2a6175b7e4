//! Markdown file discovery.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::WalkConfig;

/// A markdown file found under the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownFile {
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated on every platform.
    pub relative: String,
}

/// Check that `root` exists and is a directory.
fn check_root(root: &Path) -> Result<()> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    Ok(())
}

/// Enumerate files under `root` that match the include globs and none of the
/// exclude globs, in file-name order.
///
/// Unreadable entries are reported on stderr and skipped.
pub fn scan_markdown(root: &Path, walk: &WalkConfig) -> Result<Vec<MarkdownFile>> {
    check_root(root)?;

    let include_set = build_globset(&walk.include_globs)?;
    let exclude_set = build_globset(&walk.exclude_globs)?;

    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(walk.follow_symlinks)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Warning: skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        files.push(MarkdownFile {
            path: path.to_path_buf(),
            relative: rel_str,
        });
    }

    Ok(files)
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
