//! Batch conversion over a directory tree.
//!
//! Walks the root, converts each markdown file, and writes back only files
//! whose text changed. A failure on one file is reported on stderr and
//! counted; the rest of the batch still runs. Only an invalid root aborts.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::convert::{convert_with, ConvertOptions};
use crate::models::{Conversion, FileOutcome, SkipReason};
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::walk::{self, MarkdownFile};

/// Counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: u64,
    pub converted: u64,
    pub failed: u64,
    pub unchanged: BTreeMap<SkipReason, u64>,
}

impl RunSummary {
    pub fn unchanged_total(&self) -> u64 {
        self.unchanged.values().sum()
    }
}

/// Convert every matching file under `root`.
///
/// With `dry_run`, files are converted in memory only.
pub fn run_convert(
    root: &Path,
    config: &Config,
    dry_run: bool,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary> {
    let options = config.convert_options()?;

    let files = walk::scan_markdown(root, &config.walk)?;
    let total = files.len();
    progress.report(ProgressEvent::Scanned { root, total });

    let mut summary = RunSummary::default();

    for (i, file) in files.iter().enumerate() {
        summary.scanned += 1;
        let result = process_file(file, &options, dry_run);
        match &result {
            Ok(FileOutcome::Converted) => {
                summary.converted += 1;
                if dry_run {
                    println!("Would convert: {}", file.path.display());
                } else {
                    println!("Converted: {}", file.path.display());
                }
            }
            Ok(FileOutcome::Unchanged(reason)) => {
                *summary.unchanged.entry(*reason).or_insert(0) += 1;
            }
            Err(e) => {
                summary.failed += 1;
                eprintln!("Error processing {}: {:#}", file.path.display(), e);
            }
        }
        progress.report(ProgressEvent::File {
            n: i + 1,
            total,
            path: &file.relative,
            outcome: result.ok(),
        });
    }

    print_summary(&summary, dry_run);
    Ok(summary)
}

/// Read, convert, and (unless `dry_run`) write back a single file.
pub fn process_file(
    file: &MarkdownFile,
    options: &ConvertOptions,
    dry_run: bool,
) -> Result<FileOutcome> {
    let content = fs::read_to_string(&file.path)
        .with_context(|| format!("Failed to read {}", file.relative))?;

    match convert_with(&content, options) {
        Conversion::Converted(converted) if converted != content => {
            if !dry_run {
                fs::write(&file.path, converted)
                    .with_context(|| format!("Failed to write {}", file.relative))?;
            }
            Ok(FileOutcome::Converted)
        }
        Conversion::Converted(_) => Ok(FileOutcome::Unchanged(SkipReason::NoTaxonomies)),
        Conversion::Unchanged(reason) => Ok(FileOutcome::Unchanged(reason)),
    }
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    println!("  scanned: {}", summary.scanned);
    println!("  unchanged: {}", summary.unchanged_total());
    for (reason, count) in &summary.unchanged {
        println!("    {}: {}", reason.as_str(), count);
    }
    if summary.failed > 0 {
        println!("  failed: {}", summary.failed);
    }
    if dry_run {
        println!("Would convert {} files", summary.converted);
    } else {
        println!("Converted {} files", summary.converted);
    }
}
