//! Per-file progress on stderr.
//!
//! Stdout carries the `Converted: …` lines and the run summary; everything
//! here goes to stderr so the two streams can be consumed separately.
//!
//! ```text
//! scan ./content  5 markdown files
//! convert 1/5 about.md converted
//! convert 2/5 blog/post.md already has taxonomies
//! convert 3/5 notes/broken.md failed
//! ```

use serde_json::json;
use std::io::Write;
use std::path::Path;

use crate::models::FileOutcome;

#[derive(Clone, Copy, Debug)]
pub enum ProgressEvent<'a> {
    /// Discovery finished with `total` candidate files.
    Scanned { root: &'a Path, total: usize },
    /// File `n` of `total` was handled. `outcome` is `None` when it failed.
    File {
        n: usize,
        total: usize,
        path: &'a str,
        outcome: Option<FileOutcome>,
    },
}

pub trait ProgressReporter {
    fn report(&self, event: ProgressEvent<'_>);
}

fn status_label(outcome: Option<FileOutcome>) -> &'static str {
    outcome.map(|o| o.as_str()).unwrap_or("failed")
}

/// One readable line per event.
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ProgressEvent<'_>) {
        let line = match event {
            ProgressEvent::Scanned { root, total } => {
                format!("scan {}  {} markdown files", root.display(), total)
            }
            ProgressEvent::File {
                n,
                total,
                path,
                outcome,
            } => format!("convert {}/{} {} {}", n, total, path, status_label(outcome)),
        };
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

/// One JSON object per line, for wrappers and CI logs.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent<'_>) {
        let obj = match event {
            ProgressEvent::Scanned { root, total } => json!({
                "event": "scan",
                "root": root.display().to_string(),
                "total": total
            }),
            ProgressEvent::File {
                n,
                total,
                path,
                outcome,
            } => {
                let (status, reason) = match outcome {
                    Some(FileOutcome::Converted) => ("converted", None),
                    Some(FileOutcome::Unchanged(r)) => ("unchanged", Some(r.as_str())),
                    None => ("failed", None),
                };
                json!({
                    "event": "file",
                    "n": n,
                    "total": total,
                    "path": path,
                    "status": status,
                    "reason": reason
                })
            }
        };
        let _ = writeln!(std::io::stderr().lock(), "{}", obj);
    }
}

pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent<'_>) {}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// `Human` on an interactive stderr, `Off` when it is piped or redirected.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
