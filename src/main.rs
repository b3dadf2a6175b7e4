//! # taxonomize CLI
//!
//! Converts Hugo-style frontmatter (root-level `tags` / `categories`) in every
//! markdown file under a directory to Zola's nested `taxonomies:` layout, in
//! place.
//!
//! ## Usage
//!
//! ```bash
//! taxonomize [--config <file.toml>] [--dry-run] [--progress off|human|json] <directory>
//! ```
//!
//! Exit status is 1 when the directory is missing or invalid. Individual file
//! failures are reported on stderr and do not change the exit status.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use taxonomize::config;
use taxonomize::progress::ProgressMode;
use taxonomize::run;

/// Move root-level tags/categories in markdown frontmatter under `taxonomies:`.
#[derive(Parser)]
#[command(
    name = "taxonomize",
    version,
    about = "Move root-level tags/categories in markdown frontmatter under `taxonomies:`",
    long_about = "Walks a directory recursively, and for every markdown file whose frontmatter \
    has root-level `tags` or `categories` (block-list or inline-array form), rewrites the file \
    so those lists live under a `taxonomies:` mapping. Files that already have `taxonomies:` \
    or have no frontmatter are left byte-identical."
)]
struct Cli {
    /// Directory to convert, searched recursively.
    directory: Option<PathBuf>,

    /// Optional configuration file (TOML).
    ///
    /// Selects which keys are relocated, the quoting style, and which files
    /// are visited. Without it, `tags` and `categories` in `**/*.md` are
    /// converted with quoted values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report what would change without writing any file.
    #[arg(long)]
    dry_run: bool,

    /// Progress on stderr. Defaults to `human` when stderr is a terminal,
    /// otherwise `off`.
    #[arg(long, value_enum)]
    progress: Option<ProgressMode>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(directory) = cli.directory else {
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    };

    let cfg = config::load_or_default(cli.config.as_deref())?;
    let mode = cli.progress.unwrap_or_else(ProgressMode::default_for_tty);
    let reporter = mode.reporter();

    run::run_convert(&directory, &cfg, cli.dry_run, reporter.as_ref())?;

    Ok(())
}
