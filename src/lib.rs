//! # taxonomize
//!
//! Rewrites markdown frontmatter so that root-level `tags` / `categories`
//! lists live under a `taxonomies:` mapping, the layout Zola expects for
//! content migrated from Hugo.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌─────────────┐   ┌───────────┐
//! │   walk   │──▶│ frontmatter│──▶│  taxonomy   │──▶│  convert  │
//! │ *.md     │   │ split/join │   │ block/inline│   │ relocate  │
//! └──────────┘   └────────────┘   └─────────────┘   └─────┬─────┘
//!                                                         ▼
//!                                                   ┌───────────┐
//!                                                   │    run    │
//!                                                   │ write back│
//!                                                   └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! taxonomize ./content                 # convert in place
//! taxonomize ./content --dry-run       # report only
//! taxonomize ./content --config taxonomize.toml
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Optional TOML configuration |
//! | [`models`] | Core data types |
//! | [`frontmatter`] | Delimiter detection |
//! | [`taxonomy`] | Key extraction (block-list and inline-array) |
//! | [`convert`] | The frontmatter converter |
//! | [`walk`] | Markdown file discovery |
//! | [`run`] | Batch conversion and write-back |
//! | [`progress`] | Progress reporting on stderr |

pub mod config;
pub mod convert;
pub mod frontmatter;
pub mod models;
pub mod progress;
pub mod run;
pub mod taxonomy;
pub mod walk;

pub use convert::{convert, convert_with, ConvertOptions};
