//! The frontmatter converter.
//!
//! Moves root-level taxonomy keys (by default `tags` and `categories`) under a
//! synthesized `taxonomies:` mapping at the end of the frontmatter:
//!
//! ```text
//! ---                         ---
//! title: "Post"               title: "Post"
//! tags:                       taxonomies:
//!   - python         ──▶        tags:
//!   - rust                        - "python"
//! categories: [programming]       - "rust"
//! ---                           categories:
//!                                 - "programming"
//!                             ---
//! ```
//!
//! Frontmatter written with `\r\n` line endings gets a `\r\n`-terminated
//! `taxonomies:` block, so converted files keep a single line-ending style.
//!
//! Conversion is a pure text transform and never fails: anything it does not
//! recognize comes back unchanged. Running it twice is the same as running it
//! once, because frontmatter that already mentions `taxonomies:` is skipped.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::frontmatter;
use crate::models::{Conversion, SkipReason, Taxonomies, Taxonomy};
use crate::taxonomy::KeyPattern;

/// Key that marks a document as already converted.
pub const TAXONOMIES_KEY: &str = "taxonomies";

/// Keys relocated when no configuration says otherwise.
pub const DEFAULT_KEYS: [&str; 2] = ["tags", "categories"];

static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n){3,}").expect("valid blank run regex"));

static DEFAULT_OPTIONS: Lazy<ConvertOptions> = Lazy::new(|| {
    ConvertOptions::new(&DEFAULT_KEYS.map(String::from), true).expect("valid default keys")
});

/// Which keys to relocate and how to emit their terms.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    keys: Vec<KeyPattern>,
    quote_values: bool,
}

impl ConvertOptions {
    /// Build options for `keys`, in output order.
    pub fn new(keys: &[String], quote_values: bool) -> Result<Self> {
        if keys.is_empty() {
            bail!("at least one taxonomy key is required");
        }
        let keys = keys
            .iter()
            .map(|k| KeyPattern::new(k))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys, quote_values })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|p| p.key())
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        DEFAULT_OPTIONS.clone()
    }
}

/// Convert with the default keys and quoting. Returns `content` unchanged
/// when there is nothing to do.
pub fn convert(content: &str) -> String {
    convert_with(content, &DEFAULT_OPTIONS).into_text(content)
}

/// Convert with explicit options, reporting why nothing changed if so.
pub fn convert_with(content: &str, options: &ConvertOptions) -> Conversion {
    let doc = match frontmatter::split(content) {
        Ok(doc) => doc,
        Err(reason) => return Conversion::Unchanged(reason),
    };

    if doc.frontmatter.contains("taxonomies:") {
        return Conversion::Unchanged(SkipReason::AlreadyConverted);
    }

    let mut fm = doc.frontmatter.to_string();
    let mut taxonomies = Taxonomies::default();

    for pattern in &options.keys {
        if let Some(extraction) = pattern.extract(&fm) {
            fm.replace_range(extraction.span, "");
            taxonomies.push(Taxonomy {
                key: pattern.key().to_string(),
                terms: extraction.terms,
            });
        }
    }

    if taxonomies.is_empty() {
        return Conversion::Unchanged(SkipReason::NoTaxonomies);
    }

    let newline = if doc.frontmatter.contains("\r\n") { "\r\n" } else { "\n" };
    let collapsed = BLANK_RUN_RE.replace_all(&fm, newline.repeat(2));
    let mut fm = collapsed.trim_end().to_string();
    fm.push_str(&taxonomies.render(options.quote_values, newline));

    Conversion::Converted(frontmatter::join(&fm, doc.body))
}
