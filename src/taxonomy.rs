//! Root-level taxonomy key extraction.
//!
//! A key is recognized in two shapes, tried in this order:
//!
//! ```text
//! tags:                  tags: [python, "rust"]
//!   - python
//!   - "rust"
//! ```
//!
//! Only keys starting at column 0 count; nested keys are left alone. The
//! block form needs at least one indented `- item` line, so a bare `tags:`
//! (or one followed by a column-0 sequence) is not matched and stays where it
//! is. Terms are trimmed of whitespace and surrounding quote characters, and
//! empty terms are dropped.

use anyhow::{Context, Result};
use regex::Regex;
use std::ops::Range;

/// Matchers for one taxonomy key.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    key: String,
    block: Regex,
    inline: Regex,
}

/// A located key: the terms it held and the byte range it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub terms: Vec<String>,
    pub span: Range<usize>,
}

impl KeyPattern {
    pub fn new(key: &str) -> Result<Self> {
        let escaped = regex::escape(key);
        let block = Regex::new(&format!(r"(?m)^{escaped}:\s*\n((?:\s+-\s+.+\n)+)"))
            .with_context(|| format!("Failed to build block-list pattern for '{}'", key))?;
        let inline = Regex::new(&format!(r"(?m)^{escaped}:\s*\[([^\]]*)\]"))
            .with_context(|| format!("Failed to build inline-array pattern for '{}'", key))?;
        Ok(Self {
            key: key.to_string(),
            block,
            inline,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Find the key in `frontmatter`. Block-list form wins over inline form.
    pub fn extract(&self, frontmatter: &str) -> Option<Extraction> {
        if let Some(caps) = self.block.captures(frontmatter) {
            let whole = caps.get(0)?;
            let items = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            return Some(Extraction {
                terms: parse_block_items(items),
                span: whole.range(),
            });
        }

        let caps = self.inline.captures(frontmatter)?;
        let whole = caps.get(0)?;
        let items = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        Some(Extraction {
            terms: parse_inline_items(items),
            span: whole.range(),
        })
    }
}

fn parse_block_items(items: &str) -> Vec<String> {
    items
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix('-'))
        .filter_map(normalize_term)
        .collect()
}

fn parse_inline_items(items: &str) -> Vec<String> {
    if items.trim().is_empty() {
        return Vec::new();
    }
    items.split(',').filter_map(normalize_term).collect()
}

fn normalize_term(raw: &str) -> Option<String> {
    let term = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> KeyPattern {
        KeyPattern::new("tags").unwrap()
    }

    #[test]
    fn test_block_list() {
        let fm = "\ntitle: x\ntags:\n  - python\n  - \"rust\"\n  - 'go'\ndraft: false\n";
        let ext = tags().extract(fm).unwrap();
        assert_eq!(ext.terms, vec!["python", "rust", "go"]);
        assert_eq!(&fm[ext.span.clone()], "tags:\n  - python\n  - \"rust\"\n  - 'go'\n");
    }

    #[test]
    fn test_inline_array() {
        let fm = "\ntags: [a, \"b c\", 'd', ]\ntitle: x\n";
        let ext = tags().extract(fm).unwrap();
        assert_eq!(ext.terms, vec!["a", "b c", "d"]);
        assert_eq!(&fm[ext.span.clone()], "tags: [a, \"b c\", 'd', ]");
    }

    #[test]
    fn test_empty_inline_array() {
        let ext = tags().extract("\ntags: []\n").unwrap();
        assert!(ext.terms.is_empty());
    }

    #[test]
    fn test_bare_key_not_matched() {
        assert!(tags().extract("\ntags:\ntitle: x\n").is_none());
    }

    #[test]
    fn test_column_zero_sequence_not_matched() {
        assert!(tags().extract("\ntitle: x\ntags:\n- a\n- b\n").is_none());
    }

    #[test]
    fn test_nested_key_ignored() {
        let fm = "\nextra:\n  tags:\n    - a\n";
        assert!(tags().extract(fm).is_none());
    }

    #[test]
    fn test_similar_key_ignored() {
        assert!(tags().extract("\ntags_old: [a]\nmytags: [b]\n").is_none());
    }

    #[test]
    fn test_scalar_value_ignored() {
        assert!(tags().extract("\ntags: rust\n").is_none());
    }

    #[test]
    fn test_crlf_items_trimmed() {
        let fm = "\r\ntags:\r\n  - a\r\n  - b\r\n";
        let ext = tags().extract(fm).unwrap();
        assert_eq!(ext.terms, vec!["a", "b"]);
    }

    #[test]
    fn test_key_with_regex_metachar() {
        let p = KeyPattern::new("a.b").unwrap();
        assert!(p.extract("\naxb: [x]\n").is_none());
        assert_eq!(p.extract("\na.b: [x]\n").unwrap().terms, vec!["x"]);
    }
}
