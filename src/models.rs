//! Core data types that flow through a conversion.
//!
//! A [`Document`] is the split view of a markdown file, a [`Taxonomy`] is one
//! relocated key with its terms, and [`Taxonomies`] renders the synthesized
//! `taxonomies:` block.

/// A markdown file split at its frontmatter delimiters.
///
/// `frontmatter` is the raw text between the first and second `---`
/// (including the newline that follows the opening marker); `body` is
/// everything after the closing marker, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    pub frontmatter: &'a str,
    pub body: &'a str,
}

/// A single taxonomy pulled out of the root of the frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub key: String,
    pub terms: Vec<String>,
}

/// The derived `taxonomies:` section, in configured key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomies {
    pub entries: Vec<Taxonomy>,
}

impl Taxonomies {
    /// Add a taxonomy. Entries without terms are dropped.
    pub fn push(&mut self, taxonomy: Taxonomy) {
        if !taxonomy.terms.is_empty() {
            self.entries.push(taxonomy);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a YAML block, starting with `newline` so it can be appended
    /// directly to trimmed frontmatter text.
    pub fn render(&self, quote_values: bool, newline: &str) -> String {
        let mut out = format!("{newline}taxonomies:{newline}");
        for entry in &self.entries {
            out.push_str("  ");
            out.push_str(&entry.key);
            out.push(':');
            out.push_str(newline);
            for term in &entry.terms {
                out.push_str("    - ");
                if quote_values {
                    out.push_str(&quote(term));
                } else {
                    out.push_str(term);
                }
                out.push_str(newline);
            }
        }
        out
    }
}

fn quote(term: &str) -> String {
    let mut quoted = String::with_capacity(term.len() + 2);
    quoted.push('"');
    for c in term.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Why a document came back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkipReason {
    /// Content does not start with `---`.
    NoFrontmatter,
    /// Opening `---` has no closing counterpart.
    Unterminated,
    /// Frontmatter already contains `taxonomies:`.
    AlreadyConverted,
    /// None of the configured keys yielded any terms.
    NoTaxonomies,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoFrontmatter => "no frontmatter",
            SkipReason::Unterminated => "unterminated frontmatter",
            SkipReason::AlreadyConverted => "already has taxonomies",
            SkipReason::NoTaxonomies => "no taxonomy keys",
        }
    }
}

/// Result of running the converter over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Converted(String),
    Unchanged(SkipReason),
}

impl Conversion {
    /// The text to write back, or `original` when nothing changed.
    pub fn into_text(self, original: &str) -> String {
        match self {
            Conversion::Converted(text) => text,
            Conversion::Unchanged(_) => original.to_string(),
        }
    }
}

/// What happened to a single file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Converted,
    Unchanged(SkipReason),
}

impl FileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOutcome::Converted => "converted",
            FileOutcome::Unchanged(reason) => reason.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax(key: &str, terms: &[&str]) -> Taxonomy {
        Taxonomy {
            key: key.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_quoted() {
        let mut t = Taxonomies::default();
        t.push(tax("tags", &["python", "rust"]));
        t.push(tax("categories", &["programming"]));
        assert_eq!(
            t.render(true, "\n"),
            "\ntaxonomies:\n  tags:\n    - \"python\"\n    - \"rust\"\n  categories:\n    - \"programming\"\n"
        );
    }

    #[test]
    fn test_render_bare() {
        let mut t = Taxonomies::default();
        t.push(tax("categories", &["web dev"]));
        assert_eq!(t.render(false, "\n"), "\ntaxonomies:\n  categories:\n    - web dev\n");
    }

    #[test]
    fn test_render_crlf() {
        let mut t = Taxonomies::default();
        t.push(tax("tags", &["a"]));
        assert_eq!(t.render(false, "\r\n"), "\r\ntaxonomies:\r\n  tags:\r\n    - a\r\n");
    }

    #[test]
    fn test_empty_terms_dropped() {
        let mut t = Taxonomies::default();
        t.push(tax("tags", &[]));
        assert!(t.is_empty());
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
    }
}
