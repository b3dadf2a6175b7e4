//! Frontmatter delimiting.
//!
//! A document has frontmatter only when it begins with `---` and a later
//! line also begins with `---`. A `---` inside a value (`title: a---b`) does
//! not close the block.

use crate::models::{Document, SkipReason};

/// The frontmatter delimiter.
pub const DELIMITER: &str = "---";

/// Split `content` into frontmatter and body.
///
/// Returns the [`SkipReason`] when there is nothing to split.
pub fn split(content: &str) -> Result<Document<'_>, SkipReason> {
    if !content.starts_with(DELIMITER) {
        return Err(SkipReason::NoFrontmatter);
    }

    let rest = &content[DELIMITER.len()..];
    let end = rest
        .match_indices(DELIMITER)
        .map(|(i, _)| i)
        .find(|&i| i > 0 && rest.as_bytes()[i - 1] == b'\n')
        .ok_or(SkipReason::Unterminated)?;

    Ok(Document {
        frontmatter: &rest[..end],
        body: &rest[end + DELIMITER.len()..],
    })
}

/// Reassemble a document from (possibly rewritten) frontmatter and its body.
pub fn join(frontmatter: &str, body: &str) -> String {
    let mut out = String::with_capacity(frontmatter.len() + body.len() + 2 * DELIMITER.len());
    out.push_str(DELIMITER);
    out.push_str(frontmatter);
    out.push_str(DELIMITER);
    out.push_str(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let doc = split("---\ntitle: x\n---\nBody\n").unwrap();
        assert_eq!(doc.frontmatter, "\ntitle: x\n");
        assert_eq!(doc.body, "\nBody\n");
    }

    #[test]
    fn test_no_leading_marker() {
        assert_eq!(split("# Title\n---\n"), Err(SkipReason::NoFrontmatter));
        assert_eq!(split(""), Err(SkipReason::NoFrontmatter));
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(split("---\ntitle: x\n"), Err(SkipReason::Unterminated));
    }

    #[test]
    fn test_body_keeps_later_markers() {
        let doc = split("---\na: 1\n---\nintro\n---\nmore\n").unwrap();
        assert_eq!(doc.frontmatter, "\na: 1\n");
        assert_eq!(doc.body, "\nintro\n---\nmore\n");
    }

    #[test]
    fn test_dashes_inside_value_do_not_close() {
        let doc = split("---\ntitle: a---b\ntags: [x]\n---\nBody\n").unwrap();
        assert_eq!(doc.frontmatter, "\ntitle: a---b\ntags: [x]\n");
        assert_eq!(doc.body, "\nBody\n");
    }

    #[test]
    fn test_only_inline_dashes_is_unterminated() {
        assert_eq!(split("---\ntitle: a---b\n"), Err(SkipReason::Unterminated));
    }

    #[test]
    fn test_crlf_delimiters() {
        let doc = split("---\r\ntitle: x\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(doc.frontmatter, "\r\ntitle: x\r\n");
        assert_eq!(doc.body, "\r\nBody\r\n");
    }

    #[test]
    fn test_join_inverts_split() {
        let input = "---\ntitle: x\n---\nBody\n";
        let doc = split(input).unwrap();
        assert_eq!(join(doc.frontmatter, doc.body), input);
    }
}
