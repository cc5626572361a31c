// src/extract/links.rs
// =============================================================================
// Regex-based document link extraction.
//
// The pattern is built from the target extension:
//
//   https?://[^\s"'<>]+?\.<ext>(?:\?[^\s"'<>]*)?
//
// - the URL body is lazy, so it stops at the first ".<ext>" that ends a match
// - quotes, whitespace and angle brackets end a URL, which is what you get
//   inside href="..." attributes and plain text
// - an optional query string after the extension is kept
// - the extension itself is matched case-insensitively (.pdf and .PDF)
//
// The regex crate guarantees linear-time matching, so a hostile page cannot
// make the scan blow up.
// =============================================================================

use regex::Regex;
use std::collections::HashSet;

/// Scans text for absolute links to one kind of document.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// Builds an extractor for links ending in `.<extension>`.
    ///
    /// The extension is escaped, so "tar.gz" matches literally.
    pub fn new(extension: &str) -> Result<Self, regex::Error> {
        let extension = extension.trim_start_matches('.');
        let pattern = format!(
            r#"https?://[^\s"'<>]+?\.(?i:{})(?:\?[^\s"'<>]*)?"#,
            regex::escape(extension)
        );

        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// Returns every match in order of appearance, duplicates included.
    pub fn extract_links(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Removes exact duplicates while keeping the first occurrence of each link.
///
/// Example:
///   ["a.pdf", "b.pdf", "a.pdf"] -> ["a.pdf", "b.pdf"]
pub fn dedup_links(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(links.len());

    for link in links {
        // insert() returns false when the value was already present
        if seen.insert(link.clone()) {
            unique.push(link);
        }
    }

    unique
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not HashSet -> Vec for dedup?
//    - A HashSet has no order, and downloads should happen in page order
//    - So the set only answers "seen before?", the Vec keeps the order
//
// 2. What is (?i:...)?
//    - An inline flag group: case-insensitive only for what is inside it
//    - The host and path stay case-sensitive, so a.pdf and A.PDF are two
//      different links
//
// 3. What does regex::escape do?
//    - It backslashes regex metacharacters
//    - "tar.gz" becomes "tar\.gz" so the dot is not "any character"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> LinkExtractor {
        LinkExtractor::new("pdf").unwrap()
    }

    #[test]
    fn test_extract_from_href_attributes() {
        let html = r#"
            <a href="https://example.com/sds/acetone.pdf">Acetone</a>
            <a href='http://example.com/sds/bleach.pdf'>Bleach</a>
            <a href="https://example.com/about">About</a>
        "#;
        let links = pdf().extract_links(html);
        assert_eq!(
            links,
            vec![
                "https://example.com/sds/acetone.pdf",
                "http://example.com/sds/bleach.pdf",
            ]
        );
    }

    #[test]
    fn test_keeps_query_string() {
        let links = pdf().extract_links(r#"<a href="https://example.com/a.pdf?x=1&v=2">"#);
        assert_eq!(links, vec!["https://example.com/a.pdf?x=1&v=2"]);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let links = pdf().extract_links("see https://example.com/A.PDF now");
        assert_eq!(links, vec!["https://example.com/A.PDF"]);
    }

    #[test]
    fn test_skips_relative_and_other_extensions() {
        let html = r#"<a href="/docs/a.pdf">x</a> https://example.com/a.docx"#;
        assert!(pdf().extract_links(html).is_empty());
    }

    #[test]
    fn test_lazy_match_stops_at_first_extension() {
        let links = pdf().extract_links("https://example.com/a.pdf.bak");
        assert_eq!(links, vec!["https://example.com/a.pdf"]);
    }

    #[test]
    fn test_extension_is_escaped() {
        let extractor = LinkExtractor::new(".tar.gz").unwrap();
        let text = "https://example.com/src.tar.gz https://example.com/src.tarxgz";
        assert_eq!(
            extractor.extract_links(text),
            vec!["https://example.com/src.tar.gz"]
        );
    }

    #[test]
    fn test_extract_then_dedup_preserves_first_seen_order() {
        let text = "https://x.com/a.pdf https://x.com/A.PDF \
                    https://x.com/a.pdf?x=1 https://x.com/a.pdf";
        let raw = pdf().extract_links(text);
        assert_eq!(raw.len(), 4);

        let unique = dedup_links(raw);
        assert_eq!(
            unique,
            vec![
                "https://x.com/a.pdf",
                "https://x.com/A.PDF",
                "https://x.com/a.pdf?x=1",
            ]
        );
    }

    #[test]
    fn test_dedup_empty() {
        assert!(dedup_links(Vec::new()).is_empty());
    }
}
