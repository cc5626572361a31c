// src/download/filename.rs
// =============================================================================
// Turns a document URL into a safe local filename.
//
//   https://Site.com/docs/My%20File%20(1).pdf
//     -> last path segment  "My%20File%20(1).pdf"
//     -> percent-decoded    "My File (1).pdf"
//     -> lower-cased        "my file (1).pdf"
//     -> unsafe runs to _   "my_file_1_.pdf"
//
// Only a-z, 0-9, '.', '_' and '-' survive, so the result can never contain a
// path separator. The same URL always gives the same name.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9._-]+").expect("hardcoded regex pattern is valid"));

/// Derives the local filename for a document URL.
///
/// Returns None when the URL does not parse, has no path segment to name the
/// file after, or sanitizes down to nothing usable ("", "." or "..").
pub fn filename_from_url(raw_url: &str) -> Option<String> {
    let url = Url::parse(raw_url).ok()?;

    // Trailing slashes give empty segments; name the file after the last
    // real one, like a basename would
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;

    let name = sanitize_component(segment);
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    Some(name)
}

/// Decodes, lower-cases and restricts one path segment to `[a-z0-9._-]`.
///
/// Running it on its own output changes nothing.
pub fn sanitize_component(segment: &str) -> String {
    // Invalid UTF-8 after decoding: keep the encoded form, the '%' signs get
    // replaced below anyway
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    let lowered = decoded.to_lowercase();
    UNSAFE_RUN.replace_all(&lowered, "_").into_owned()
}
