use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Trailing marker wire format: `[tag: <category>-<identifier>]` anchored at
/// end-of-text, optional whitespace inside the brackets. Category is
/// letters/digits/hyphens; identifier adds dots. Previously tagged documents
/// depend on this exact pattern — do not change it.
///
/// Groups: 1 = the bracketed marker, 2 = category, 3 = identifier.
pub const MARKER_PATTERN: &str = r"(\[tag:\s*([A-Za-z0-9-]+)-([A-Za-z0-9.-]+)\s*\])$";

/// Strip variant: also consumes the whitespace run before the marker
pub const STRIP_PATTERN: &str = r"\s*\[tag:\s*[A-Za-z0-9-]+-[A-Za-z0-9.-]+\s*\]$";

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MARKER_PATTERN).expect("marker pattern"))
}

fn strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(STRIP_PATTERN).expect("strip pattern"))
}

/// A parsed trailing marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMarker {
    /// Category, case-folded to lowercase
    pub category: String,
    /// Identifier, verbatim (typically numeric, not required to be)
    pub id: String,
}

/// Parse the trailing marker, if any. Total: no marker is a normal outcome.
pub fn parse_marker(text: &str) -> Option<TagMarker> {
    let caps = marker_re().captures(text)?;
    Some(TagMarker {
        category: caps[2].to_lowercase(),
        id: caps[3].to_string(),
    })
}

/// Parse the trailing marker and return the byte range of its bracketed span
/// (without the preceding whitespace), for styled rendering.
pub fn marker_span(text: &str) -> Option<(Range<usize>, TagMarker)> {
    let caps = marker_re().captures(text)?;
    let span = caps.get(1)?.range();
    Some((
        span,
        TagMarker {
            category: caps[2].to_lowercase(),
            id: caps[3].to_string(),
        },
    ))
}

/// Remove the trailing marker and its preceding whitespace. Text without a
/// marker is returned unchanged.
pub fn strip_marker(text: &str) -> String {
    strip_re().replace(text, "").into_owned()
}

/// Marker-stripped text truncated to the first 6 whitespace-delimited words
pub fn display_text(text: &str) -> String {
    let clean = strip_marker(text);
    let words: Vec<&str> = clean.split_whitespace().collect();
    if words.len() > 6 {
        format!("{}...", words[..6].join(" "))
    } else {
        words.join(" ")
    }
}

/// Canonical marker text for a category/identifier pair
pub fn format_marker(category: &str, id: &str) -> String {
    format!("[tag: {category}-{id}]")
}

/// Non-anchored pattern matching any `[tag: category-ID]` of one category,
/// with the identifier captured. Used for max-identifier scans and renames.
pub fn category_scan_re(category: &str) -> Regex {
    let pattern = format!(
        r"\[tag:\s*{}-([A-Za-z0-9.-]+)\s*\]",
        regex::escape(category)
    );
    Regex::new(&pattern).expect("category scan pattern")
}

/// End-anchored strip pattern for one category (including preceding
/// whitespace). Used when a deleted category's markers are removed.
pub fn category_strip_re(category: &str) -> Regex {
    let pattern = format!(
        r"\s*\[tag:\s*{}-[A-Za-z0-9.-]+\s*\]$",
        regex::escape(category)
    );
    Regex::new(&pattern).expect("category strip pattern")
}
