use colored::Colorize;
use serde::Serialize;

use crate::doc::{Document, MemDoc};
use crate::model::card::Card;
use crate::model::settings::TabConfig;
use crate::model::tag::Tag;
use crate::parse::marker_span;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// Board payload: same shape the original sidebar consumed
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardJson {
    pub kanban_data: Vec<Card>,
    pub all_tags: Vec<Tag>,
}

#[derive(Serialize)]
pub struct TagListJson {
    pub tags: Vec<Tag>,
}

#[derive(Serialize)]
pub struct TabListJson {
    pub tabs: Vec<TabConfig>,
}

// ---------------------------------------------------------------------------
// Styled document rendering
// ---------------------------------------------------------------------------

/// Render the document with its current style state as terminal text.
/// Hex colors become truecolor backgrounds; non-hex colors are skipped.
pub fn render_document(doc: &MemDoc) -> String {
    let mut out = String::new();
    for i in 0..doc.len() {
        let text = doc.text(i).unwrap_or("");
        let style = doc.style(i).cloned().unwrap_or_default();

        let line = if let Some(bg) = style.background.as_deref().and_then(hex_rgb) {
            text.on_truecolor(bg.0, bg.1, bg.2).to_string()
        } else if let Some((range, _)) = marker_span(text) {
            let (prose, marker) = text.split_at(range.start);
            let marker = if style.marker_dimmed {
                marker.dimmed().to_string()
            } else if let Some(bg) = style.marker_background.as_deref().and_then(hex_rgb) {
                marker.on_truecolor(bg.0, bg.1, bg.2).to_string()
            } else {
                marker.to_string()
            };
            format!("{prose}{marker}")
        } else {
            text.to_string()
        };

        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Terminal swatch for a tag color
pub fn color_swatch(color: &str) -> String {
    match hex_rgb(color) {
        Some((r, g, b)) => "  ".on_truecolor(r, g, b).to_string(),
        None => "??".to_string(),
    }
}

/// Parse `#rgb` or `#rrggbb` into components
pub fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut parts = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                parts[i] = v * 16 + v;
            }
            Some((parts[0], parts[1], parts[2]))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_rgb("#d9ead3"), Some((0xd9, 0xea, 0xd3)));
        assert_eq!(hex_rgb("#fff"), Some((255, 255, 255)));
        assert_eq!(hex_rgb("#FFF"), Some((255, 255, 255)));
        assert_eq!(hex_rgb("red"), None);
        assert_eq!(hex_rgb("#12345"), None);
    }

    #[test]
    fn render_plain_document_round_trips_text() {
        colored::control::set_override(false);
        let doc = MemDoc::from_lines(["one", "two [tag: intro-1]"]);
        assert_eq!(render_document(&doc), "one\ntwo [tag: intro-1]\n");
        colored::control::unset_override();
    }
}
