use std::collections::HashMap;

use crate::doc::{Document, ParaStyle};
use crate::model::tag::Tag;
use crate::parse::marker_span;

/// The three presentation modes. View changes only touch style state; the
/// paragraph text (markers included) is never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Markers de-emphasized, no coloring
    Standard,
    /// Marker spans colored by category
    TagsOnly,
    /// Whole paragraphs colored by category
    StructureAudit,
}

pub fn apply_view<D: Document>(doc: &mut D, registry: &[Tag], mode: ViewMode) {
    match mode {
        ViewMode::Standard => standard_view(doc),
        ViewMode::TagsOnly => tags_only_view(doc, registry),
        ViewMode::StructureAudit => structure_audit_view(doc, registry),
    }
}

pub fn standard_view<D: Document>(doc: &mut D) {
    for i in 0..doc.len() {
        let has_marker = doc.text(i).and_then(marker_span).is_some();
        doc.set_style(
            i,
            ParaStyle {
                marker_dimmed: has_marker,
                ..ParaStyle::default()
            },
        );
    }
}

pub fn tags_only_view<D: Document>(doc: &mut D, registry: &[Tag]) {
    let colors = color_map(registry);
    for i in 0..doc.len() {
        let mut style = ParaStyle::default();
        if let Some((_, marker)) = doc.text(i).and_then(marker_span)
            && let Some(color) = colors.get(marker.category.as_str())
        {
            style.marker_background = Some((*color).to_string());
        }
        doc.set_style(i, style);
    }
}

pub fn structure_audit_view<D: Document>(doc: &mut D, registry: &[Tag]) {
    let colors = color_map(registry);
    for i in 0..doc.len() {
        let mut style = ParaStyle::default();
        if let Some((_, marker)) = doc.text(i).and_then(marker_span)
            && let Some(color) = colors.get(marker.category.as_str())
        {
            style.background = Some((*color).to_string());
            style.marker_dimmed = true;
        }
        doc.set_style(i, style);
    }
}

fn color_map(registry: &[Tag]) -> HashMap<&str, &str> {
    registry
        .iter()
        .map(|t| (t.name.as_str(), t.color.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::MemDoc;
    use crate::model::tag::default_tags;
    use pretty_assertions::assert_eq;

    fn doc() -> MemDoc {
        MemDoc::from_lines([
            "Opening [tag: intro-1]",
            "Plain paragraph",
            "Orphan [tag: ghost-1]",
        ])
    }

    #[test]
    fn tags_only_colors_known_markers() {
        let mut doc = doc();
        tags_only_view(&mut doc, &default_tags());
        assert_eq!(
            doc.style(0).unwrap().marker_background.as_deref(),
            Some("#d9ead3")
        );
        assert_eq!(doc.style(1).unwrap(), &ParaStyle::default());
        // unknown category gets no color
        assert_eq!(doc.style(2).unwrap(), &ParaStyle::default());
    }

    #[test]
    fn standard_dims_any_marker() {
        let mut doc = doc();
        standard_view(&mut doc);
        assert!(doc.style(0).unwrap().marker_dimmed);
        assert!(!doc.style(1).unwrap().marker_dimmed);
        assert!(doc.style(2).unwrap().marker_dimmed);
    }

    #[test]
    fn audit_paints_whole_paragraph_and_resets_untagged() {
        let mut doc = doc();
        // leave stale style on the untagged paragraph first
        doc.set_style(
            1,
            ParaStyle {
                background: Some("#000000".into()),
                ..ParaStyle::default()
            },
        );
        structure_audit_view(&mut doc, &default_tags());
        let s0 = doc.style(0).unwrap();
        assert_eq!(s0.background.as_deref(), Some("#d9ead3"));
        assert!(s0.marker_dimmed);
        assert_eq!(doc.style(1).unwrap().background, None);
    }
}
