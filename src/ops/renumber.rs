use std::collections::HashMap;

use crate::doc::{Document, PropertyStore};
use crate::ops::registry_ops::{RegistryError, load_registry};
use crate::ops::view::tags_only_view;
use crate::parse::{format_marker, parse_marker, strip_marker};

/// What a renumber pass did. Zero tagged paragraphs is a successful no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenumberOutcome {
    /// Untagged paragraphs that were given an inferred marker
    pub inferred: usize,
    /// Markers rewritten with sequential identifiers
    pub renumbered: usize,
}

impl RenumberOutcome {
    pub fn is_noop(&self) -> bool {
        self.inferred == 0 && self.renumbered == 0
    }
}

/// Two-phase renumber over the whole document.
///
/// Phase 1 (gap inference): an interior paragraph with no marker, non-blank
/// text, and same-category markers on both neighbors gets a placeholder
/// `category-auto` marker — a paragraph the user forgot to tag.
///
/// Phase 2 (full renumber): walk tagged paragraphs in document order with a
/// counter per registry category starting at 1, rewriting each known-category
/// marker as `category-<counter>`. Markers whose category is not in the
/// registry are left untouched.
pub fn renumber_all<D: Document, P: PropertyStore>(
    doc: &mut D,
    props: &mut P,
) -> Result<RenumberOutcome, RegistryError> {
    let mut inferred = 0;
    if doc.len() >= 3 {
        for i in 1..doc.len() - 1 {
            let current = doc.text(i).unwrap_or("").to_string();
            if parse_marker(&current).is_some() || current.trim().is_empty() {
                continue;
            }
            let prev = doc.text(i - 1).and_then(parse_marker);
            let next = doc.text(i + 1).and_then(parse_marker);
            if let (Some(prev), Some(next)) = (prev, next)
                && prev.category == next.category
            {
                let marker = format_marker(&prev.category, "auto");
                doc.append_text(i, &format!(" {marker}"));
                inferred += 1;
            }
        }
    }

    let registry = load_registry(props)?;
    let mut counters: HashMap<String, u32> =
        registry.iter().map(|t| (t.name.clone(), 1)).collect();
    let mut renumbered = 0;
    for i in 0..doc.len() {
        let text = doc.text(i).unwrap_or("").to_string();
        let Some(marker) = parse_marker(&text) else {
            continue;
        };
        let Some(counter) = counters.get_mut(&marker.category) else {
            // orphaned marker: category no longer in the registry
            continue;
        };
        let stripped = strip_marker(&text);
        let fresh = format_marker(&marker.category, &counter.to_string());
        doc.set_text(i, &format!("{stripped} {fresh}"));
        *counter += 1;
        renumbered += 1;
    }

    tags_only_view(doc, &registry);
    Ok(RenumberOutcome {
        inferred,
        renumbered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{MemDoc, MemProps};
    use pretty_assertions::assert_eq;

    #[test]
    fn fills_gap_between_same_category_neighbors() {
        let mut doc = MemDoc::from_lines([
            "Hello",
            "World [tag: intro-1]",
            "Mid",
            "End [tag: intro-2]",
        ]);
        let mut props = MemProps::new();
        let out = renumber_all(&mut doc, &mut props).unwrap();

        assert_eq!(out.inferred, 1);
        assert_eq!(out.renumbered, 3);
        assert_eq!(doc.text(0), Some("Hello"));
        assert_eq!(doc.text(1), Some("World [tag: intro-1]"));
        assert_eq!(doc.text(2), Some("Mid [tag: intro-2]"));
        assert_eq!(doc.text(3), Some("End [tag: intro-3]"));
    }

    #[test]
    fn no_inference_when_neighbor_categories_differ() {
        let mut doc = MemDoc::from_lines([
            "a [tag: intro-1]",
            "between",
            "b [tag: body-1]",
        ]);
        let mut props = MemProps::new();
        let out = renumber_all(&mut doc, &mut props).unwrap();
        assert_eq!(out.inferred, 0);
        assert_eq!(doc.text(1), Some("between"));
    }

    #[test]
    fn blank_paragraphs_are_never_inferred() {
        let mut doc = MemDoc::from_lines([
            "a [tag: intro-1]",
            "   ",
            "b [tag: intro-5]",
        ]);
        let mut props = MemProps::new();
        let out = renumber_all(&mut doc, &mut props).unwrap();
        assert_eq!(out.inferred, 0);
        assert_eq!(doc.text(1), Some("   "));
        // identifiers still compacted
        assert_eq!(doc.text(2), Some("b [tag: intro-2]"));
    }

    #[test]
    fn renumbers_each_category_independently_in_document_order() {
        let mut doc = MemDoc::from_lines([
            "c1 [tag: conclusion-9]",
            "i1 [tag: intro-4]",
            "b1 [tag: body-2]",
            "i2 [tag: intro-1]",
        ]);
        let mut props = MemProps::new();
        renumber_all(&mut doc, &mut props).unwrap();
        assert_eq!(doc.text(0), Some("c1 [tag: conclusion-1]"));
        assert_eq!(doc.text(1), Some("i1 [tag: intro-1]"));
        assert_eq!(doc.text(2), Some("b1 [tag: body-1]"));
        assert_eq!(doc.text(3), Some("i2 [tag: intro-2]"));
    }

    #[test]
    fn orphaned_categories_survive_untouched() {
        let mut doc = MemDoc::from_lines(["x [tag: ghost-42]", "y [tag: intro-7]", "z [tag: intro-9]"]);
        let mut props = MemProps::new();
        let out = renumber_all(&mut doc, &mut props).unwrap();
        assert_eq!(doc.text(0), Some("x [tag: ghost-42]"));
        assert_eq!(doc.text(1), Some("y [tag: intro-1]"));
        assert_eq!(out.renumbered, 2);
    }

    #[test]
    fn zero_tagged_paragraphs_is_a_noop_success() {
        let mut doc = MemDoc::from_lines(["a", "b", "c"]);
        let mut props = MemProps::new();
        let out = renumber_all(&mut doc, &mut props).unwrap();
        assert!(out.is_noop());
        assert_eq!(doc.text(0), Some("a"));
    }

    #[test]
    fn short_documents_skip_gap_inference() {
        let mut doc = MemDoc::from_lines(["a [tag: intro-3]", "b [tag: intro-8]"]);
        let mut props = MemProps::new();
        let out = renumber_all(&mut doc, &mut props).unwrap();
        assert_eq!(out.inferred, 0);
        assert_eq!(doc.text(0), Some("a [tag: intro-1]"));
        assert_eq!(doc.text(1), Some("b [tag: intro-2]"));
    }
}
