use std::collections::HashSet;

use crate::doc::{Document, PropertyStore};
use crate::model::tag::normalize_name;
use crate::ops::registry_ops::{RegistryError, load_registry};
use crate::ops::view::tags_only_view;
use crate::parse::{category_scan_re, format_marker, strip_marker};

/// Error type for tagging operations
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("no paragraphs targeted; select at least one paragraph to tag")]
    NoTargets,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// What `apply_tag` did, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTags {
    pub category: String,
    pub count: usize,
    pub first_id: u64,
}

/// Next free identifier for a category: scan every paragraph for that
/// category's markers, take the max numeric identifier + 1 (1 when none).
/// Non-numeric identifiers are ignored, not errors.
pub fn next_identifier<D: Document>(doc: &D, category: &str) -> u64 {
    let re = category_scan_re(category);
    let mut max_id = 0u64;
    for i in 0..doc.len() {
        if let Some(text) = doc.text(i)
            && let Some(caps) = re.captures(text)
            && let Ok(id) = caps[1].parse::<u64>()
            && id > max_id
        {
            max_id = id;
        }
    }
    max_id + 1
}

/// Tag each target paragraph with `category`, assigning consecutive
/// identifiers from a single counter seeded by `next_identifier`.
///
/// Identifiers follow the order of `targets` as given, not document order —
/// the canonical tie-break for multi-paragraph selections. Targets form a
/// set: a repeated index counts once, at its first occurrence. Any existing
/// marker (of any category) is replaced. Stale out-of-range targets are
/// skipped; an effectively empty target set is an error carrying guidance,
/// not a silent no-op. Finishes with a tags-only view refresh.
pub fn apply_tag<D: Document, P: PropertyStore>(
    doc: &mut D,
    props: &mut P,
    targets: &[usize],
    category: &str,
) -> Result<AppliedTags, TagError> {
    let category = normalize_name(category);
    let mut seen = HashSet::new();
    let targets: Vec<usize> = targets
        .iter()
        .copied()
        .filter(|&i| i < doc.len() && seen.insert(i))
        .collect();
    if targets.is_empty() {
        return Err(TagError::NoTargets);
    }

    let first_id = next_identifier(doc, &category);
    let mut next = first_id;
    for &i in &targets {
        let text = doc.text(i).unwrap_or("").to_string();
        let stripped = strip_marker(&text);
        let marker = format_marker(&category, &next.to_string());
        doc.set_text(i, &format!("{stripped} {marker}"));
        next += 1;
    }

    let registry = load_registry(props)?;
    tags_only_view(doc, &registry);
    Ok(AppliedTags {
        category,
        count: targets.len(),
        first_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{MemDoc, MemProps};
    use pretty_assertions::assert_eq;

    #[test]
    fn next_identifier_is_max_plus_one() {
        let doc = MemDoc::from_lines([
            "a [tag: intro-2]",
            "b [tag: intro-7]",
            "c [tag: body-99]",
            "plain",
        ]);
        assert_eq!(next_identifier(&doc, "intro"), 8);
        assert_eq!(next_identifier(&doc, "body"), 100);
        assert_eq!(next_identifier(&doc, "conclusion"), 1);
    }

    #[test]
    fn next_identifier_ignores_non_numeric_ids() {
        let doc = MemDoc::from_lines(["a [tag: intro-auto]", "b [tag: intro-3.5]", "c [tag: intro-2]"]);
        assert_eq!(next_identifier(&doc, "intro"), 3);
    }

    #[test]
    fn apply_assigns_consecutive_ids_in_target_order() {
        let mut doc = MemDoc::from_lines(["zero", "one", "two", "three [tag: body-4]"]);
        let mut props = MemProps::new();

        // targets deliberately out of document order: the counter follows
        // the given order, locking in the canonical tie-break
        let out = apply_tag(&mut doc, &mut props, &[2, 0], "body").unwrap();
        assert_eq!(out.count, 2);
        assert_eq!(out.first_id, 5);
        assert_eq!(doc.text(2), Some("two [tag: body-5]"));
        assert_eq!(doc.text(0), Some("zero [tag: body-6]"));
        assert_eq!(doc.text(1), Some("one"));
    }

    #[test]
    fn apply_counts_repeated_targets_once() {
        let mut doc = MemDoc::from_lines(["alpha", "beta"]);
        let mut props = MemProps::new();

        let out = apply_tag(&mut doc, &mut props, &[0, 0, 1, 0], "body").unwrap();
        assert_eq!(out.count, 2);
        assert_eq!(out.first_id, 1);
        // no identifier skipped, no double-tagging
        assert_eq!(doc.text(0), Some("alpha [tag: body-1]"));
        assert_eq!(doc.text(1), Some("beta [tag: body-2]"));
    }

    #[test]
    fn next_identifier_handles_ids_beyond_u32() {
        let doc = MemDoc::from_lines(["a [tag: intro-8589934592]"]);
        assert_eq!(next_identifier(&doc, "intro"), 8589934593);
    }

    #[test]
    fn apply_replaces_existing_marker_of_any_category() {
        let mut doc = MemDoc::from_lines(["keep me [tag: intro-9]"]);
        let mut props = MemProps::new();
        apply_tag(&mut doc, &mut props, &[0], "conclusion").unwrap();
        assert_eq!(doc.text(0), Some("keep me [tag: conclusion-1]"));
    }

    #[test]
    fn apply_normalizes_the_category() {
        let mut doc = MemDoc::from_lines(["x"]);
        let mut props = MemProps::new();
        let out = apply_tag(&mut doc, &mut props, &[0], "New Idea").unwrap();
        assert_eq!(out.category, "new-idea");
        assert_eq!(doc.text(0), Some("x [tag: new-idea-1]"));
    }

    #[test]
    fn empty_target_set_is_a_guidance_error() {
        let mut doc = MemDoc::from_lines(["x"]);
        let mut props = MemProps::new();
        let err = apply_tag(&mut doc, &mut props, &[], "intro").unwrap_err();
        assert!(matches!(err, TagError::NoTargets));
        // stale indices filter down to empty as well
        let err = apply_tag(&mut doc, &mut props, &[10, 11], "intro").unwrap_err();
        assert!(matches!(err, TagError::NoTargets));
        assert_eq!(doc.text(0), Some("x"));
    }

    #[test]
    fn apply_refreshes_tag_coloring() {
        let mut doc = MemDoc::from_lines(["x"]);
        let mut props = MemProps::new();
        apply_tag(&mut doc, &mut props, &[0], "intro").unwrap();
        assert_eq!(
            doc.style(0).unwrap().marker_background.as_deref(),
            Some("#d9ead3")
        );
    }
}
