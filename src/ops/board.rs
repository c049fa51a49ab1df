use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::IndexMap;

use crate::doc::{Document, ParaId, PropertyStore};
use crate::model::card::{Card, CardRef, UNTAGGED};
use crate::model::tag::Tag;
use crate::ops::registry_ops::{RegistryError, load_registry};
use crate::ops::renumber::{RenumberOutcome, renumber_all};
use crate::parse::{display_text, parse_marker};

/// Error type for board operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("no paragraphs found to reorganize")]
    NothingToReorganize,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Project every non-blank paragraph into a card. Untagged paragraphs land
/// in the `untagged` category.
pub fn snapshot<D: Document>(doc: &D) -> Vec<Card> {
    let mut cards = Vec::new();
    for i in 0..doc.len() {
        let Some(text) = doc.text(i) else { continue };
        if text.trim().is_empty() {
            continue;
        }
        let marker = parse_marker(text);
        cards.push(Card {
            full_text: text.to_string(),
            display_text: display_text(text),
            original_index: i,
            category: marker
                .as_ref()
                .map(|m| m.category.clone())
                .unwrap_or_else(|| UNTAGGED.to_string()),
            id: marker.map(|m| m.id),
        });
    }
    cards
}

/// Group a snapshot into board columns: registry categories in registry
/// order, then `untagged` if anything is left over.
pub fn group_cards(cards: Vec<Card>, registry: &[Tag]) -> IndexMap<String, Vec<Card>> {
    let mut columns: IndexMap<String, Vec<Card>> = registry
        .iter()
        .map(|t| (t.name.clone(), Vec::new()))
        .collect();
    for card in cards {
        columns.entry(card.category.clone()).or_default().push(card);
    }
    columns
}

/// Rebuild the document from a user-edited column payload.
///
/// Every referenced paragraph is resolved to a stable handle up front (stale
/// indices are skipped); the union forms the deletion set. The insertion
/// sequence walks registry categories in registry order, cards within a
/// category sorted by identifier with numeric-aware comparison, duplicating
/// each paragraph's text. Deletion happens in descending-position order so
/// earlier removals cannot shift later ones; when the document would be left
/// empty, the last paragraph is cleared instead of removed. Duplicates are
/// then inserted at the front in order, and a full renumber runs.
///
/// An empty deletion set fails before any mutation.
pub fn reorganize<D: Document, P: PropertyStore>(
    doc: &mut D,
    props: &mut P,
    columns: &IndexMap<String, Vec<CardRef>>,
) -> Result<RenumberOutcome, BoardError> {
    let registry = load_registry(props)?;

    let mut delete: HashSet<ParaId> = HashSet::new();
    for cards in columns.values() {
        for card in cards {
            if let Some(id) = doc.handle(card.original_index) {
                delete.insert(id);
            }
        }
    }
    if delete.is_empty() {
        return Err(BoardError::NothingToReorganize);
    }

    let mut inserts: Vec<String> = Vec::new();
    for tag in &registry {
        let Some(cards) = columns.get(&tag.name) else {
            continue;
        };
        let mut cards: Vec<&CardRef> = cards.iter().collect();
        cards.sort_by(|a, b| {
            compare_ids(a.id.as_deref().unwrap_or(""), b.id.as_deref().unwrap_or(""))
        });
        for card in cards {
            if let Some(text) = doc.text(card.original_index) {
                inserts.push(text.to_string());
            }
        }
    }

    let mut positions: Vec<usize> = delete.iter().filter_map(|&id| doc.position(id)).collect();
    positions.sort_unstable_by(|a, b| b.cmp(a));
    for pos in positions {
        if doc.len() > 1 {
            doc.remove(pos);
        } else {
            doc.clear(pos);
        }
    }

    for (i, text) in inserts.iter().enumerate() {
        doc.insert(i, text);
    }

    Ok(renumber_all(doc, props)?)
}

/// Numeric-aware lexical comparison: digit runs compare as integers, so
/// `"2"` sorts before `"10"`.
fn compare_ids(a: &str, b: &str) -> Ordering {
    let ab = a.as_bytes();
    let bb = b.as_bytes();
    let (mut i, mut j) = (0, 0);
    while i < ab.len() && j < bb.len() {
        if ab[i].is_ascii_digit() && bb[j].is_ascii_digit() {
            let si = i;
            while i < ab.len() && ab[i].is_ascii_digit() {
                i += 1;
            }
            let sj = j;
            while j < bb.len() && bb[j].is_ascii_digit() {
                j += 1;
            }
            let na = a[si..i].trim_start_matches('0');
            let nb = b[sj..j].trim_start_matches('0');
            let ord = na.len().cmp(&nb.len()).then_with(|| na.cmp(nb));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            let ord = ab[i].cmp(&bb[j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }
    (ab.len() - i).cmp(&(bb.len() - j))
}
