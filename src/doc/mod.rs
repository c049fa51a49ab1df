pub mod mem;

pub use mem::{MemDoc, MemProps};

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Stable opaque handle for a paragraph.
///
/// Positions shift as paragraphs are inserted and removed; a `ParaId` does
/// not. Bulk edits resolve handles back to positions at mutation time and
/// delete in descending-position order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParaId(pub(crate) u64);

/// Presentation state for one paragraph. The marker span itself is always
/// trailing, so renderers recompute it from the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParaStyle {
    /// Whole-paragraph background color (structure audit view)
    pub background: Option<String>,
    /// Background color of the marker span (tags-only view)
    pub marker_background: Option<String>,
    /// Marker span rendered de-emphasized (standard view)
    pub marker_dimmed: bool,
}

/// Ordered paragraph sequence owned by the host document.
///
/// Write methods with an out-of-range index are no-ops: callers may hold
/// stale positions from an earlier snapshot, and skipping is the documented
/// defensive behavior.
pub trait Document {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn text(&self, idx: usize) -> Option<&str>;
    /// Stable handle for the paragraph currently at `idx`
    fn handle(&self, idx: usize) -> Option<ParaId>;
    /// Current position of a handle, if the paragraph still exists
    fn position(&self, id: ParaId) -> Option<usize>;
    fn set_text(&mut self, idx: usize, text: &str);
    fn append_text(&mut self, idx: usize, suffix: &str);
    fn insert(&mut self, idx: usize, text: &str);
    fn remove(&mut self, idx: usize);
    /// Empty the paragraph's text but keep the paragraph (and its handle)
    fn clear(&mut self, idx: usize);
    fn style(&self, idx: usize) -> Option<&ParaStyle>;
    fn set_style(&mut self, idx: usize, style: ParaStyle);
}

/// Which key/value namespace a property lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Scoped to the open document (tag registry, tab settings)
    Document,
    /// Scoped to the user (goal settings, progress, milestones)
    User,
}

/// Error type for property persistence
#[derive(Debug, thiserror::Error)]
pub enum PropsError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize property value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value persistence with two scopes. Values are JSON strings;
/// writes are last-writer-wins with no transaction.
pub trait PropertyStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String>;
    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<(), PropsError>;
}

/// Read a JSON-serialized property. A missing key and a malformed value are
/// both treated as absent — callers fall back to defaults.
pub fn get_json<T, P>(props: &P, scope: Scope, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    P: PropertyStore + ?Sized,
{
    let raw = props.get(scope, key)?;
    serde_json::from_str(&raw).ok()
}

/// Write a JSON-serialized property.
pub fn set_json<T, P>(props: &mut P, scope: Scope, key: &str, value: &T) -> Result<(), PropsError>
where
    T: Serialize,
    P: PropertyStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    props.set(scope, key, &raw)
}
