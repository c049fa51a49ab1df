use crate::doc::{Document, PropertyStore, PropsError, Scope, set_json};
use crate::model::tag::{Tag, default_tags, normalize_name};
use crate::ops::view::tags_only_view;
use crate::parse::{category_scan_re, category_strip_re, format_marker};

/// Property key holding the serialized registry. Wire-compatible with
/// previously tagged documents.
pub const REGISTRY_KEY: &str = "ALL_TAGS_ORDERED";

/// Error type for registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("tag name cannot be empty")]
    EmptyName,
    #[error("tag \"{0}\" already exists")]
    NameInUse(String),
    #[error("color {0} is already in use")]
    ColorInUse(String),
    #[error("tag \"{0}\" not found")]
    NotFound(String),
    #[error(transparent)]
    Props(#[from] PropsError),
}

/// Where to place a newly created tag in registry order
#[derive(Debug, Clone)]
pub enum InsertPosition {
    /// Append to the end of the registry
    End,
    /// Insert immediately after the named tag (unknown name falls back to End)
    After(String),
}

/// Load the registry, initializing the defaults on first access. A corrupted
/// stored value fails safe: warn, reset to the defaults, persist them.
pub fn load_registry<P: PropertyStore>(props: &mut P) -> Result<Vec<Tag>, RegistryError> {
    match props.get(Scope::Document, REGISTRY_KEY) {
        Some(raw) => match serde_json::from_str::<Vec<Tag>>(&raw) {
            Ok(tags) => Ok(tags),
            Err(e) => {
                eprintln!("warning: stored tag registry is unreadable ({e}); resetting to defaults");
                let tags = default_tags();
                save_registry(props, &tags)?;
                Ok(tags)
            }
        },
        None => {
            let tags = default_tags();
            save_registry(props, &tags)?;
            Ok(tags)
        }
    }
}

fn save_registry<P: PropertyStore>(props: &mut P, tags: &[Tag]) -> Result<(), PropsError> {
    set_json(props, Scope::Document, REGISTRY_KEY, &tags)
}

/// Create a tag. The name is normalized; name and color must be unique.
pub fn create_tag<P: PropertyStore>(
    props: &mut P,
    name: &str,
    color: &str,
    position: InsertPosition,
) -> Result<Tag, RegistryError> {
    let name = normalize_name(name);
    let color = color.trim().to_lowercase();
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }

    let mut tags = load_registry(props)?;
    if tags.iter().any(|t| t.name == name) {
        return Err(RegistryError::NameInUse(name));
    }
    if tags.iter().any(|t| t.color == color) {
        return Err(RegistryError::ColorInUse(color));
    }

    let tag = Tag { name, color };
    match position {
        InsertPosition::End => tags.push(tag.clone()),
        InsertPosition::After(anchor) => match tags.iter().position(|t| t.name == anchor) {
            Some(i) => tags.insert(i + 1, tag.clone()),
            None => tags.push(tag.clone()),
        },
    }
    save_registry(props, &tags)?;
    Ok(tag)
}

/// Rename/recolor a tag. On a name change, every `[tag: old-ID]` in the
/// document is rewritten to `[tag: new-ID]` (identifier preserved) — but only
/// after the registry write succeeds.
pub fn update_tag<P: PropertyStore, D: Document>(
    props: &mut P,
    doc: &mut D,
    old_name: &str,
    new_name: &str,
    new_color: &str,
) -> Result<Tag, RegistryError> {
    let name = normalize_name(new_name);
    let color = new_color.trim().to_lowercase();
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }

    let mut tags = load_registry(props)?;
    let idx = tags
        .iter()
        .position(|t| t.name == old_name)
        .ok_or_else(|| RegistryError::NotFound(old_name.to_string()))?;
    if tags.iter().enumerate().any(|(i, t)| i != idx && t.name == name) {
        return Err(RegistryError::NameInUse(name));
    }
    if tags
        .iter()
        .enumerate()
        .any(|(i, t)| i != idx && t.color == color)
    {
        return Err(RegistryError::ColorInUse(color));
    }

    let tag = Tag { name, color };
    tags[idx] = tag.clone();
    save_registry(props, &tags)?;

    if old_name != tag.name {
        rewrite_category(doc, old_name, &tag.name);
    }
    tags_only_view(doc, &tags);
    Ok(tag)
}

/// Delete a tag and strip its end-anchored markers from the whole document.
pub fn delete_tag<P: PropertyStore, D: Document>(
    props: &mut P,
    doc: &mut D,
    name: &str,
) -> Result<(), RegistryError> {
    let mut tags = load_registry(props)?;
    let before = tags.len();
    tags.retain(|t| t.name != name);
    if tags.len() == before {
        return Err(RegistryError::NotFound(name.to_string()));
    }
    save_registry(props, &tags)?;

    let re = category_strip_re(name);
    for i in 0..doc.len() {
        let Some(text) = doc.text(i) else { continue };
        if re.is_match(text) {
            let stripped = re.replace(text, "").into_owned();
            doc.set_text(i, &stripped);
        }
    }
    tags_only_view(doc, &tags);
    Ok(())
}

/// Replace every marker of `old` with `new`, keeping identifiers. Matches
/// anywhere in the paragraph, like the original document-wide replace.
fn rewrite_category<D: Document>(doc: &mut D, old: &str, new: &str) {
    let re = category_scan_re(old);
    let replacement = format_marker(new, "${1}");
    for i in 0..doc.len() {
        let Some(text) = doc.text(i) else { continue };
        if re.is_match(text) {
            let rewritten = re.replace_all(text, replacement.as_str()).into_owned();
            doc.set_text(i, &rewritten);
        }
    }
}
