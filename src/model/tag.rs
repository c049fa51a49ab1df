use serde::{Deserialize, Serialize};

/// A tag category: a normalized name plus a display color.
///
/// Serialized shape (`{"name":..,"color":..}`) matches what previously tagged
/// documents have in their property store, so it must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// The registry a fresh document starts with
pub fn default_tags() -> Vec<Tag> {
    vec![
        Tag::new("intro", "#d9ead3"),
        Tag::new("body", "#cfe2f3"),
        Tag::new("conclusion", "#fce5cd"),
    ]
}

/// Normalize a tag name: lowercase, trimmed, internal whitespace runs
/// collapsed to single hyphens. `"New Idea"` → `"new-idea"`.
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize_name("New Idea"), "new-idea");
        assert_eq!(normalize_name("  Key   Point  "), "key-point");
        assert_eq!(normalize_name("intro"), "intro");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn default_registry_shape() {
        let tags = default_tags();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0], Tag::new("intro", "#d9ead3"));
        assert_eq!(tags[2].name, "conclusion");
    }
}
