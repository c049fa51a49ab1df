use serde::{Deserialize, Serialize};

/// Column name for paragraphs with no parseable marker
pub const UNTAGGED: &str = "untagged";

/// Ephemeral projection of a paragraph for board display. Regenerated from
/// the document on every read, never persisted.
///
/// Field names serialize in camelCase — the board payload format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub full_text: String,
    /// Marker-stripped, truncated to the first 6 words
    pub display_text: String,
    /// Paragraph position at snapshot time (0-based)
    pub original_index: usize,
    /// Marker category, or `untagged`
    pub category: String,
    /// Marker identifier, verbatim
    pub id: Option<String>,
}

/// The slice of a card a rebuild actually needs. Deserializes from full card
/// payloads too (unknown fields are ignored).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRef {
    pub original_index: usize,
    #[serde(default)]
    pub id: Option<String>,
}

impl From<&Card> for CardRef {
    fn from(card: &Card) -> Self {
        CardRef {
            original_index: card.original_index,
            id: card.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn card_ref_deserializes_from_full_card_payload() {
        let json = r#"{"fullText":"Hello [tag: intro-1]","displayText":"Hello",
                       "originalIndex":3,"category":"intro","id":"1"}"#;
        let card: CardRef = serde_json::from_str(json).unwrap();
        assert_eq!(card.original_index, 3);
        assert_eq!(card.id.as_deref(), Some("1"));
    }

    #[test]
    fn card_serializes_camel_case() {
        let card = Card {
            full_text: "x".into(),
            display_text: "x".into(),
            original_index: 0,
            category: UNTAGGED.into(),
            id: None,
        };
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"fullText\""));
        assert!(json.contains("\"originalIndex\""));
    }
}
