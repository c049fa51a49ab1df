use serde::{Deserialize, Serialize};

/// One sidebar tab, persisted under `SIDEBAR_TAB_SETTINGS` as the subset the
/// user keeps visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabConfig {
    pub id: String,
    pub name: String,
    pub default_visible: bool,
}

impl TabConfig {
    fn new(id: &str, name: &str, default_visible: bool) -> Self {
        TabConfig {
            id: id.to_string(),
            name: name.to_string(),
            default_visible,
        }
    }
}

/// The full tab set the UI knows about
pub fn default_tab_config() -> Vec<TabConfig> {
    vec![
        TabConfig::new("architectTab", "Architect", true),
        TabConfig::new("taggerTab", "Tagger", true),
        TabConfig::new("utilitiesTab", "Utilities", true),
    ]
}
