use crate::doc::{PropertyStore, PropsError, Scope, get_json, set_json};
use crate::model::settings::{TabConfig, default_tab_config};

pub const TAB_SETTINGS_KEY: &str = "SIDEBAR_TAB_SETTINGS";

/// Error type for tab settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown tab: {0}")]
    UnknownTab(String),
    #[error(transparent)]
    Props(#[from] PropsError),
}

/// Visible tabs, initializing the default-visible set on first access.
/// Malformed stored JSON silently falls back to the defaults.
pub fn tab_settings<P: PropertyStore>(props: &mut P) -> Result<Vec<TabConfig>, PropsError> {
    if let Some(tabs) = get_json(props, Scope::Document, TAB_SETTINGS_KEY) {
        return Ok(tabs);
    }
    let tabs: Vec<TabConfig> = default_tab_config()
        .into_iter()
        .filter(|t| t.default_visible)
        .collect();
    set_json(props, Scope::Document, TAB_SETTINGS_KEY, &tabs)?;
    Ok(tabs)
}

/// Persist the visible tab set, selected by ID from the known tabs
pub fn save_tab_settings<P: PropertyStore>(
    props: &mut P,
    visible_ids: &[String],
) -> Result<Vec<TabConfig>, SettingsError> {
    let known = default_tab_config();
    let mut visible = Vec::new();
    for id in visible_ids {
        let tab = known
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| SettingsError::UnknownTab(id.clone()))?;
        visible.push(tab.clone());
    }
    set_json(props, Scope::Document, TAB_SETTINGS_KEY, &visible)?;
    Ok(visible)
}
