use serde::{Deserialize, Serialize};

/// Configuration from tagboard.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub document: DocumentInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Path of the draft file, relative to the config file
    pub file: String,
}
