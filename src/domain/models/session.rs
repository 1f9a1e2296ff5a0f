#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::StorageItems;

pub const ORIGINAL_TEXT: &str = "originalText";
pub const EXPLANATION: &str = "explanation";
pub const IS_LOADING: &str = "isLoading";

pub const SESSION_KEYS: [&str; 3] = [ORIGINAL_TEXT, EXPLANATION, IS_LOADING];

/// State of the one in-progress or completed explanation request. Keys that are
/// missing from storage read back as their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRecord {
    pub original_text: String,
    pub explanation: String,
    pub is_loading: bool,
}

impl SessionRecord {
    pub fn loading(original_text: &str) -> SessionRecord {
        return SessionRecord {
            original_text: original_text.to_string(),
            explanation: "".to_string(),
            is_loading: true,
        };
    }

    pub fn from_items(items: StorageItems) -> Result<SessionRecord> {
        let value = serde_json::Value::Object(items.into_iter().collect());
        return Ok(serde_json::from_value(value)?);
    }

    pub fn to_items(&self) -> Result<StorageItems> {
        let value = serde_json::to_value(self)?;
        let items = match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => StorageItems::new(),
        };

        return Ok(items);
    }
}
