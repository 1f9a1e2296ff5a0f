#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use anyhow::Result;
use serde_json::Value;

use crate::domain::models::SessionRecord;
use crate::domain::models::StorageAreaBox;
use crate::domain::models::StorageItems;
use crate::domain::models::EXPLANATION;
use crate::domain::models::IS_LOADING;
use crate::domain::models::SESSION_KEYS;

/// Reads and writes the session record in the local storage namespace.
#[derive(Clone)]
pub struct SessionStore {
    storage: StorageAreaBox,
}

impl SessionStore {
    pub fn new(storage: StorageAreaBox) -> SessionStore {
        return SessionStore { storage };
    }

    pub async fn read(&self) -> Result<SessionRecord> {
        let items = self.storage.get(&SESSION_KEYS).await?;
        return SessionRecord::from_items(items);
    }

    /// Replaces whatever session existed with a fresh loading one.
    pub async fn reset(&self, original_text: &str) -> Result<()> {
        let items = SessionRecord::loading(original_text).to_items()?;
        return self.storage.set(items).await;
    }

    /// Stores the outcome of a request. The original text is left untouched.
    pub async fn complete(&self, explanation: &str) -> Result<()> {
        let mut items = StorageItems::new();
        items.insert(
            EXPLANATION.to_string(),
            Value::String(explanation.to_string()),
        );
        items.insert(IS_LOADING.to_string(), Value::Bool(false));

        return self.storage.set(items).await;
    }

    pub async fn clear(&self) -> Result<()> {
        return self.storage.remove(&SESSION_KEYS).await;
    }
}
