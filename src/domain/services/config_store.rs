#[cfg(test)]
#[path = "config_store_test.rs"]
mod tests;

use anyhow::Result;
use serde_json::Value;

use crate::domain::models::Credential;
use crate::domain::models::StorageAreaBox;
use crate::domain::models::StorageItems;
use crate::domain::models::API_KEY;

/// Holds the credential in the synced storage namespace.
#[derive(Clone)]
pub struct ConfigStore {
    storage: StorageAreaBox,
}

impl ConfigStore {
    pub fn new(storage: StorageAreaBox) -> ConfigStore {
        return ConfigStore { storage };
    }

    /// An absent or empty key reads back as `None`.
    pub async fn get(&self) -> Result<Option<Credential>> {
        let items = self.storage.get(&[API_KEY]).await?;
        let credential = items
            .get(API_KEY)
            .and_then(|value| return value.as_str())
            .and_then(|key| return Credential::parse(key).ok());

        return Ok(credential);
    }

    pub async fn set(&self, credential: &Credential) -> Result<()> {
        let mut items = StorageItems::new();
        items.insert(
            API_KEY.to_string(),
            Value::String(credential.expose().to_string()),
        );

        return self.storage.set(items).await;
    }
}
