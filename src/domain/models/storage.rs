use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Namespace {
    /// Follows the user across devices. Holds the credential.
    Sync,
    /// Device local. Holds the session record.
    Local,
}

pub type StorageItems = HashMap<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct ValueChange {
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

/// Published by a storage area after every write that changed at least one
/// key.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageChange {
    pub namespace: Namespace,
    pub changes: HashMap<String, ValueChange>,
}

#[async_trait]
pub trait StorageArea {
    fn namespace(&self) -> Namespace;

    /// Returns the stored values for the requested keys. Keys without a value
    /// are left out of the result.
    async fn get(&self, keys: &[&str]) -> Result<StorageItems>;

    /// Merges the items into the area, notifying subscribers of any key whose
    /// value changed.
    async fn set(&self, items: StorageItems) -> Result<()>;

    async fn remove(&self, keys: &[&str]) -> Result<()>;

    fn subscribe(&self) -> broadcast::Receiver<StorageChange>;
}
