#[cfg(test)]
#[path = "file_storage_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast;
use tokio::sync::Mutex;

use super::MemoryStorageArea;
use crate::domain::models::Namespace;
use crate::domain::models::StorageArea;
use crate::domain::models::StorageChange;
use crate::domain::models::StorageItems;

/// A storage area that survives restarts by mirroring every write into a JSON
/// file.
pub struct FileStorageArea {
    file_path: path::PathBuf,
    inner: MemoryStorageArea,
    write_lock: Mutex<()>,
}

impl FileStorageArea {
    pub async fn open(namespace: Namespace, dir: &path::Path) -> Result<FileStorageArea> {
        let file_path = dir.join(format!("{namespace}.json"));

        let mut items = StorageItems::new();
        if file_path.exists() {
            let payload = fs::read_to_string(&file_path).await?;
            items = match serde_json::from_str::<Value>(&payload)? {
                Value::Object(map) => map.into_iter().collect(),
                _ => bail!(format!(
                    "Storage file {} does not contain a JSON object",
                    file_path.display()
                )),
            };
        }

        return Ok(FileStorageArea {
            file_path,
            inner: MemoryStorageArea::with_items(namespace, items),
            write_lock: Mutex::new(()),
        });
    }

    async fn persist(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let snapshot = self
            .inner
            .snapshot()
            .into_iter()
            .collect::<serde_json::Map<String, Value>>();
        let payload = serde_json::to_string_pretty(&Value::Object(snapshot))?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        return Ok(());
    }
}

#[async_trait]
impl StorageArea for FileStorageArea {
    fn namespace(&self) -> Namespace {
        return self.inner.namespace();
    }

    #[allow(clippy::implicit_return)]
    async fn get(&self, keys: &[&str]) -> Result<StorageItems> {
        return self.inner.get(keys).await;
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, items: StorageItems) -> Result<()> {
        self.inner.set(items).await?;
        return self.persist().await;
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, keys: &[&str]) -> Result<()> {
        self.inner.remove(keys).await?;
        return self.persist().await;
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        return self.inner.subscribe();
    }
}
