#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::broadcast;
use tokio::sync::mpsc;

use crate::domain::models::ContextMenus;
use crate::domain::models::Event;
use crate::domain::models::MenuItem;
use crate::domain::models::Namespace;
use crate::domain::models::Runtime;
use crate::domain::models::StorageArea;
use crate::domain::models::StorageChange;
use crate::domain::models::StorageItems;
use crate::domain::models::ValueChange;
use crate::domain::models::Window;
use crate::domain::models::WindowId;
use crate::domain::models::WindowKind;
use crate::domain::models::WindowOptions;
use crate::domain::models::Windows;

const CHANGE_BUFFER: usize = 64;

pub struct MemoryStorageArea {
    namespace: Namespace,
    items: DashMap<String, Value>,
    tx: broadcast::Sender<StorageChange>,
}

impl MemoryStorageArea {
    pub fn new(namespace: Namespace) -> MemoryStorageArea {
        let (tx, _) = broadcast::channel(CHANGE_BUFFER);
        return MemoryStorageArea {
            namespace,
            items: DashMap::new(),
            tx,
        };
    }

    pub fn with_items(namespace: Namespace, items: StorageItems) -> MemoryStorageArea {
        let area = MemoryStorageArea::new(namespace);
        for (key, value) in items {
            area.items.insert(key, value);
        }

        return area;
    }

    pub fn snapshot(&self) -> StorageItems {
        return self
            .items
            .iter()
            .map(|entry| return (entry.key().to_string(), entry.value().clone()))
            .collect();
    }

    fn publish(&self, changes: HashMap<String, ValueChange>) {
        if changes.is_empty() {
            return;
        }

        // Nobody listening is fine.
        let _ = self.tx.send(StorageChange {
            namespace: self.namespace,
            changes,
        });
    }
}

#[async_trait]
impl StorageArea for MemoryStorageArea {
    fn namespace(&self) -> Namespace {
        return self.namespace;
    }

    #[allow(clippy::implicit_return)]
    async fn get(&self, keys: &[&str]) -> Result<StorageItems> {
        let items = keys
            .iter()
            .filter_map(|key| {
                return self
                    .items
                    .get(*key)
                    .map(|value| return (key.to_string(), value.clone()));
            })
            .collect();

        return Ok(items);
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, items: StorageItems) -> Result<()> {
        let mut changes = HashMap::new();
        for (key, value) in items {
            let old_value = self.items.insert(key.to_string(), value.clone());
            if old_value.as_ref() != Some(&value) {
                changes.insert(
                    key,
                    ValueChange {
                        old_value,
                        new_value: Some(value),
                    },
                );
            }
        }

        self.publish(changes);
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let mut changes = HashMap::new();
        for key in keys {
            if let Some((_, old_value)) = self.items.remove(*key) {
                changes.insert(
                    key.to_string(),
                    ValueChange {
                        old_value: Some(old_value),
                        new_value: None,
                    },
                );
            }
        }

        self.publish(changes);
        return Ok(());
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        return self.tx.subscribe();
    }
}

/// Window manager that keeps windows in memory. Starts out with the normal
/// browser window the selection is made in.
pub struct MemoryWindows {
    windows: DashMap<WindowId, Window>,
    next_id: AtomicI64,
}

impl Default for MemoryWindows {
    fn default() -> MemoryWindows {
        let windows = DashMap::new();
        windows.insert(
            1,
            Window {
                id: 1,
                options: WindowOptions {
                    url: "about:blank".to_string(),
                    kind: WindowKind::Normal,
                    width: 1280,
                    height: 800,
                },
                focused: true,
            },
        );

        return MemoryWindows {
            windows,
            next_id: AtomicI64::new(2),
        };
    }
}

impl MemoryWindows {
    /// Closes a window the way a user would. Returns false when the window was
    /// already gone. Delivering the removal notification is up to the caller.
    pub fn remove(&self, id: WindowId) -> bool {
        return self.windows.remove(&id).is_some();
    }

    pub fn popups(&self) -> Vec<Window> {
        let mut popups = self
            .windows
            .iter()
            .filter(|entry| return entry.options.kind == WindowKind::Popup)
            .map(|entry| return entry.value().clone())
            .collect::<Vec<Window>>();

        popups.sort_by_key(|window| return window.id);
        return popups;
    }

    fn set_focus(&self, id: WindowId) {
        for mut entry in self.windows.iter_mut() {
            entry.focused = entry.id == id;
        }
    }
}

#[async_trait]
impl Windows for MemoryWindows {
    #[allow(clippy::implicit_return)]
    async fn create(&self, options: &WindowOptions) -> Result<WindowId> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.windows.insert(
            id,
            Window {
                id,
                options: options.clone(),
                focused: false,
            },
        );
        self.set_focus(id);

        return Ok(id);
    }

    #[allow(clippy::implicit_return)]
    async fn get(&self, id: WindowId) -> Result<Option<Window>> {
        return Ok(self.windows.get(&id).map(|entry| return entry.value().clone()));
    }

    #[allow(clippy::implicit_return)]
    async fn focus(&self, id: WindowId) -> Result<()> {
        if !self.windows.contains_key(&id) {
            bail!(format!("No window with id: {id}"));
        }

        self.set_focus(id);
        return Ok(());
    }
}

#[derive(Default)]
pub struct MemoryContextMenus {
    items: DashMap<String, MenuItem>,
}

impl MemoryContextMenus {
    pub fn items(&self) -> Vec<MenuItem> {
        return self
            .items
            .iter()
            .map(|entry| return entry.value().clone())
            .collect();
    }
}

#[async_trait]
impl ContextMenus for MemoryContextMenus {
    #[allow(clippy::implicit_return)]
    async fn create(&self, item: MenuItem) -> Result<()> {
        if self.items.contains_key(&item.id) {
            bail!(format!("Cannot create item with duplicate id {}", item.id));
        }

        self.items.insert(item.id.to_string(), item);
        return Ok(());
    }
}

#[derive(Default)]
pub struct MemoryRuntime {
    options_page_opened: AtomicUsize,
    tx: Option<mpsc::UnboundedSender<Event>>,
}

impl MemoryRuntime {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> MemoryRuntime {
        return MemoryRuntime {
            options_page_opened: AtomicUsize::new(0),
            tx: Some(tx),
        };
    }

    pub fn options_page_opened(&self) -> usize {
        return self.options_page_opened.load(Ordering::SeqCst);
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    #[allow(clippy::implicit_return)]
    async fn open_options_page(&self) -> Result<()> {
        self.options_page_opened.fetch_add(1, Ordering::SeqCst);
        if let Some(tx) = &self.tx {
            tx.send(Event::OptionsPageOpened())?;
        }

        return Ok(());
    }
}
