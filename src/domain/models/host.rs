use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::MenuClick;
use super::MenuItem;
use super::StorageArea;
use super::WindowId;
use super::Windows;

#[async_trait]
pub trait ContextMenus {
    async fn create(&self, item: MenuItem) -> Result<()>;
}

#[async_trait]
pub trait Runtime {
    /// Brings up the settings surface so the user can enter a credential.
    async fn open_options_page(&self) -> Result<()>;
}

/// Notifications delivered by the host to the background component.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Installed(),
    MenuClicked(MenuClick),
    WindowRemoved(WindowId),
}

pub type ContextMenusBox = Arc<dyn ContextMenus + Send + Sync>;
pub type RuntimeBox = Arc<dyn Runtime + Send + Sync>;
pub type StorageAreaBox = Arc<dyn StorageArea + Send + Sync>;
pub type WindowsBox = Arc<dyn Windows + Send + Sync>;

/// Every capability the extension borrows from its host runtime.
#[derive(Clone)]
pub struct Host {
    pub context_menus: ContextMenusBox,
    pub runtime: RuntimeBox,
    pub windows: WindowsBox,
    pub sync_storage: StorageAreaBox,
    pub local_storage: StorageAreaBox,
}
