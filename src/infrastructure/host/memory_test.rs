use anyhow::Result;
use serde_json::json;
use tokio::sync::mpsc;

use super::MemoryContextMenus;
use super::MemoryRuntime;
use super::MemoryStorageArea;
use super::MemoryWindows;
use crate::domain::models::ContextMenus;
use crate::domain::models::Event;
use crate::domain::models::MenuItem;
use crate::domain::models::Namespace;
use crate::domain::models::Runtime;
use crate::domain::models::StorageArea;
use crate::domain::models::StorageItems;
use crate::domain::models::WindowOptions;
use crate::domain::models::Windows;

fn items(pairs: &[(&str, serde_json::Value)]) -> StorageItems {
    return pairs
        .iter()
        .map(|(key, value)| return (key.to_string(), value.clone()))
        .collect();
}

mod storage {
    use super::*;

    #[tokio::test]
    async fn it_only_returns_stored_keys() -> Result<()> {
        let area = MemoryStorageArea::new(Namespace::Local);
        area.set(items(&[("a", json!(1))])).await?;

        let res = area.get(&["a", "b"]).await?;
        assert_eq!(res, items(&[("a", json!(1))]));

        return Ok(());
    }

    #[tokio::test]
    async fn it_publishes_changes() -> Result<()> {
        let area = MemoryStorageArea::new(Namespace::Local);
        let mut rx = area.subscribe();

        area.set(items(&[("a", json!(1))])).await?;
        let change = rx.recv().await?;

        assert_eq!(change.namespace, Namespace::Local);
        assert_eq!(change.changes["a"].old_value, None);
        assert_eq!(change.changes["a"].new_value, Some(json!(1)));

        return Ok(());
    }

    #[tokio::test]
    async fn it_skips_writes_that_change_nothing() -> Result<()> {
        let area = MemoryStorageArea::new(Namespace::Sync);
        area.set(items(&[("a", json!("x"))])).await?;

        let mut rx = area.subscribe();
        area.set(items(&[("a", json!("x"))])).await?;
        area.remove(&["missing"]).await?;
        area.set(items(&[("a", json!("y"))])).await?;

        let change = rx.recv().await?;
        assert_eq!(change.changes["a"].old_value, Some(json!("x")));
        assert_eq!(change.changes["a"].new_value, Some(json!("y")));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[tokio::test]
    async fn it_publishes_removals() -> Result<()> {
        let area = MemoryStorageArea::with_items(Namespace::Local, items(&[("a", json!(true))]));
        let mut rx = area.subscribe();

        area.remove(&["a"]).await?;
        let change = rx.recv().await?;

        assert_eq!(change.changes["a"].old_value, Some(json!(true)));
        assert_eq!(change.changes["a"].new_value, None);
        assert!(area.snapshot().is_empty());

        return Ok(());
    }
}

mod windows {
    use super::*;

    #[tokio::test]
    async fn it_creates_focused_popups() -> Result<()> {
        let windows = MemoryWindows::default();
        let id = windows.create(&WindowOptions::popup()).await?;

        let popup = windows.get(id).await?.unwrap();
        assert!(popup.focused);
        assert_eq!(popup.options, WindowOptions::popup());
        assert!(!windows.get(1).await?.unwrap().focused);
        assert_eq!(windows.popups().len(), 1);

        return Ok(());
    }

    #[tokio::test]
    async fn it_forgets_removed_windows() -> Result<()> {
        let windows = MemoryWindows::default();
        let id = windows.create(&WindowOptions::popup()).await?;

        assert!(windows.remove(id));
        assert!(!windows.remove(id));
        assert_eq!(windows.get(id).await?, None);
        assert!(windows.focus(id).await.is_err());

        return Ok(());
    }

    #[tokio::test]
    async fn it_moves_focus() -> Result<()> {
        let windows = MemoryWindows::default();
        let id = windows.create(&WindowOptions::popup()).await?;

        windows.focus(1).await?;
        assert!(!windows.get(id).await?.unwrap().focused);

        windows.focus(id).await?;
        assert!(windows.get(id).await?.unwrap().focused);

        return Ok(());
    }
}

#[tokio::test]
async fn it_rejects_duplicate_menu_items() -> Result<()> {
    let menus = MemoryContextMenus::default();
    menus.create(MenuItem::explain()).await?;

    assert!(menus.create(MenuItem::explain()).await.is_err());
    assert_eq!(menus.items(), vec![MenuItem::explain()]);

    return Ok(());
}

#[tokio::test]
async fn it_reports_opened_options_pages() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let runtime = MemoryRuntime::new(tx);

    runtime.open_options_page().await?;

    assert_eq!(runtime.options_page_opened(), 1);
    assert_eq!(rx.recv().await, Some(Event::OptionsPageOpened()));

    return Ok(());
}
