use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Event;
use crate::domain::models::ExplainerName;
use crate::domain::models::Host;
use crate::domain::models::HostEvent;
use crate::domain::models::MenuClick;
use crate::domain::models::Namespace;
use crate::domain::models::PopupView;
use crate::domain::models::EXPLAIN_MENU_ITEM_ID;
use crate::domain::services::Background;
use crate::domain::services::PresentationMirror;
use crate::infrastructure::explainers::ExplainerManager;
use crate::infrastructure::host::FileStorageArea;
use crate::infrastructure::host::MemoryContextMenus;
use crate::infrastructure::host::MemoryRuntime;
use crate::infrastructure::host::MemoryStorageArea;
use crate::infrastructure::host::MemoryWindows;

fn print_original_text(view: &PopupView) {
    println!("{}", Paint::cyan("Original text").bold());
    println!("{}\n", view.original_text);
}

fn print_explanation(view: &PopupView) {
    println!("{}", Paint::green("Simplified explanation").bold());
    println!("{}", view.explanation);
}

/// Runs one explain flow: install, click, then mirror the popup to the
/// terminal until the explanation settles.
pub async fn start(selection: String) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let (host_tx, mut host_rx) = mpsc::unbounded_channel::<HostEvent>();

    let storage_dir = path::PathBuf::from(Config::get(ConfigKey::StorageDir));
    let windows = Arc::new(MemoryWindows::default());
    let host = Host {
        context_menus: Arc::new(MemoryContextMenus::default()),
        runtime: Arc::new(MemoryRuntime::new(event_tx.clone())),
        windows: windows.clone(),
        sync_storage: Arc::new(FileStorageArea::open(Namespace::Sync, &storage_dir).await?),
        local_storage: Arc::new(MemoryStorageArea::new(Namespace::Local)),
    };

    let mut mirror =
        tokio::spawn(PresentationMirror::new(host.local_storage.clone()).start(event_tx.clone()));
    let background =
        Background::new(host, ExplainerManager::get(ExplainerName::Gemini)).with_events(event_tx);
    let background_worker = tokio::spawn(async move {
        return background.start(&mut host_rx).await;
    });

    host_tx.send(HostEvent::Installed())?;
    host_tx.send(HostEvent::MenuClicked(MenuClick::new(
        EXPLAIN_MENU_ITEM_ID,
        Some(&selection),
    )))?;

    let mut failure: Option<String> = None;
    let mut loading_shown = false;
    loop {
        let event = tokio::select! {
            event = event_rx.recv() => event,
            res = &mut mirror => {
                failure = Some(match res {
                    Ok(Ok(())) => "The popup stopped before an explanation arrived.".to_string(),
                    Ok(Err(err)) => err.to_string(),
                    Err(err) => err.to_string(),
                });
                break;
            }
        };

        let event = match event {
            Some(event) => event,
            None => break,
        };

        match event {
            Event::HostEventFailed(message) => {
                failure = Some(message);
                break;
            }
            Event::OptionsPageOpened() => {
                eprintln!(
                    "{}",
                    Paint::yellow(
                        "No API key found. Set one with `explain-buddy options set-key <KEY>` and try again."
                    )
                );
                break;
            }
            Event::PopupRendered(view) => {
                if view.loader_visible && !loading_shown {
                    print_original_text(&view);
                    println!("{}", Paint::new("Loading...").dimmed());
                    loading_shown = true;
                    continue;
                }

                if view.is_settled() {
                    if !loading_shown {
                        print_original_text(&view);
                    }
                    print_explanation(&view);
                    break;
                }
            }
        }
    }

    for popup in windows.popups() {
        if windows.remove(popup.id) {
            host_tx.send(HostEvent::WindowRemoved(popup.id))?;
        }
    }

    drop(host_tx);
    background_worker.await??;
    mirror.abort();

    if let Some(message) = failure {
        bail!(message);
    }

    return Ok(());
}
