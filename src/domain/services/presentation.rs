#[cfg(test)]
#[path = "presentation_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use super::SessionStore;
use crate::domain::models::Event;
use crate::domain::models::Namespace;
use crate::domain::models::PopupView;
use crate::domain::models::StorageAreaBox;

/// The popup. Mirrors the session record and never computes anything itself.
pub struct PresentationMirror {
    storage: StorageAreaBox,
    sessions: SessionStore,
    view: PopupView,
}

impl PresentationMirror {
    pub fn new(storage: StorageAreaBox) -> PresentationMirror {
        return PresentationMirror {
            sessions: SessionStore::new(storage.clone()),
            storage,
            view: PopupView::default(),
        };
    }

    /// Re-reads the whole record, not just what changed, and renders it.
    pub async fn refresh(&mut self) -> Result<PopupView> {
        let record = self.sessions.read().await?;
        self.view.apply(&record);
        return Ok(self.view.clone());
    }

    /// Renders once, then again after every change to the local namespace,
    /// until the storage area goes away.
    pub async fn start(mut self, tx: mpsc::UnboundedSender<Event>) -> Result<()> {
        // Subscribe before the first read so nothing slips in between.
        let mut changes = self.storage.subscribe();
        tx.send(Event::PopupRendered(self.refresh().await?))?;

        loop {
            match changes.recv().await {
                Ok(change) => {
                    if change.namespace != Namespace::Local {
                        continue;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Popup fell behind on storage changes");
                }
                Err(RecvError::Closed) => {
                    return Ok(());
                }
            }

            tx.send(Event::PopupRendered(self.refresh().await?))?;
        }
    }
}
