#[cfg(test)]
#[path = "background_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::ConfigStore;
use super::SessionStore;
use crate::domain::models::Credential;
use crate::domain::models::Event;
use crate::domain::models::ExplainPrompt;
use crate::domain::models::Host;
use crate::domain::models::HostEvent;
use crate::domain::models::MenuClick;
use crate::domain::models::MenuItem;
use crate::domain::models::WindowId;
use crate::domain::models::WindowOptions;
use crate::domain::models::FALLBACK_EXPLANATION;
use crate::infrastructure::explainers::ExplainerBox;

/// Runs one explanation request to completion and records the outcome. Every
/// failure ends up as text in the session record.
async fn explain_text(
    explainer: ExplainerBox,
    sessions: SessionStore,
    selection: String,
    credential: Credential,
) {
    let prompt = ExplainPrompt::new(&selection);

    let explanation = match explainer.explain(&prompt, &credential).await {
        Ok(Some(text)) => text,
        Ok(None) => FALLBACK_EXPLANATION.to_string(),
        Err(err) => {
            tracing::error!(
                explainer = explainer.name().to_string(),
                error = ?err,
                "Explanation request failed"
            );
            err.user_message()
        }
    };

    if let Err(err) = sessions.complete(&explanation).await {
        tracing::error!(error = ?err, "Failed to store explanation");
    }
}

/// The background component. Owns the singleton popup window and turns menu
/// clicks into explanation requests.
pub struct Background {
    host: Host,
    explainer: ExplainerBox,
    config: ConfigStore,
    sessions: SessionStore,
    popup: WindowOptions,
    window_id: Option<WindowId>,
    events: Option<mpsc::UnboundedSender<Event>>,
}

impl Background {
    pub fn new(host: Host, explainer: ExplainerBox) -> Background {
        return Background {
            config: ConfigStore::new(host.sync_storage.clone()),
            sessions: SessionStore::new(host.local_storage.clone()),
            host,
            explainer,
            popup: WindowOptions::popup(),
            window_id: None,
            events: None,
        };
    }

    /// Reports host events that failed to whoever is driving the extension.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<Event>) -> Background {
        self.events = Some(tx);
        return self;
    }

    pub fn window_id(&self) -> Option<WindowId> {
        return self.window_id;
    }

    /// Dispatches a single host event. Returns the handle of the spawned
    /// request when the event started one.
    pub async fn handle(&mut self, event: HostEvent) -> Result<Option<JoinHandle<()>>> {
        match event {
            HostEvent::Installed() => {
                self.host.context_menus.create(MenuItem::explain()).await?;
                return Ok(None);
            }
            HostEvent::MenuClicked(click) => {
                return self.menu_clicked(click).await;
            }
            HostEvent::WindowRemoved(id) => {
                self.window_removed(id).await?;
                return Ok(None);
            }
        }
    }

    async fn menu_clicked(&mut self, click: MenuClick) -> Result<Option<JoinHandle<()>>> {
        let selection = match click.explain_selection() {
            Some(selection) => selection.to_string(),
            None => {
                tracing::debug!(
                    menu_item_id = click.menu_item_id.as_str(),
                    "Ignoring menu click"
                );
                return Ok(None);
            }
        };

        let credential = match self.config.get().await? {
            Some(credential) => credential,
            None => {
                tracing::debug!("No API key stored, opening options page");
                self.host.runtime.open_options_page().await?;
                return Ok(None);
            }
        };

        self.sessions.reset(&selection).await?;
        if let Err(err) = self.show_popup().await {
            tracing::error!(error = ?err, "Failed to show popup");
        }

        // Requests are never sequenced, whichever finishes last wins.
        let worker = tokio::spawn(explain_text(
            self.explainer.clone(),
            self.sessions.clone(),
            selection,
            credential,
        ));

        return Ok(Some(worker));
    }

    /// Focuses the tracked popup, or creates one when nothing is tracked or the
    /// tracked window is gone.
    async fn show_popup(&mut self) -> Result<()> {
        if let Some(id) = self.window_id {
            if self.host.windows.get(id).await?.is_some() {
                self.host.windows.focus(id).await?;
                return Ok(());
            }

            tracing::debug!(window_id = id, "Tracked popup is gone, creating a new one");
        }

        let id = self.host.windows.create(&self.popup).await?;
        self.window_id = Some(id);
        return Ok(());
    }

    async fn window_removed(&mut self, id: WindowId) -> Result<()> {
        if self.window_id != Some(id) {
            return Ok(());
        }

        self.window_id = None;
        self.sessions.clear().await?;
        return Ok(());
    }

    /// Processes host events until the sending side goes away.
    pub async fn start(mut self, rx: &mut mpsc::UnboundedReceiver<HostEvent>) -> Result<()> {
        let mut workers = vec![];

        while let Some(event) = rx.recv().await {
            match self.handle(event).await {
                Ok(Some(worker)) => workers.push(worker),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(error = ?err, "Failed to handle host event");
                    if let Some(tx) = &self.events {
                        // The receiver may already be gone during shutdown.
                        let _ = tx.send(Event::HostEventFailed(err.to_string()));
                    }
                }
            }

            workers.retain(|worker: &JoinHandle<()>| return !worker.is_finished());
        }

        for worker in workers {
            worker.await?;
        }

        return Ok(());
    }
}
