#[cfg(test)]
#[path = "options_page_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;
use tokio::time;

use super::ConfigStore;
use crate::domain::models::Credential;

pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

/// The settings surface: a single API key field and a save action.
pub struct OptionsPage {
    store: ConfigStore,
    status: Arc<watch::Sender<Option<Status>>>,
}

impl OptionsPage {
    pub fn new(store: ConfigStore) -> OptionsPage {
        let (status, _) = watch::channel(None);
        return OptionsPage {
            store,
            status: Arc::new(status),
        };
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Status>> {
        return self.status.subscribe();
    }

    /// The value the key field starts out with.
    pub async fn load(&self) -> Result<String> {
        let credential = self.store.get().await?;
        return Ok(credential
            .map(|credential| return credential.expose().to_string())
            .unwrap_or_default());
    }

    pub async fn save(&self, input: &str) -> Result<Status> {
        let credential = match Credential::parse(input) {
            Ok(credential) => credential,
            Err(err) => {
                return Ok(self.show_status(&err.to_string(), true));
            }
        };

        self.store.set(&credential).await?;
        tracing::debug!(credential = ?credential, "Saved API key");

        return Ok(self.show_status("API key saved successfully!", false));
    }

    /// Publishes the status and clears it again after a short delay. Every
    /// message gets its own timer.
    fn show_status(&self, message: &str, is_error: bool) -> Status {
        let status = Status {
            message: message.to_string(),
            is_error,
        };
        self.status.send_replace(Some(status.clone()));

        let sender = self.status.clone();
        tokio::spawn(async move {
            time::sleep(STATUS_CLEAR_DELAY).await;
            sender.send_replace(None);
        });

        return status;
    }
}
