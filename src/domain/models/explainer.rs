#[cfg(test)]
#[path = "explainer_test.rs"]
mod tests;

use async_trait::async_trait;

use super::Credential;
use super::ExplainPrompt;

pub const FALLBACK_EXPLANATION: &str = "Sorry, I couldn't get an explanation. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExplainerName {
    Gemini,
}

#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// Rejected with a status that points at the API key.
    #[error("API Error: {status}. Your API key might be invalid. Please check it in the extension options.")]
    InvalidCredential { status: u16 },

    #[error("API Error: {status} {reason} - {message}")]
    Provider {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("API Error: {status} {reason}")]
    Status { status: u16, reason: String },

    /// Never carries the request URL, the API key travels in its query.
    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("Unexpected response from the provider: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ExplainError {
    fn from(err: reqwest::Error) -> ExplainError {
        return ExplainError::Transport(err.without_url());
    }
}

impl ExplainError {
    /// The text written to the session record in place of an explanation.
    pub fn user_message(&self) -> String {
        return format!("An error occurred: {self}");
    }
}

#[async_trait]
pub trait Explainer {
    fn name(&self) -> ExplainerName;

    /// Sends one request to the provider. Resolves to `None` when the provider
    /// answered successfully but without any candidate text.
    async fn explain(
        &self,
        prompt: &ExplainPrompt,
        credential: &Credential,
    ) -> Result<Option<String>, ExplainError>;
}
