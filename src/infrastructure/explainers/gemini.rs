#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Credential;
use crate::domain::models::ExplainError;
use crate::domain::models::ExplainPrompt;
use crate::domain::models::Explainer;
use crate::domain::models::ExplainerName;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// The first part of the first candidate. Any other shape, including nulls
/// along the way, counts as no answer.
fn first_text(body: &Value) -> Option<String> {
    return body
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| return !text.is_empty())
        .map(|text| return text.to_string());
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

/// Statuses Gemini answers with when the API key is missing, malformed or
/// revoked.
fn is_credential_error(status: StatusCode) -> bool {
    return status == StatusCode::BAD_REQUEST
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN;
}

pub struct Gemini {
    url: String,
    model: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini::new(
            &Config::get(ConfigKey::ApiURL),
            &Config::get(ConfigKey::Model),
        );
    }
}

impl Gemini {
    pub fn new(url: &str, model: &str) -> Gemini {
        return Gemini {
            url: url.to_string(),
            model: model.to_string(),
        };
    }
}

#[async_trait]
impl Explainer for Gemini {
    fn name(&self) -> ExplainerName {
        return ExplainerName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn explain(
        &self,
        prompt: &ExplainPrompt,
        credential: &Credential,
    ) -> Result<Option<String>, ExplainError> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.text.to_string()),
                }],
            }],
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent",
                url = self.url.trim_end_matches('/'),
                model = self.model,
            ))
            .query(&[("key", credential.expose())])
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                "Failed to make explanation request to Gemini"
            );

            if is_credential_error(status) {
                return Err(ExplainError::InvalidCredential {
                    status: status.as_u16(),
                });
            }

            let reason = status.canonical_reason().unwrap_or("").to_string();
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|err| return err.error.message);

            if let Some(message) = message {
                return Err(ExplainError::Provider {
                    status: status.as_u16(),
                    reason,
                    message,
                });
            }

            return Err(ExplainError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body = res.text().await?;
        let parsed = serde_json::from_str::<Value>(&body)?;

        return Ok(first_text(&parsed));
    }
}
