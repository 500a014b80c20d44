use std::time::Duration;

use reqwest::Client;
use roster_core::ValidationError;
use roster_core::validation::has_name_and_email;
use serde_json::{Value, json};
use tracing::{error, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::infrastructure::config::WebhookConfig;

const SECRET_HEADER: &str = "x-n8n-secret";
const DEFAULT_FAILURE: &str = "Failed to trigger workflow";

/// Forwards `{name, email}` submissions to the workflow webhook.
#[derive(Clone)]
pub struct WorkflowRelay {
    client: Client,
    webhook: Option<WebhookConfig>,
}

impl WorkflowRelay {
    pub fn new(webhook: Option<WebhookConfig>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, webhook })
    }

    /// Returns the webhook's response body: parsed JSON, `{"message": text}`
    /// for non-JSON text, or `null` when empty.
    #[instrument(skip_all)]
    pub async fn trigger(&self, submission: &Value) -> Result<Value, DomainError> {
        if !has_name_and_email(submission) {
            return Err(ValidationError::MissingField.into());
        }

        let webhook = self
            .webhook
            .as_ref()
            .ok_or(DomainError::WebhookNotConfigured)?;

        let payload = json!({
            "name": submission["name"],
            "email": submission["email"],
        });

        let response = self
            .client
            .post(&webhook.url)
            .header(SECRET_HEADER, &webhook.secret)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("webhook request failed: {}", e);
                DomainError::WebhookUnreachable(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("failed to read webhook response: {}", e);
            DomainError::WebhookUnreachable(e.to_string())
        })?;
        let data = parse_body(&text);

        if !status.is_success() {
            let message = data
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_FAILURE)
                .to_string();
            warn!(status = status.as_u16(), %message, "webhook rejected submission");
            return Err(DomainError::WebhookRejected {
                status: status.as_u16(),
                message,
            });
        }

        info!(status = status.as_u16(), "workflow triggered");
        Ok(data)
    }
}

fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": text }))
}
