use reqwest::{Client, Response};
use roster_core::{Envelope, User, validate_candidate};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::error::RosterClientError;

/// Async client for the `/api` surface of the roster server.
#[derive(Clone)]
pub struct RosterClient {
    client: Client,
    base_url: String,
}

impl RosterClient {
    pub fn connect(endpoint: &str) -> Result<Self, RosterClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, RosterClientError> {
        let resp = self.client.get(self.url("/users")).send().await?;
        read_data(resp).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, RosterClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/users/{id}")))
            .send()
            .await?;
        read_data(resp).await
    }

    /// Validates locally and only then posts the new user.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, RosterClientError> {
        let user = validate_candidate(&json!({ "name": name, "email": email }))?;
        let resp = self
            .client
            .post(self.url("/users"))
            .json(&user)
            .send()
            .await?;
        read_data(resp).await
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<User, RosterClientError> {
        let user = validate_candidate(&json!({ "name": name, "email": email }))?;
        let resp = self
            .client
            .put(self.url(&format!("/users/{id}")))
            .json(&user)
            .send()
            .await?;
        read_data(resp).await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), RosterClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(RosterClientError::from_http_response(resp).await)
        }
    }

    /// Submits `{name, email}` to the server's workflow relay and returns the
    /// webhook's reply.
    pub async fn trigger_workflow(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Value, RosterClientError> {
        let resp = self
            .client
            .post(self.url("/n8n-test"))
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(RosterClientError::from_http_response(resp).await);
        }
        let envelope: Envelope<Value> = resp.json().await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

async fn read_data<T: DeserializeOwned>(resp: Response) -> Result<T, RosterClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(RosterClientError::from_http_response(resp).await);
    }

    let envelope: Envelope<T> = resp.json().await?;
    debug!(status = status.as_u16(), "envelope received");
    match envelope.into_result() {
        Ok(Some(data)) => Ok(data),
        Ok(None) => Err(RosterClientError::Api {
            status: status.as_u16(),
            message: "response carried no data".to_string(),
        }),
        Err(message) => Err(RosterClientError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}
