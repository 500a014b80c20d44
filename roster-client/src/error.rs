use reqwest::{Response, StatusCode};
use roster_core::{Envelope, ValidationError};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid user: {0}")]
    Invalid(#[from] ValidationError),
    #[error("User not found")]
    NotFound,
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl RosterClientError {
    /// Builds an error from a non-2xx response, preferring the envelope's
    /// `error` text over the bare status.
    pub(crate) async fn from_http_response(resp: Response) -> Self {
        let status = resp.status();
        match status {
            StatusCode::NOT_FOUND => return RosterClientError::NotFound,
            StatusCode::CONFLICT => return RosterClientError::DuplicateEmail,
            _ => {}
        }

        let message = resp
            .json::<Envelope<Value>>()
            .await
            .ok()
            .and_then(|env| env.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        RosterClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
