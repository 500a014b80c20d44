use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use roster_core::{Envelope, ValidationError};
use thiserror::Error;

/// Storage operation that failed, used to word the public error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Find,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StoreOp::List => "fetch users",
            StoreOp::Find => "fetch user",
            StoreOp::Create => "create user",
            StoreOp::Update => "update user",
            StoreOp::Delete => "delete user",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("email already exists")]
    DuplicateEmail,
    #[error("failed to {op}: {reason}")]
    StorageUnavailable { op: StoreOp, reason: String },
    #[error("webhook configuration missing")]
    WebhookNotConfigured,
    #[error("webhook responded with {status}: {message}")]
    WebhookRejected { status: u16, message: String },
    #[error("webhook unreachable: {0}")]
    WebhookUnreachable(String),
}

impl DomainError {
    pub fn storage(op: StoreOp, err: impl fmt::Display) -> Self {
        DomainError::StorageUnavailable {
            op,
            reason: err.to_string(),
        }
    }

    /// Text placed in the envelope's `error` field. Driver and transport
    /// details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Validation(err) => err.to_string(),
            DomainError::InvalidBody(_) => "Invalid request body".to_string(),
            DomainError::UserNotFound(_) => "User not found".to_string(),
            DomainError::DuplicateEmail => "Email already exists".to_string(),
            DomainError::StorageUnavailable { op, .. } => format!("Failed to {op}"),
            DomainError::WebhookNotConfigured => "n8n webhook configuration missing".to_string(),
            DomainError::WebhookRejected { message, .. } => message.clone(),
            DomainError::WebhookUnreachable(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) | DomainError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            DomainError::UserNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::DuplicateEmail => StatusCode::CONFLICT,
            DomainError::WebhookRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            DomainError::StorageUnavailable { .. }
            | DomainError::WebhookNotConfigured
            | DomainError::WebhookUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::<()>::fail(self.public_message()))
    }
}
