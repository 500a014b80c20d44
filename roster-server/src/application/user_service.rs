use std::sync::Arc;

use roster_core::{User, validate_candidate};
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;

/// Runs candidates through the validation gate before handing them to the
/// repository.
pub struct UserService<R: UserRepository + 'static> {
    repo: Arc<R>,
}

impl<R: UserRepository + 'static> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> UserService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn find_user(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.find_user(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))
    }

    #[instrument(skip(self, candidate))]
    pub async fn create_user(&self, candidate: &Value) -> Result<User, DomainError> {
        let user = validate_candidate(candidate)?;
        self.repo.insert(user).await
    }

    #[instrument(skip(self, candidate))]
    pub async fn update_user(&self, id: Uuid, candidate: &Value) -> Result<User, DomainError> {
        let user = validate_candidate(candidate)?;
        self.repo.update_by_id(id, user).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete_by_id(id).await
    }
}
