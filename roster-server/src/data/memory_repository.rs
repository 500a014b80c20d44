use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use roster_core::{NewUser, User};
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::error::{DomainError, StoreOp};

/// Vec-backed store with the same contract as the PostgreSQL repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    offline: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database were down.
    pub fn offline() -> Self {
        Self {
            users: Mutex::default(),
            offline: true,
        }
    }

    fn check_online(&self, op: StoreOp) -> Result<(), DomainError> {
        if self.offline {
            Err(DomainError::storage(op, "connection refused"))
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        self.check_online(StoreOp::List)?;
        Ok(self.lock().clone())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        self.check_online(StoreOp::Create)?;
        let mut users = self.lock();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail);
        }
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.check_online(StoreOp::Find)?;
        Ok(self.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, user: NewUser) -> Result<User, DomainError> {
        self.check_online(StoreOp::Update)?;
        let mut users = self.lock();
        if !users.iter().any(|u| u.id == id) {
            return Err(DomainError::UserNotFound(id.to_string()));
        }
        if users.iter().any(|u| u.id != id && u.email == user.email) {
            return Err(DomainError::DuplicateEmail);
        }
        let existing = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        existing.name = user.name;
        existing.email = user.email;
        Ok(existing.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        self.check_online(StoreOp::Delete)?;
        let mut users = self.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::UserNotFound(id.to_string()));
        }
        Ok(())
    }
}
