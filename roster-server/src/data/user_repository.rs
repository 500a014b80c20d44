use crate::domain::error::{DomainError, StoreOp};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::{NewUser, User};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Persistence for the `users` table. Every method is a single statement.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn update_by_id(&self, id: Uuid, user: NewUser) -> Result<User, DomainError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a write failure, singling out the unique-email violation.
fn write_error(op: StoreOp, e: sqlx::Error) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::DuplicateEmail
    } else {
        error!("failed to {}: {}", op, e);
        DomainError::storage(op, e)
    }
}

// SQLSTATE 23505: unique_violation
fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching users: {}", e);
            DomainError::storage(StoreOp::List, e)
        })?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(StoreOp::Create, e))?;

        info!(user_id = %row.id, email = %row.email, "user created");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(User::from))
        .map_err(|e| {
            error!("failed to find user by id {}: {}", id, e);
            DomainError::storage(StoreOp::Find, e)
        })
    }

    async fn update_by_id(&self, id: Uuid, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = $1, email = $2
            WHERE id = $3
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(StoreOp::Update, e))?
        .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;

        info!(user_id = %id, "user updated");
        Ok(row.into())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete user {}: {}", id, e);
                DomainError::storage(StoreOp::Delete, e)
            })?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id.to_string()));
        }

        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
