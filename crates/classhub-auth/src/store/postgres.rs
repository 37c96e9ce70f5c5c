//! Postgres-backed store implementations.
//!
//! Thin delegations onto the sqlx repositories; uniqueness and durability
//! come from the database's constraint and transaction guarantees.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use classhub_core::result::AppResult;
use classhub_database::repositories::{SessionRepository, UserRepository};
use classhub_entity::session::SessionEntry;
use classhub_entity::user::{CreateUser, User};

use super::{IdentityStore, SessionStore};

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn insert(&self, data: CreateUser) -> AppResult<User> {
        self.create(&data).await
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn put(&self, entry: &SessionEntry) -> AppResult<()> {
        self.insert(entry).await
    }

    async fn get(&self, token: &str) -> AppResult<Option<SessionEntry>> {
        self.find_by_token(token).await
    }

    async fn delete(&self, token: &str) -> AppResult<()> {
        SessionRepository::delete(self, token).await
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        SessionRepository::delete_expired(self, now).await
    }
}
