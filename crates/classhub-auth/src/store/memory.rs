//! In-memory stores using Tokio mutexes, for single-node tooling and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use classhub_core::error::AppError;
use classhub_core::result::AppResult;
use classhub_entity::session::SessionEntry;
use classhub_entity::user::{CreateUser, User};

use super::{IdentityStore, SessionStore};

/// In-memory identity store keyed by user id.
///
/// Email uniqueness is checked under the same lock that performs the
/// insert, mirroring the atomicity the unique index provides in Postgres.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryIdentityStore {
    /// Creates an empty identity store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.get(&id).cloned())
    }

    async fn insert(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.lock().await;

        if users.values().any(|u| u.email == data.email) {
            return Err(AppError::conflict("Email already registered"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
            role: data.role,
            profile_image: data.profile_image,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory session store keyed by token.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl MemorySessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, entry: &SessionEntry) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(entry.token.clone(), entry.clone());
        Ok(())
    }

    async fn get(&self, token: &str) -> AppResult<Option<SessionEntry>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(token).cloned())
    }

    async fn delete(&self, token: &str) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(token);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok((before - entries.len()) as u64)
    }
}
