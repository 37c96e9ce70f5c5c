//! Identity and session store contracts.
//!
//! The rest of the subsystem depends on these traits only; the concrete
//! backend is chosen at wiring time. Production uses the Postgres
//! repositories, single-node tooling and tests use the in-memory stores.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use classhub_core::result::AppResult;
use classhub_entity::session::SessionEntry;
use classhub_entity::user::{CreateUser, User};

pub use memory::{MemoryIdentityStore, MemorySessionStore};

/// Narrow persistence boundary for user credential records.
///
/// Implementations perform no hashing and no session logic.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Find a record by exact email match. Absence is not an error.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a record by unique id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new record. A second record with an existing email is
    /// rejected by the backing store's uniqueness guarantee, never by a
    /// pre-check.
    async fn insert(&self, data: CreateUser) -> AppResult<User>;
}

/// Durable mapping from session token to serialized session payload.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Persist a session entry.
    async fn put(&self, entry: &SessionEntry) -> AppResult<()>;

    /// Fetch a session entry by token, expired or not.
    async fn get(&self, token: &str) -> AppResult<Option<SessionEntry>>;

    /// Delete a session entry. Deleting an absent token is not an error.
    async fn delete(&self, token: &str) -> AppResult<()>;

    /// Remove entries expired at or before `now`; returns how many rows
    /// were purged.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
