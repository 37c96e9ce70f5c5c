//! Session lifecycle — start on login, resolve per request, destroy on logout.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, warn};

use classhub_core::config::session::SessionConfig;
use classhub_core::result::AppResult;
use classhub_entity::identity::Identity;
use classhub_entity::session::SessionEntry;

use crate::store::SessionStore;
use crate::token::generate_token;

/// Manages the session lifecycle over a durable session store.
///
/// The session payload is the serialized identity, so resolution is
/// self-contained between logins: role or name changes are not reflected
/// until the user logs in again, in exchange for never touching the user
/// table on authenticated requests.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Starts a session for the given identity and returns its token.
    ///
    /// The caller hands the token to the client as an HTTP-only cookie.
    pub async fn start(&self, identity: &Identity) -> AppResult<String> {
        let now = Utc::now();
        let entry = SessionEntry {
            token: generate_token(),
            payload: serde_json::to_value(identity)?,
            created_at: now,
            expires_at: now + Duration::days(self.config.ttl_days),
        };

        self.store.put(&entry).await?;

        debug!(
            user_id = %identity.id,
            token = %entry.token_fragment(),
            expires_at = %entry.expires_at,
            "Session started"
        );

        Ok(entry.token)
    }

    /// Resolves a token back to an identity.
    ///
    /// Absent, expired, and undecodable sessions all resolve to `None`;
    /// the caller treats that as "not authenticated", never as a server
    /// error. Expiry is checked lazily here; the reaper only exists for
    /// storage hygiene.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<Identity>> {
        let Some(entry) = self.store.get(token).await? else {
            return Ok(None);
        };

        if entry.is_expired() {
            debug!(token = %entry.token_fragment(), "Session expired");
            return Ok(None);
        }

        match serde_json::from_value::<Identity>(entry.payload.clone()) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                // An undecodable payload can never resolve again; drop the row.
                warn!(
                    token = %entry.token_fragment(),
                    error = %e,
                    "Discarding session with undecodable payload"
                );
                self.store.delete(token).await?;
                Ok(None)
            }
        }
    }

    /// Destroys a session unconditionally. Destroying an already-absent
    /// token is not an error.
    pub async fn destroy(&self, token: &str) -> AppResult<()> {
        self.store.delete(token).await?;
        debug!("Session destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use classhub_entity::user::UserRole;
    use uuid::Uuid;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            username: "abell".to_string(),
            email: "a@x.com".to_string(),
            role: UserRole::Student,
            first_name: "A".to_string(),
            last_name: "Bell".to_string(),
        }
    }

    fn manager(store: Arc<MemorySessionStore>) -> SessionManager {
        SessionManager::new(store, SessionConfig::default())
    }

    #[tokio::test]
    async fn test_start_then_resolve() {
        let manager = manager(Arc::new(MemorySessionStore::new()));
        let identity = identity();

        let token = manager.start(&identity).await.unwrap();
        let resolved = manager.resolve(&token).await.unwrap().unwrap();
        assert_eq!(resolved, identity);
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_to_none() {
        let manager = manager(Arc::new(MemorySessionStore::new()));
        assert!(manager.resolve("never-issued").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destroyed_token_resolves_to_none() {
        let manager = manager(Arc::new(MemorySessionStore::new()));
        let token = manager.start(&identity()).await.unwrap();

        manager.destroy(&token).await.unwrap();
        assert!(manager.resolve(&token).await.unwrap().is_none());

        // Destroy is idempotent.
        manager.destroy(&token).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_token_resolves_to_none_while_row_remains() {
        let store = Arc::new(MemorySessionStore::new());
        let manager = manager(Arc::clone(&store));

        let entry = SessionEntry {
            token: "expired-token".to_string(),
            payload: serde_json::to_value(identity()).unwrap(),
            created_at: Utc::now() - Duration::days(31),
            expires_at: Utc::now() - Duration::days(1),
        };
        store.put(&entry).await.unwrap();

        assert!(manager.resolve("expired-token").await.unwrap().is_none());
        // The row still physically exists; only resolution treats it as gone.
        assert!(store.get("expired-token").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_undecodable_payload_resolves_to_none_and_drops_row() {
        let store = Arc::new(MemorySessionStore::new());
        let manager = manager(Arc::clone(&store));

        let entry = SessionEntry {
            token: "garbled".to_string(),
            payload: serde_json::json!({"not": "an identity"}),
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::days(1),
        };
        store.put(&entry).await.unwrap();

        assert!(manager.resolve("garbled").await.unwrap().is_none());
        assert!(store.get("garbled").await.unwrap().is_none());
    }
}
