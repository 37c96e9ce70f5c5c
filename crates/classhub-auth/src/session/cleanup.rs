//! Expired session row cleanup.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use classhub_core::result::AppResult;

use crate::store::SessionStore;

/// Purges expired session rows from the store.
///
/// Correctness does not depend on this: expiry is enforced lazily at
/// resolution time. The reaper only keeps the table from accumulating
/// dead rows. The server schedules it on a fixed interval.
#[derive(Clone)]
pub struct SessionCleanup {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCleanup").finish()
    }
}

impl SessionCleanup {
    /// Creates a new cleanup handler over the session store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Runs one cleanup cycle. Returns the number of rows purged.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let purged = self.store.delete_expired(Utc::now()).await?;

        if purged > 0 {
            info!(purged, "Expired sessions purged");
        }

        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use chrono::Duration;
    use classhub_entity::session::SessionEntry;

    #[tokio::test]
    async fn test_cleanup_purges_only_expired_rows() {
        let store = Arc::new(MemorySessionStore::new());
        let now = Utc::now();

        for (token, offset_days) in [("stale", -2), ("fresh", 2)] {
            store
                .put(&SessionEntry {
                    token: token.to_string(),
                    payload: serde_json::json!({}),
                    created_at: now - Duration::days(30),
                    expires_at: now + Duration::days(offset_days),
                })
                .await
                .unwrap();
        }

        let cleanup = SessionCleanup::new(Arc::clone(&store) as Arc<dyn SessionStore>);
        assert_eq!(cleanup.run_cleanup().await.unwrap(), 1);
        assert!(store.get("stale").await.unwrap().is_none());
        assert!(store.get("fresh").await.unwrap().is_some());

        // Nothing left to purge on the next cycle.
        assert_eq!(cleanup.run_cleanup().await.unwrap(), 0);
    }
}
