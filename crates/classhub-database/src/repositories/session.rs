//! Session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use classhub_core::error::{AppError, ErrorKind};
use classhub_core::result::AppResult;
use classhub_entity::session::SessionEntry;

/// Repository for the durable session table.
///
/// The table is created on first use rather than by a migration, so the
/// service can point at any database and start resolving sessions
/// immediately. Sessions survive process restarts.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `user_sessions` table and its expiry index if absent.
    pub async fn ensure_table(&self) -> AppResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS user_sessions (\
                 token TEXT PRIMARY KEY, \
                 payload JSONB NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL, \
                 expires_at TIMESTAMPTZ NOT NULL\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create session table", e)
        })?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS user_sessions_expires_at_idx \
             ON user_sessions (expires_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create session index", e)
        })?;

        Ok(())
    }

    /// Insert a new session row.
    pub async fn insert(&self, entry: &SessionEntry) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_sessions (token, payload, created_at, expires_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&entry.token)
        .bind(&entry.payload)
        .bind(entry.created_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;

        Ok(())
    }

    /// Find a session row by token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<SessionEntry>> {
        sqlx::query_as::<_, SessionEntry>("SELECT * FROM user_sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Delete a session row. Deleting an absent token is not an error.
    pub async fn delete(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM user_sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))?;

        Ok(())
    }

    /// Delete all rows that expired at or before `now`. Returns the number
    /// of rows removed.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired sessions", e)
            })?;

        Ok(result.rows_affected())
    }
}
