//! Settings database operations.
//!
//! A single-table key/value store (JSONB values). The category registry
//! persists its list here under the `"categories"` key.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use super::RepositoryError;
use crate::catalog::registry::SettingsStore;

/// Get a setting value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_setting(pool: &PgPool, key: &str) -> Result<Option<JsonValue>, RepositoryError> {
    let result: Option<JsonValue> =
        sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await?;

    Ok(result)
}

/// Set a setting value, inserting or overwriting.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn set_setting(
    pool: &PgPool,
    key: &str,
    value: &JsonValue,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO settings (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
        ",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// `PostgreSQL`-backed implementation of the settings port.
#[derive(Clone)]
pub struct PgSettings {
    pool: PgPool,
}

impl PgSettings {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettings {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, RepositoryError> {
        get_setting(&self.pool, key).await
    }

    async fn set(&self, key: &str, value: &JsonValue) -> Result<(), RepositoryError> {
        set_setting(&self.pool, key, value).await
    }
}
