//! # Storage Repository
//!
//! Namespaced JSON records in the `kv_store` table.
//!
//! ```text
//! ┌──────────────────┬─────────┬──────────────────────────┬─────────────┐
//! │ namespace (PK)   │ version │ payload (JSON text)      │ updated_at  │
//! ├──────────────────┼─────────┼──────────────────────────┼─────────────┤
//! │ auth-storage     │ 1       │ {"user":{...}}           │ 2024-...    │
//! │ product-storage  │ 1       │ {"products":[...]}       │ 2024-...    │
//! └──────────────────┴─────────┴──────────────────────────┴─────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::STORAGE_SCHEMA_VERSION;

/// One stored row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StoredRecord {
    pub namespace: String,
    pub version: i64,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository over the whole `kv_store` table.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Fetches the raw record for `namespace`, if any.
    pub async fn load(&self, namespace: &str) -> DbResult<Option<StoredRecord>> {
        let record = sqlx::query_as::<_, StoredRecord>(
            r#"
            SELECT namespace, version, payload, updated_at
            FROM kv_store
            WHERE namespace = ?1
            "#,
        )
        .bind(namespace)
        .fetch_optional(&self.pool)
        .await?;

        debug!(namespace, found = record.is_some(), "Loaded record");
        Ok(record)
    }

    /// Inserts or replaces the record for `namespace`.
    pub async fn save(&self, namespace: &str, version: i64, payload: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (namespace, version, payload, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(namespace) DO UPDATE SET
                version = excluded.version,
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(namespace)
        .bind(version)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(namespace, version, bytes = payload.len(), "Saved record");
        Ok(())
    }

    /// Removes the record. Returns whether one existed.
    pub async fn delete(&self, namespace: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE namespace = ?1")
            .bind(namespace)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All stored namespaces, sorted.
    pub async fn namespaces(&self) -> DbResult<Vec<String>> {
        let names = sqlx::query_scalar("SELECT namespace FROM kv_store ORDER BY namespace")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    /// Loads and decodes `namespace`.
    ///
    /// Returns `Ok(None)` when nothing is stored and
    /// [`DbError::UnsupportedVersion`] when the record is newer than
    /// [`STORAGE_SCHEMA_VERSION`].
    pub async fn load_json<T: DeserializeOwned>(&self, namespace: &str) -> DbResult<Option<T>> {
        let Some(record) = self.load(namespace).await? else {
            return Ok(None);
        };

        if record.version > STORAGE_SCHEMA_VERSION {
            return Err(DbError::UnsupportedVersion {
                namespace: record.namespace,
                found: record.version,
                supported: STORAGE_SCHEMA_VERSION,
            });
        }

        Ok(Some(serde_json::from_str(&record.payload)?))
    }

    /// Encodes `value` and saves it at the current schema version.
    pub async fn save_json<T: Serialize>(&self, namespace: &str, value: &T) -> DbResult<()> {
        let payload = serde_json::to_string(value)?;
        self.save(namespace, STORAGE_SCHEMA_VERSION, &payload).await
    }
}
