//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::entities::Mapping;
use crate::domain::error::StoreError;
use crate::domain::repositories::{MappingStore, MappingTransaction};

/// Row shape of the `urls` table.
#[derive(Debug, sqlx::FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    code: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(r: MappingRow) -> Self {
        Mapping::new(r.id, r.original_url, r.code, r.created_at)
    }
}

/// PostgreSQL store for mappings.
///
/// Owns the connection pool. Each operation checks a connection out for its
/// own duration only; ids come from the `urls_id_seq` sequence behind
/// `BIGSERIAL`, which never reuses a value even when a transaction aborts.
pub struct PgMappingStore {
    pool: Arc<PgPool>,
}

impl PgMappingStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn begin(&self) -> Result<Box<dyn MappingTransaction>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgMappingTransaction { tx }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, code, created_at
            FROM urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn list_all(&self) -> Result<Vec<Mapping>, StoreError> {
        let rows = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, original_url, code, created_at
            FROM urls
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Mapping::from).collect())
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM urls WHERE code = $1")
            .bind(code)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

/// An open PostgreSQL transaction.
///
/// SQLx rolls the transaction back when it is dropped uncommitted, so a
/// cancelled request never leaves it open.
pub struct PgMappingTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl MappingTransaction for PgMappingTransaction {
    async fn insert(
        &mut self,
        original_url: &str,
        placeholder_code: &str,
    ) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO urls (original_url, code) VALUES ($1, $2) RETURNING id",
        )
        .bind(original_url)
        .bind(placeholder_code)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(id)
    }

    async fn finalize_code(&mut self, id: i64, code: &str) -> Result<Mapping, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            UPDATE urls
            SET code = $2
            WHERE id = $1
            RETURNING id, original_url, code, created_at
            "#,
        )
        .bind(id)
        .bind(code)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(Mapping::from).ok_or(StoreError::MissingRow { id })
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
