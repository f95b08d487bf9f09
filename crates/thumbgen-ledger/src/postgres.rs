//! Postgres-backed document store.
//!
//! One `documents` table keyed by collection name, with the record body in a
//! jsonb column. Append-only by construction: the only statement this module
//! issues is an INSERT.

use crate::traits::{DocumentStore, LedgerError, LedgerResult};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

const MAX_CONNECTIONS: u32 = 5;

/// Postgres document store.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and run the embedded migrations.
    pub async fn connect(database_url: &str) -> LedgerResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(|e| LedgerError::ConfigError(format!("Failed to connect: {}", e)))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| LedgerError::ConfigError(format!("Migration failed: {}", e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[tracing::instrument(skip(self, document), fields(db.table = "documents"))]
    async fn append(
        &self,
        collection: &str,
        document: serde_json::Value,
    ) -> LedgerResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO documents (id, collection, data)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(&document)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, collection = %collection, "Document append failed");
            LedgerError::WriteFailed(e.to_string())
        })?;

        tracing::debug!(document_id = %id, collection = %collection, "Document appended");

        Ok(id)
    }
}
