// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed vector collection with BLOB embeddings.
//!
//! One table per named collection. Embeddings are stored as little-endian
//! f32 BLOBs and searched by brute-force cosine similarity; collections
//! here hold conversational memory for one user, not web-scale corpora.

use std::path::Path;
use std::sync::Arc;

use mnemo_core::{
    EmbeddingAdapter, EmbeddingInput, Metadata, MnemoError, SearchHit, StoredEntry,
    VectorCollection,
};
use tokio_rusqlite::Connection;

use crate::types::{blob_to_vec, cosine_similarity, vec_to_blob};

/// Helper to convert tokio_rusqlite errors into MnemoError::Storage.
fn storage_err(e: tokio_rusqlite::Error) -> MnemoError {
    MnemoError::Storage {
        source: Box::new(e),
    }
}

/// A named vector collection persisted in SQLite.
///
/// The embedding adapter is consulted exactly once per stored text, at
/// insertion; search embeds only the query.
pub struct SqliteVectorCollection {
    conn: Connection,
    table: String,
    embedder: Arc<dyn EmbeddingAdapter>,
}

impl SqliteVectorCollection {
    /// Opens (or creates) a collection in the database at `path`.
    pub async fn open(
        path: impl AsRef<Path>,
        name: &str,
        embedder: Arc<dyn EmbeddingAdapter>,
    ) -> Result<Self, MnemoError> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(|e| storage_err(e.into()))?;
        Self::with_connection(conn, name, embedder).await
    }

    /// Opens a collection in a fresh in-memory database. Test-friendly.
    pub async fn open_in_memory(
        name: &str,
        embedder: Arc<dyn EmbeddingAdapter>,
    ) -> Result<Self, MnemoError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| storage_err(e.into()))?;
        Self::with_connection(conn, name, embedder).await
    }

    /// Creates a collection over an existing connection, so several
    /// collections can share one database file.
    pub async fn with_connection(
        conn: Connection,
        name: &str,
        embedder: Arc<dyn EmbeddingAdapter>,
    ) -> Result<Self, MnemoError> {
        validate_collection_name(name)?;
        let collection = Self {
            conn,
            table: name.to_string(),
            embedder,
        };
        collection.create_table().await?;
        Ok(collection)
    }

    /// Name of this collection (its backing table).
    pub fn name(&self) -> &str {
        &self.table
    }

    async fn create_table(&self) -> Result<(), MnemoError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY NOT NULL,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL,
                metadata TEXT NOT NULL DEFAULT '{{}}'
            )",
            self.table
        );
        self.conn
            .call(move |conn| {
                conn.execute_batch(&sql)?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, MnemoError> {
        let output = self.embedder.embed(EmbeddingInput { texts }).await?;
        Ok(output.embeddings)
    }
}

#[async_trait::async_trait]
impl VectorCollection for SqliteVectorCollection {
    async fn add(
        &self,
        texts: Vec<String>,
        metadatas: Vec<Metadata>,
    ) -> Result<Vec<String>, MnemoError> {
        if texts.len() != metadatas.len() {
            return Err(MnemoError::Internal(format!(
                "add called with {} texts but {} metadatas",
                texts.len(),
                metadatas.len()
            )));
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self.embed(texts.clone()).await?;
        if embeddings.len() != texts.len() {
            return Err(MnemoError::Embedding {
                message: format!(
                    "embedder returned {} vectors for {} texts",
                    embeddings.len(),
                    texts.len()
                ),
                source: None,
            });
        }

        let ids: Vec<String> = texts
            .iter()
            .map(|_| uuid::Uuid::new_v4().to_string())
            .collect();
        let rows: Vec<(String, String, Vec<u8>, String)> = ids
            .iter()
            .zip(texts)
            .zip(embeddings)
            .zip(metadatas)
            .map(|(((id, text), embedding), metadata)| {
                let meta_json = serde_json::Value::Object(metadata).to_string();
                (id.clone(), text, vec_to_blob(&embedding), meta_json)
            })
            .collect();

        let sql = format!(
            "INSERT INTO {} (id, text, embedding, metadata) VALUES (?1, ?2, ?3, ?4)",
            self.table
        );
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                for (id, text, blob, meta) in &rows {
                    tx.execute(&sql, rusqlite::params![id, text, blob, meta])?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(storage_err)?;

        Ok(ids)
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, MnemoError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut query_embedding = self.embed(vec![query.to_string()]).await?;
        let query_embedding = query_embedding.pop().ok_or_else(|| MnemoError::Embedding {
            message: "embedder returned no vector for query".to_string(),
            source: None,
        })?;

        let sql = format!("SELECT text, embedding, metadata FROM {}", self.table);
        let rows: Vec<(String, Vec<u8>, String)> = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(storage_err)?;

        let mut hits: Vec<SearchHit> = rows
            .into_iter()
            .filter_map(|(text, blob, meta_json)| {
                let embedding = blob_to_vec(&blob);
                if embedding.len() != query_embedding.len() {
                    return None;
                }
                let similarity = cosine_similarity(&query_embedding, &embedding);
                Some(SearchHit {
                    text,
                    metadata: parse_metadata(&meta_json),
                    distance: 1.0 - similarity,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        Ok(hits)
    }

    async fn delete(&self, ids: &[String]) -> Result<(), MnemoError> {
        if ids.is_empty() {
            return Ok(());
        }

        let ids = ids.to_vec();
        let table = self.table.clone();
        self.conn
            .call(move |conn| {
                let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{i}")).collect();
                let sql = format!(
                    "DELETE FROM {} WHERE id IN ({})",
                    table,
                    placeholders.join(", ")
                );
                let params: Vec<&dyn rusqlite::types::ToSql> = ids
                    .iter()
                    .map(|id| id as &dyn rusqlite::types::ToSql)
                    .collect();
                conn.execute(&sql, params.as_slice())?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    async fn get_all(&self) -> Result<Vec<StoredEntry>, MnemoError> {
        let sql = format!("SELECT id, metadata FROM {}", self.table);
        let rows: Vec<(String, String)> = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(storage_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, meta_json)| StoredEntry {
                id,
                metadata: parse_metadata(&meta_json),
            })
            .collect())
    }

    async fn clear(&self) -> Result<(), MnemoError> {
        // Drop and recreate inside one serialized call, so no reader of
        // this connection observes the gap between the two.
        let table = self.table.clone();
        self.conn
            .call(move |conn| {
                conn.execute_batch(&format!(
                    "DROP TABLE IF EXISTS {table};
                     CREATE TABLE {table} (
                        id TEXT PRIMARY KEY NOT NULL,
                        text TEXT NOT NULL,
                        embedding BLOB NOT NULL,
                        metadata TEXT NOT NULL DEFAULT '{{}}'
                     );"
                ))?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }
}

/// Parse a stored metadata JSON string; corrupt rows degrade to an empty
/// map rather than failing the whole scan.
fn parse_metadata(meta_json: &str) -> Metadata {
    match serde_json::from_str(meta_json) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => Metadata::new(),
    }
}

/// Collection names become table names; restrict them accordingly.
fn validate_collection_name(name: &str) -> Result<(), MnemoError> {
    let valid = !name.is_empty()
        && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(MnemoError::Config(format!(
            "invalid collection name `{name}`: use lowercase ascii, digits, underscores"
        )))
    }
}
