// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector collection trait: one named partition of (vector, text, metadata) records.

use async_trait::async_trait;

use crate::error::MnemoError;
use crate::types::{Metadata, SearchHit, StoredEntry};

/// A named collection of (embedding, text, metadata) triples supporting
/// nearest-neighbor search, batch delete, and full rebuild.
///
/// Records are immutable after insertion: the embedding is derived from the
/// text exactly once at [`add`](VectorCollection::add) time and never
/// recomputed. The only mutation the collection supports is deletion.
#[async_trait]
pub trait VectorCollection: Send + Sync + 'static {
    /// Embeds and appends the given texts, returning one assigned id per text.
    ///
    /// `texts` and `metadatas` must have equal length.
    async fn add(
        &self,
        texts: Vec<String>,
        metadatas: Vec<Metadata>,
    ) -> Result<Vec<String>, MnemoError>;

    /// Returns up to `k` records nearest to `query`, closest first.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, MnemoError>;

    /// Deletes the records with the given ids. Unknown ids are ignored.
    async fn delete(&self, ids: &[String]) -> Result<(), MnemoError>;

    /// Returns the (id, metadata) pair of every record in the collection.
    async fn get_all(&self) -> Result<Vec<StoredEntry>, MnemoError>;

    /// Destroys and recreates the collection, discarding every record.
    ///
    /// Used for full rebuilds where no stale record may survive.
    async fn clear(&self) -> Result<(), MnemoError>;
}
