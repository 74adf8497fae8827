// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static knowledge store: a file-backed collection of user-profile chunks.
//!
//! The source document is split into bounded-length overlapping chunks and
//! the backing collection is destroyed and rebuilt whenever the file's
//! modification time changes. Full replacement guarantees no stale chunk
//! survives a content change; the document is small, so the cost is fine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use mnemo_core::{Metadata, MnemoError, VectorCollection};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// File-backed knowledge collection with modification-time-gated reloads.
pub struct KnowledgeStore {
    path: PathBuf,
    collection: Arc<dyn VectorCollection>,
    chunk_size: usize,
    chunk_overlap: usize,
    /// Last-seen mtime. The whole check-and-rebuild runs while this lock is
    /// held, so concurrent callers never observe a half-rebuilt collection.
    last_modified: Mutex<Option<SystemTime>>,
}

impl KnowledgeStore {
    /// Creates a knowledge store over the given document and collection.
    pub fn new(
        path: impl Into<PathBuf>,
        collection: Arc<dyn VectorCollection>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            path: path.into(),
            collection,
            chunk_size,
            chunk_overlap,
            last_modified: Mutex::new(None),
        }
    }

    /// Reload the document if its modification time changed since the last
    /// load. A missing document is a no-op, not an error.
    pub async fn refresh_if_changed(&self) -> Result<(), MnemoError> {
        let mut last_modified = self.last_modified.lock().await;

        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(_) => {
                debug!(path = %self.path.display(), "knowledge document not found");
                return Ok(());
            }
        };
        let modified = metadata.modified().map_err(|e| MnemoError::Storage {
            source: Box::new(e),
        })?;

        if *last_modified == Some(modified) {
            return Ok(());
        }

        info!(path = %self.path.display(), "knowledge document changed, reloading");
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| MnemoError::Storage {
                source: Box::new(e),
            })?;

        let chunks = if text.trim().is_empty() {
            debug!("knowledge document is empty, no chunks added");
            Vec::new()
        } else {
            split_text(text.trim(), self.chunk_size, self.chunk_overlap)
        };

        // Destroy-then-rebuild: no chunk from a previous version survives.
        self.collection.clear().await?;
        if !chunks.is_empty() {
            let count = chunks.len();
            let metadatas = vec![Metadata::new(); count];
            self.collection.add(chunks, metadatas).await?;
            info!(chunks = count, "loaded knowledge chunks");
        }

        *last_modified = Some(modified);
        Ok(())
    }

    /// Plain nearest-neighbor retrieval, vector-store-native order.
    ///
    /// An empty or never-loaded store yields an empty sequence.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, MnemoError> {
        let hits = self.collection.search(query, k).await?;
        Ok(hits.into_iter().map(|hit| hit.text).collect())
    }
}

/// Split text into overlapping chunks of at most `chunk_size` characters,
/// each consecutive pair sharing `chunk_overlap` characters.
///
/// Operates on character counts, never slicing inside a UTF-8 code point.
pub fn split_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    assert!(
        chunk_overlap < chunk_size,
        "overlap must be smaller than chunk size"
    );

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = chunk_size - chunk_overlap;
    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_text("hello world", 500, 50);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn chunks_respect_size_and_overlap() {
        let text = "abcdefghij".repeat(10); // 100 chars
        let chunks = split_text(&text, 40, 10);
        assert!(chunks.iter().all(|c| c.chars().count() <= 40));
        // Consecutive chunks share the overlap region.
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().rev().take(10).collect::<Vec<_>>()
                .into_iter().rev().collect();
            assert!(pair[1].starts_with(&tail));
        }
        // Full coverage: concatenating steps reproduces the text length.
        assert_eq!(chunks.first().unwrap().chars().count(), 40);
    }

    #[test]
    fn multibyte_text_is_not_split_mid_character() {
        let text = "héllo wörld ünïcode".repeat(20);
        let chunks = split_text(&text, 30, 5);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 30);
        }
        assert_eq!(
            chunks.last().map(|c| c.chars().last()),
            Some(text.chars().last())
        );
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_text("", 500, 50).is_empty());
    }
}
