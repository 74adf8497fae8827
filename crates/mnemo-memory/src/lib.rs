// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term conversational memory for the mnemo subsystem.
//!
//! Ingests conversation turns behind a triviality filter, tags them with
//! context summaries and idle-gap session ids, re-ranks retrieved
//! candidates by session affinity, recency, and context overlap, and
//! evicts records past the retention window. A simpler file-backed
//! knowledge store holds user-profile chunks with full rebuild on change.
//!
//! ## Architecture
//!
//! - **SessionTracker**: idle-gap session identity, one atomic transition per call
//! - **admission**: denylist filter gating what is persisted
//! - **summary**: LLM context digests for storage tagging and query expansion
//! - **MemoryStore**: ingest / re-ranked retrieve / retention eviction
//! - **KnowledgeStore**: mtime-gated destroy-and-rebuild profile collection
//! - **SqliteVectorCollection**: BLOB embeddings + brute-force cosine search

pub mod admission;
pub mod knowledge;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;
pub mod vector;

pub use admission::is_worth_storing;
pub use knowledge::{KnowledgeStore, split_text};
pub use session::SessionTracker;
pub use store::{IngestOutcome, MemoryStore, format_timestamp};
pub use summary::generate_context_summary;
pub use types::MemorySource;
pub use vector::SqliteVectorCollection;
