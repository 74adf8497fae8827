// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the mnemo subsystem.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// String-keyed JSON metadata attached to a stored record.
///
/// The memory store reserves the keys `context`, `timestamp`, `session_id`
/// and `source`; any other keys supplied by callers are preserved as-is.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Embedding,
    Provider,
    VectorStore,
}

/// Input for an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    /// Texts to embed, one vector produced per text.
    pub texts: Vec<String>,
}

/// Output from an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    /// One embedding per input text, in input order.
    pub embeddings: Vec<Vec<f32>>,
    /// Dimensionality of every returned vector.
    pub dimensions: usize,
}

/// A plain-text completion request to an LLM provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier understood by the provider.
    pub model: String,
    /// The full prompt, instructions embedded inline.
    pub prompt: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// A completion response from an LLM provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, untrimmed.
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    /// Token usage for the call, if the provider reports it.
    pub usage: Option<TokenUsage>,
}

/// Token usage reported by a provider.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A single nearest-neighbor search result from a vector collection.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The verbatim stored text.
    pub text: String,
    /// Metadata stored alongside the text.
    pub metadata: Metadata,
    /// Distance from the query embedding (lower is closer).
    pub distance: f32,
}

/// An (id, metadata) pair from a full-collection scan.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// Opaque identifier assigned by the collection at insertion.
    pub id: String,
    /// Metadata stored alongside the record.
    pub metadata: Metadata,
}
