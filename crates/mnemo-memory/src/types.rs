// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory domain types and vector helpers.

use mnemo_core::Metadata;
use serde_json::Value;

/// Metadata key for the ingestion-time context summary.
pub const KEY_CONTEXT: &str = "context";
/// Metadata key for the ISO-8601 creation timestamp.
pub const KEY_TIMESTAMP: &str = "timestamp";
/// Metadata key for the 8-character session identifier.
pub const KEY_SESSION_ID: &str = "session_id";
/// Metadata key for who produced the text.
pub const KEY_SOURCE: &str = "source";

/// Who produced a stored utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemorySource {
    /// The user, during conversation.
    Conversation,
    /// The assistant's own reply.
    Assistant,
}

impl MemorySource {
    /// Convert to the string form stored in record metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemorySource::Conversation => "conversation",
            MemorySource::Assistant => "assistant",
        }
    }

    /// Parse from the stored string form.
    pub fn from_str_value(s: &str) -> Self {
        match s {
            "assistant" => MemorySource::Assistant,
            _ => MemorySource::Conversation,
        }
    }
}

/// Read a string-valued metadata field, treating missing and non-string
/// values identically.
pub fn meta_str<'a>(meta: &'a Metadata, key: &str) -> Option<&'a str> {
    meta.get(key).and_then(Value::as_str)
}

/// Convert f32 vector to bytes for SQLite BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert SQLite BLOB back to f32 vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().expect("chunks_exact yields 4 bytes")))
        .collect()
}

/// Compute cosine similarity between two vectors of equal length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_round_trips() {
        assert_eq!(MemorySource::Conversation.as_str(), "conversation");
        assert_eq!(MemorySource::Assistant.as_str(), "assistant");
        assert_eq!(
            MemorySource::from_str_value("assistant"),
            MemorySource::Assistant
        );
        // Unknown strings fall back to conversation.
        assert_eq!(
            MemorySource::from_str_value("system"),
            MemorySource::Conversation
        );
    }

    #[test]
    fn meta_str_ignores_non_string_values() {
        let mut meta = Metadata::new();
        meta.insert(KEY_SESSION_ID.into(), serde_json::json!("abcd1234"));
        meta.insert(KEY_TIMESTAMP.into(), serde_json::json!(42));
        assert_eq!(meta_str(&meta, KEY_SESSION_ID), Some("abcd1234"));
        assert_eq!(meta_str(&meta, KEY_TIMESTAMP), None);
        assert_eq!(meta_str(&meta, KEY_CONTEXT), None);
    }

    #[test]
    fn blob_roundtrip() {
        let original = vec![0.1_f32, 0.2, 0.3, -0.5, 1.0];
        let blob = vec_to_blob(&original);
        assert_eq!(blob.len(), original.len() * 4);
        let recovered = blob_to_vec(&blob);
        for (a, b) in original.iter().zip(recovered.iter()) {
            assert!((a - b).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn cosine_similarity_bounds() {
        let a = vec![1.0, 0.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&a, &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        // Zero vectors produce no signal rather than NaN.
        assert_eq!(cosine_similarity(&a, &[0.0, 0.0]), 0.0);
    }
}
