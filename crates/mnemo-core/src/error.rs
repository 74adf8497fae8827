// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the mnemo memory subsystem.

use thiserror::Error;

/// The primary error type used across all mnemo adapter traits and core operations.
///
/// Recovery policy: sub-failures are absorbed as close to their source as
/// possible (ingestion degrades to a missing context summary, retrieval
/// degrades to an empty context list, eviction skips malformed records).
/// Only a total failure of an operation surfaces as one of these variants.
#[derive(Debug, Error)]
pub enum MnemoError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Vector store / database errors (connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (API failure, token limits, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding adapter errors (model failure, dimension mismatch).
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A component failed to initialize and every subsequent call is refused.
    #[error("component not ready: {component}")]
    NotReady { component: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_construct_and_display() {
        let errors = [
            MnemoError::Config("bad key".into()),
            MnemoError::Storage {
                source: Box::new(std::io::Error::other("disk")),
            },
            MnemoError::Provider {
                message: "model unavailable".into(),
                source: None,
            },
            MnemoError::Embedding {
                message: "dimension mismatch".into(),
                source: None,
            },
            MnemoError::NotReady {
                component: "vector store".into(),
            },
            MnemoError::Timeout {
                duration: std::time::Duration::from_secs(30),
            },
            MnemoError::Internal("unexpected".into()),
        ];
        for e in errors {
            assert!(!e.to_string().is_empty());
        }
    }

    #[test]
    fn storage_error_preserves_source() {
        let err = MnemoError::Storage {
            source: Box::new(std::io::Error::other("locked")),
        };
        assert!(err.to_string().contains("locked"));
    }
}
