// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the mnemo memory subsystem.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the mnemo workspace. External collaborators
//! (embedding providers, completion providers, vector stores) implement the
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MnemoError;
pub use traits::{EmbeddingAdapter, PluginAdapter, ProviderAdapter, VectorCollection};
pub use types::{
    AdapterType, CompletionRequest, CompletionResponse, EmbeddingInput, EmbeddingOutput,
    HealthStatus, Metadata, SearchHit, StoredEntry, TokenUsage,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_trait_modules_are_exported() {
        // Verifies that the adapter traits compile and are accessible
        // through the public API.
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_embedding_adapter<T: EmbeddingAdapter>() {}
        fn _assert_provider_adapter<T: ProviderAdapter>() {}
        fn _assert_vector_collection<T: VectorCollection>() {}
    }

    #[test]
    fn traits_are_object_safe() {
        fn _embedding(_: &dyn EmbeddingAdapter) {}
        fn _provider(_: &dyn ProviderAdapter) {}
        fn _vector(_: &dyn VectorCollection) {}
    }
}
