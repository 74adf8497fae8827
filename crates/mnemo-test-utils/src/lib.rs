// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for mnemo integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock completion provider with pre-configured responses
//! - [`MockEmbedder`] - Deterministic hash-based embedding adapter

pub mod mock_embedder;
pub mod mock_provider;

pub use mock_embedder::{MOCK_EMBEDDING_DIM, MockEmbedder};
pub use mock_provider::MockProvider;

/// Initialize an env-filtered tracing subscriber for a test binary.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
