// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for text-completion services.

use async_trait::async_trait;

use crate::error::MnemoError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for an opaque text-completion service.
///
/// The same provider serves both roles the memory subsystem needs: the
/// context summarizer used at ingestion and query time, and the reply model
/// invoked by the conversation handler. Prompts are plain text with
/// embedded instructions; any structured-output parsing (stripping markdown
/// fences and the like) is the caller's responsibility.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, MnemoError>;
}
