// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn-level orchestration of memory, knowledge, and the reply model.

use std::sync::Arc;

use chrono::{Local, Timelike};
use tracing::{debug, error, info, warn};

use mnemo_config::MnemoConfig;
use mnemo_core::traits::ProviderAdapter;
use mnemo_core::types::{CompletionRequest, Metadata};
use mnemo_core::MnemoError;
use mnemo_memory::{KnowledgeStore, MemorySource, MemoryStore};

use crate::prompt::build_grounding_prompt;

/// Drives a single conversation turn end to end.
///
/// A turn reloads stale knowledge, runs opportunistic eviction, stores the
/// user utterance, retrieves context from both stores, asks the provider for
/// a reply, and stores that reply. Any failure inside the turn is logged and
/// collapsed into the configured fallback reply; the handler never panics or
/// surfaces an error to the caller.
pub struct ConversationHandler {
    memory: Arc<MemoryStore>,
    knowledge: Arc<KnowledgeStore>,
    provider: Arc<dyn ProviderAdapter>,
    config: MnemoConfig,
}

impl ConversationHandler {
    pub fn new(
        memory: Arc<MemoryStore>,
        knowledge: Arc<KnowledgeStore>,
        provider: Arc<dyn ProviderAdapter>,
        config: MnemoConfig,
    ) -> Self {
        Self {
            memory,
            knowledge,
            provider,
            config,
        }
    }

    /// Handle one user turn. Always returns a reply string; on any internal
    /// failure this is the configured `error_reply`.
    pub async fn handle(&self, user_input: &str) -> String {
        match self.handle_turn(user_input).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(error = %err, "conversation turn failed");
                self.config.agent.error_reply.clone()
            }
        }
    }

    async fn handle_turn(&self, user_input: &str) -> Result<String, MnemoError> {
        if let Err(err) = self.knowledge.refresh_if_changed().await {
            warn!(error = %err, "knowledge reload failed, serving stale chunks");
        }

        self.maybe_evict().await;

        if self.config.memory.enabled {
            self.memory
                .ingest(user_input, MemorySource::Conversation, Metadata::new())
                .await?;
        }

        let memory_context = if self.config.memory.enabled {
            match self.memory.retrieve_default(user_input).await {
                Ok(context) => context,
                Err(err) => {
                    warn!(error = %err, "memory retrieval failed, replying without it");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let knowledge_context = match self
            .knowledge
            .retrieve(user_input, self.config.knowledge.retrieval_k)
            .await
        {
            Ok(context) => context,
            Err(err) => {
                warn!(error = %err, "knowledge retrieval failed, replying without it");
                Vec::new()
            }
        };

        let prompt = build_grounding_prompt(
            &self.config.agent.name,
            user_input,
            &memory_context,
            &knowledge_context,
        );
        debug!(
            memory_hits = memory_context.len(),
            knowledge_hits = knowledge_context.len(),
            "assembled grounding prompt"
        );

        let response = self
            .provider
            .complete(CompletionRequest {
                model: self.config.agent.model.clone(),
                prompt,
                max_tokens: self.config.agent.max_tokens,
            })
            .await?;
        let reply = response.content.trim().to_string();

        if self.config.memory.enabled {
            self.memory
                .ingest(&reply, MemorySource::Assistant, Metadata::new())
                .await?;
        }

        Ok(reply)
    }

    /// Evict stale memories when the local hour matches the configured
    /// maintenance hour. Only runs once a session has actually started, so
    /// an idle process never churns the store on its own.
    async fn maybe_evict(&self) {
        if !self.config.memory.enabled {
            return;
        }
        if !self.memory.session_started() {
            return;
        }
        if Local::now().hour() != self.config.memory.maintenance_hour {
            return;
        }
        match self.memory.evict_stale().await {
            Ok(0) => {}
            Ok(removed) => info!(removed, "evicted stale memories"),
            Err(err) => warn!(error = %err, "eviction failed, continuing"),
        }
    }
}
