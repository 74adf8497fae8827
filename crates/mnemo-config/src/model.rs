// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration data model with serde defaults.

use serde::{Deserialize, Serialize};

/// Root configuration for the mnemo subsystem.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MnemoConfig {
    /// Agent identity and reply-model settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Long-term conversational memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Static knowledge (user profile document) settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent, used in prompts.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Model identifier for conversational replies.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per reply completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fixed user-facing reply when a conversation turn fails internally.
    #[serde(default = "default_error_reply")]
    pub error_reply: String,
}

/// Long-term conversational memory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Enable the memory system. When false, no memory operations occur.
    #[serde(default = "default_memory_enabled")]
    pub enabled: bool,

    /// Path to the SQLite database backing the vector collections.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Model identifier used for context summaries.
    #[serde(default = "default_model")]
    pub summary_model: String,

    /// Number of ranked memories returned per retrieval.
    #[serde(default = "default_retrieval_k")]
    pub retrieval_k: usize,

    /// Relevance threshold carried on the retrieval API. Reserved: ranking
    /// currently truncates to `retrieval_k` without applying a cutoff.
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,

    /// Candidate multiplier for re-ranking: `oversample_factor * retrieval_k`
    /// nearest neighbors are fetched before scoring.
    #[serde(default = "default_oversample_factor")]
    pub oversample_factor: usize,

    /// Seconds of idle time after which a new session begins.
    #[serde(default = "default_session_gap_secs")]
    pub session_gap_secs: u64,

    /// Memories older than this many days qualify for eviction.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,

    /// Local hour of day (0-23) during which opportunistic eviction runs.
    #[serde(default = "default_maintenance_hour")]
    pub maintenance_hour: u32,
}

/// Static knowledge store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Path to the UTF-8 user profile document.
    #[serde(default = "default_knowledge_path")]
    pub path: String,

    /// Maximum chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of chunks returned per retrieval.
    #[serde(default = "default_knowledge_k")]
    pub retrieval_k: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            log_level: default_log_level(),
            error_reply: default_error_reply(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_memory_enabled(),
            database_path: default_database_path(),
            summary_model: default_model(),
            retrieval_k: default_retrieval_k(),
            score_threshold: default_score_threshold(),
            oversample_factor: default_oversample_factor(),
            session_gap_secs: default_session_gap_secs(),
            retention_days: default_retention_days(),
            maintenance_hour: default_maintenance_hour(),
        }
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            retrieval_k: default_knowledge_k(),
        }
    }
}

fn default_agent_name() -> String {
    "mnemo".to_string()
}

fn default_model() -> String {
    "gemma3:4b".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_error_reply() -> String {
    "I encountered an error processing your request. Please try rephrasing or try again later."
        .to_string()
}

fn default_memory_enabled() -> bool {
    true
}

fn default_database_path() -> String {
    "mnemo.db".to_string()
}

fn default_retrieval_k() -> usize {
    5
}

fn default_score_threshold() -> f64 {
    0.75
}

fn default_oversample_factor() -> usize {
    2
}

fn default_session_gap_secs() -> u64 {
    3600
}

fn default_retention_days() -> i64 {
    45
}

fn default_maintenance_hour() -> u32 {
    3
}

fn default_knowledge_path() -> String {
    "ABOUT.md".to_string()
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_knowledge_k() -> usize {
    3
}
