// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as value ranges and cross-field relationships.

use crate::diagnostic::ConfigError;
use crate::model::MnemoConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MnemoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.memory.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "memory.database_path must not be empty".to_string(),
        });
    }

    if config.memory.retrieval_k == 0 {
        errors.push(ConfigError::Validation {
            message: "memory.retrieval_k must be at least 1".to_string(),
        });
    }

    if config.memory.oversample_factor == 0 {
        errors.push(ConfigError::Validation {
            message: "memory.oversample_factor must be at least 1".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&config.memory.score_threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.score_threshold must be within 0.0-1.0, got {}",
                config.memory.score_threshold
            ),
        });
    }

    if config.memory.session_gap_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "memory.session_gap_secs must be positive".to_string(),
        });
    }

    if config.memory.retention_days <= 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.retention_days must be positive, got {}",
                config.memory.retention_days
            ),
        });
    }

    if config.memory.maintenance_hour > 23 {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.maintenance_hour must be 0-23, got {}",
                config.memory.maintenance_hour
            ),
        });
    }

    if config.knowledge.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "knowledge.path must not be empty".to_string(),
        });
    }

    if config.knowledge.chunk_size == 0 {
        errors.push(ConfigError::Validation {
            message: "knowledge.chunk_size must be at least 1".to_string(),
        });
    }

    if config.knowledge.chunk_overlap >= config.knowledge.chunk_size {
        errors.push(ConfigError::Validation {
            message: format!(
                "knowledge.chunk_overlap ({}) must be smaller than knowledge.chunk_size ({})",
                config.knowledge.chunk_overlap, config.knowledge.chunk_size
            ),
        });
    }

    if config.knowledge.retrieval_k == 0 {
        errors.push(ConfigError::Validation {
            message: "knowledge.retrieval_k must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
