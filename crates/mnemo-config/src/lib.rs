// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the mnemo memory subsystem.
//!
//! Layered loading (defaults, system, XDG, local, environment) via Figment,
//! serde models with per-field defaults, and post-deserialization
//! validation with miette diagnostics.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::ConfigError;
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AgentConfig, KnowledgeConfig, MemoryConfig, MnemoConfig};
pub use validation::validate_config;
