// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rich configuration diagnostics rendered via miette.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information for terminal rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration could not be read or deserialized.
    #[error("failed to load configuration: {message}")]
    #[diagnostic(
        code(mnemo::config::load),
        help("check the TOML syntax and key names in your mnemo.toml")
    )]
    Load {
        /// Description from the underlying loader.
        message: String,
    },

    /// A deserialized value violates a semantic constraint.
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(mnemo::config::validation))]
    Validation {
        /// Description of the violated constraint.
        message: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_message() {
        let err = ConfigError::Validation {
            message: "memory.maintenance_hour must be 0-23, got 25".to_string(),
        };
        assert!(err.to_string().contains("maintenance_hour"));
    }

    #[test]
    fn figment_error_converts_to_load() {
        let figment_err = figment::Error::from("boom".to_string());
        let err: ConfigError = figment_err.into();
        assert!(matches!(err, ConfigError::Load { .. }));
    }
}
