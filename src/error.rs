//! Error types for registration and configuration

use thiserror::Error;

/// Errors raised while registering functions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A name or alias is already taken (compared case-insensitively)
    #[error("duplicate function name '{name}' (already used by '{existing}')")]
    DuplicateName { name: String, existing: String },

    /// A name or alias cannot be referenced from a template
    #[error("invalid function name '{name}': names must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidName { name: String },
}

impl RegistryError {
    /// Create a duplicate name error
    pub fn duplicate(name: impl Into<String>, existing: impl Into<String>) -> Self {
        Self::DuplicateName {
            name: name.into(),
            existing: existing.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }
}

/// Errors that can occur when loading TOML configuration or snapshots
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
