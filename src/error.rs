//! Library error types.

use thiserror::Error;

use crate::config::Key;

/// Errors produced by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No preset with the given name exists.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// One or more presets failed validation.
    #[error("{} preset(s) failed validation: {}", .0.len(), preset_failures(.0))]
    PresetCheck(Vec<(String, ConfigError)>),

    /// The filtered dictionary is too small to build passwords from.
    #[error(
        "found {found} usable word(s) between {min} and {max} characters, need at least {required}"
    )]
    InsufficientWords {
        found: usize,
        required: usize,
        min: usize,
        max: usize,
    },

    /// The random number source misbehaved.
    #[error(transparent)]
    Rng(#[from] RngError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn preset_failures(failures: &[(String, ConfigError)]) -> String {
    failures
        .iter()
        .map(|(name, e)| format!("{name}: {e}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A rule of the configuration model was violated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key has no value.
    #[error("required config key '{0}' is missing")]
    MissingKey(Key),

    /// A key's value breaks its own constraint.
    #[error("invalid value for config key '{key}': {reason}")]
    InvalidValue { key: Key, reason: String },

    /// Two or more keys are individually valid but inconsistent together.
    #[error("{reason}")]
    Dependency { keys: Vec<Key>, reason: String },

    /// The key name is not part of the configuration model.
    #[error("unknown config key '{0}'")]
    UnknownKey(String),
}

impl ConfigError {
    /// Keys involved in the violation.
    pub fn keys(&self) -> Vec<Key> {
        match self {
            ConfigError::MissingKey(key) | ConfigError::InvalidValue { key, .. } => vec![*key],
            ConfigError::Dependency { keys, .. } => keys.clone(),
            ConfigError::UnknownKey(_) => Vec::new(),
        }
    }

    pub(crate) fn invalid(key: Key, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key,
            reason: reason.into(),
        }
    }

    pub(crate) fn dependency(keys: &[Key], reason: impl Into<String>) -> Self {
        ConfigError::Dependency {
            keys: keys.to_vec(),
            reason: reason.into(),
        }
    }
}

/// Failures of an injected random number source.
#[derive(Debug, Error)]
pub enum RngError {
    #[error("random source '{source_name}' returned no numbers")]
    NoNumbers { source_name: String },

    #[error("random source '{source_name}' returned {value}, expected a number in [0, 1]")]
    OutOfRange { source_name: String, value: f64 },

    #[error("random source '{source_name}' failed: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },
}
