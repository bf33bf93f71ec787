//! Configuration error types

use thiserror::Error;

use super::ai::AiSetting;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing AI settings: {}", describe_missing(.0))]
    MissingAiSettings(Vec<AiSetting>),

    #[error("AI endpoint must be an http(s) URL: {0}")]
    InvalidEndpoint(String),

    #[error("Storage directory must not be empty")]
    EmptyStorageDir,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

fn describe_missing(settings: &[AiSetting]) -> String {
    settings
        .iter()
        .map(|s| s.env_var())
        .collect::<Vec<_>>()
        .join(", ")
}
