//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document intake, generation or import error
    #[error("{0}")]
    Extractor(#[from] fieldsmith_extractor::ExtractorError),

    /// Metadata export error
    #[error("Export error: {0}")]
    Metadata(#[from] fieldsmith_metadata::MetadataError),

    /// Generation service client error
    #[error("Generation service error: {0}")]
    Llm(#[from] fieldsmith_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
