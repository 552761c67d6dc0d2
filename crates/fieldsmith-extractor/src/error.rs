//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur between document intake and parsed fields
///
/// Every failure is scoped to one invocation; none is retried automatically.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Document type or size outside accepted bounds
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// A supported document yielded no usable text
    #[error("Text extraction failed: {0}")]
    ExtractionFailure(String),

    /// The generation service call did not succeed
    #[error("Generation service failed: {0}")]
    ServiceFailure(String),

    /// No JSON object could be located in the response
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The located JSON object did not parse
    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),

    /// The JSON parsed but does not carry a usable `fields` sequence
    #[error("Invalid response structure: {0}")]
    InvalidStructure(String),

    /// An import document was rejected as a whole
    #[error("Import rejected: {0}")]
    ImportValidation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure category of an [`ExtractorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ExtractorError::UnsupportedInput`]
    UnsupportedInput,
    /// See [`ExtractorError::ExtractionFailure`]
    ExtractionFailure,
    /// See [`ExtractorError::ServiceFailure`]
    ServiceFailure,
    /// See [`ExtractorError::MalformedResponse`]
    MalformedResponse,
    /// See [`ExtractorError::InvalidJson`]
    InvalidJson,
    /// See [`ExtractorError::InvalidStructure`]
    InvalidStructure,
    /// See [`ExtractorError::ImportValidation`]
    ImportValidation,
    /// See [`ExtractorError::Config`]
    Config,
}

impl ExtractorError {
    /// Stable category for branching on failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractorError::UnsupportedInput(_) => ErrorKind::UnsupportedInput,
            ExtractorError::ExtractionFailure(_) => ErrorKind::ExtractionFailure,
            ExtractorError::ServiceFailure(_) => ErrorKind::ServiceFailure,
            ExtractorError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            ExtractorError::InvalidJson(_) => ErrorKind::InvalidJson,
            ExtractorError::InvalidStructure(_) => ErrorKind::InvalidStructure,
            ExtractorError::ImportValidation(_) => ErrorKind::ImportValidation,
            ExtractorError::Config(_) => ErrorKind::Config,
        }
    }

    /// Whether the failure happened while post-processing a response
    pub fn is_response_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedResponse | ErrorKind::InvalidJson | ErrorKind::InvalidStructure
        )
    }
}
