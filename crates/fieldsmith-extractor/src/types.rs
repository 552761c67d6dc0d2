//! Request and response types for generation

use crate::error::ErrorKind;
use crate::reduce::ReductionStats;
use fieldsmith_domain::{FieldIssue, FieldSpec};
use std::fmt;

/// Text handed to the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationInput {
    /// Full document text; normalized, cut off and extracted first
    Document(String),
    /// Text that was already reduced; only normalized
    Reduced(String),
}

/// Request to generate fields from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Source text
    pub input: GenerationInput,

    /// Object name to use when the response names none
    pub object_name: Option<String>,
}

impl GenerationRequest {
    /// Request for a full document
    pub fn from_document(text: impl Into<String>) -> Self {
        Self {
            input: GenerationInput::Document(text.into()),
            object_name: None,
        }
    }

    /// Request for pre-reduced text
    pub fn from_reduced(text: impl Into<String>) -> Self {
        Self {
            input: GenerationInput::Reduced(text.into()),
            object_name: None,
        }
    }

    /// Set the fallback object name
    pub fn with_object_name(mut self, object_name: impl Into<String>) -> Self {
        self.object_name = Some(object_name.into());
        self
    }
}

/// Progress of one generation invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    /// Nothing running
    Idle,
    /// Normalizing characters
    Normalizing,
    /// Cutoff and extraction
    Extracting,
    /// Waiting for the generation service
    AwaitingResponse,
    /// Parsing the response
    Parsing,
    /// Finished successfully
    Done,
    /// Finished with an error of this kind
    Failed(ErrorKind),
}

impl GenerationStage {
    /// Whether the invocation has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStage::Done | GenerationStage::Failed(_))
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStage::Idle => write!(f, "idle"),
            GenerationStage::Normalizing => write!(f, "normalizing"),
            GenerationStage::Extracting => write!(f, "extracting"),
            GenerationStage::AwaitingResponse => write!(f, "awaiting response"),
            GenerationStage::Parsing => write!(f, "parsing"),
            GenerationStage::Done => write!(f, "done"),
            GenerationStage::Failed(kind) => write!(f, "failed ({:?})", kind),
        }
    }
}

/// Advisory finding about a generation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// Fewer fields came back than numbered field headers were found
    PossibleTruncation {
        /// Field headers counted in the input
        expected: usize,
        /// Fields in the response
        received: usize,
    },

    /// A generated field failed range checks
    FieldIssues {
        /// Field the issues belong to
        api_name: String,
        /// Issues found
        issues: Vec<FieldIssue>,
    },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::PossibleTruncation { expected, received } => write!(
                f,
                "document has {} numbered field headers but only {} fields were generated",
                expected, received
            ),
            GenerationWarning::FieldIssues { api_name, issues } => {
                let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
                write!(f, "{}: {}", api_name, issues.join("; "))
            }
        }
    }
}

/// Result of a successful generation
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Resolved object name
    pub object_name: String,

    /// Generated fields in response order
    pub fields: Vec<FieldSpec>,

    /// Advisory warnings
    pub warnings: Vec<GenerationWarning>,

    /// How much of the input was sent
    pub reduction: ReductionStats,
}
