//! Fieldsmith Extractor
//!
//! Turns free-form requirement documents into field specifications using a
//! generation service.
//!
//! # Overview
//!
//! Large documents are reduced before they are sent: Unicode punctuation is
//! normalized, trailing non-field sections are cut off, and the remaining
//! text is scored line by line so only field-dense sections survive. The
//! reduced text is embedded in a fixed prompt, and the completion is parsed
//! strictly into [`FieldSpec`](fieldsmith_domain::FieldSpec) values.
//!
//! # Architecture
//!
//! ```text
//! Document → normalize → cutoff → extract → prompt → GenerationProvider
//!          → strict JSON parse → FieldSpec[]
//! ```
//!
//! The same JSON shape is used for import and export of field lists.
//!
//! # Example Usage
//!
//! ```no_run
//! use fieldsmith_extractor::{ExtractorConfig, FieldGenerator, GenerationRequest};
//! use fieldsmith_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"fields": []}"#);
//! let generator = FieldGenerator::new(provider, ExtractorConfig::default())?;
//!
//! let request = GenerationRequest::from_document("## 1. Patient_Name__c\nType: Text")
//!     .with_object_name("Patient__c");
//! let outcome = generator.generate(request).await?;
//!
//! println!("Generated {} fields for {}", outcome.fields.len(), outcome.object_name);
//! for warning in &outcome.warnings {
//!     println!("warning: {}", warning);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod cutoff;
mod document;
mod error;
mod generator;
mod import;
mod normalize;
mod parser;
mod prompt;
mod record;
mod reduce;
mod types;


pub use config::{ExtractorConfig, DEFAULT_OBJECT_NAME};
pub use cutoff::{count_field_headers, cutoff, GRACE_LINES};
pub use document::{document_text, read_document, DocumentFormat};
pub use error::{ErrorKind, ExtractorError};
pub use generator::FieldGenerator;
pub use import::{export_document, import_document, import_into, ImportDocument};
pub use normalize::normalize;
pub use parser::{extract_json_object, parse_generated_fields, parse_generation_response};
pub use prompt::{build_prompt, PromptBuilder};
pub use record::{FieldRecord, PicklistValueRecord};
pub use reduce::{
    extract_field_specs, reduce_document, ReducedDocument, ReductionStats, MIN_EXTRACT_CHARS,
    MIN_SECTION_SCORE, SHORT_CIRCUIT_CHARS,
};
pub use types::{
    GenerationInput, GenerationOutcome, GenerationRequest, GenerationStage, GenerationWarning,
};
