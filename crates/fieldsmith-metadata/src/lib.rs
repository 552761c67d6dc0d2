//! Fieldsmith Metadata
//!
//! Deterministic serializer from a [`FieldSpec`](fieldsmith_domain::FieldSpec)
//! to the custom field metadata XML document.
//!
//! # Architecture
//!
//! ```text
//! FieldSpec → compile_field → XML document → FieldArtifact → {apiName}.field-meta.xml
//! ```
//!
//! Compilation is a pure function: no shared state, so any number of fields
//! may be compiled independently and in any order.

#![warn(missing_docs)]

mod artifact;
mod compile;
mod error;
mod writer;

pub use artifact::{export_artifacts, write_artifacts, FieldArtifact, FIELD_META_SUFFIX};
pub use compile::compile_field;
pub use error::MetadataError;
pub use writer::{METADATA_NAMESPACE, XML_DECLARATION};
