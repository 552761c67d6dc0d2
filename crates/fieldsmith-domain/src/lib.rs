//! Fieldsmith Domain Layer
//!
//! This crate contains the field metadata model for Fieldsmith. It has no
//! external runtime dependencies and defines the fundamental concepts and
//! trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **FieldSpec**: one custom field, tagged by type
//! - **FieldKind**: the type-specific attribute set, one variant per type
//! - **FieldList**: the transient working set of fields for an object
//! - **Checks**: advisory range rules the editor enforces
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and editing rules only
//! - Serialization (XML, JSON) and generation live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod check;
pub mod field;
pub mod field_type;
pub mod formula;
pub mod numeric;
pub mod picklist;
pub mod relationship;
pub mod traits;

// Re-exports for convenience
pub use catalog::FieldList;
pub use check::{check_field, FieldIssue};
pub use field::{FieldKind, FieldSpec};
pub use field_type::FieldType;
pub use formula::{FormulaAttrs, FormulaReturnType, TreatBlanksAs};
pub use numeric::{NumericAttrs, TextAreaAttrs, DEFAULT_PRECISION, DEFAULT_SCALE};
pub use picklist::{PicklistAttrs, PicklistValue};
pub use relationship::{DeleteConstraint, LookupAttrs, MasterDetailAttrs, RelationshipTarget};
