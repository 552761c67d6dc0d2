//! Advisory range and consistency checks
//!
//! Issues reported here never block compilation; they are surfaced to the
//! user next to the field so it can be fixed before deployment.

use crate::field::{FieldKind, FieldSpec};
use crate::field_type::FieldType;
use std::fmt;

/// Maximum precision for numeric fields
pub const MAX_PRECISION: u32 = 18;

/// Maximum scale for numeric fields
pub const MAX_SCALE: u32 = 17;

/// A problem found on a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// API name is empty
    MissingApiName,

    /// Label is empty
    MissingLabel,

    /// API name lacks the custom field suffix
    MissingSuffix(String),

    /// Length outside the type's range
    LengthOutOfRange {
        /// Configured length
        length: u32,
        /// Largest allowed length
        max: u32,
    },

    /// Precision outside 1-18
    PrecisionOutOfRange(u32),

    /// Scale outside 0-17
    ScaleOutOfRange(u32),

    /// Scale larger than precision
    ScaleExceedsPrecision {
        /// Effective precision
        precision: u32,
        /// Effective scale
        scale: u32,
    },

    /// Picklist without values
    EmptyPicklist,

    /// Single-select picklist with more than one default
    MultipleDefaults(usize),

    /// Relationship without a referenced object
    MissingReferenceTo,

    /// Required Lookup whose delete constraint is SetNull
    RequiredSetNull,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::MissingApiName => write!(f, "API name is empty"),
            FieldIssue::MissingLabel => write!(f, "label is empty"),
            FieldIssue::MissingSuffix(name) => {
                write!(f, "API name '{}' does not end with __c", name)
            }
            FieldIssue::LengthOutOfRange { length, max } => {
                write!(f, "length {} out of range [1, {}]", length, max)
            }
            FieldIssue::PrecisionOutOfRange(p) => {
                write!(f, "precision {} out of range [1, {}]", p, MAX_PRECISION)
            }
            FieldIssue::ScaleOutOfRange(s) => {
                write!(f, "scale {} out of range [0, {}]", s, MAX_SCALE)
            }
            FieldIssue::ScaleExceedsPrecision { precision, scale } => {
                write!(f, "scale {} exceeds precision {}", scale, precision)
            }
            FieldIssue::EmptyPicklist => write!(f, "picklist has no values"),
            FieldIssue::MultipleDefaults(n) => {
                write!(f, "single-select picklist has {} default values", n)
            }
            FieldIssue::MissingReferenceTo => write!(f, "relationship has no referenceTo"),
            FieldIssue::RequiredSetNull => {
                write!(f, "required lookup cannot use deleteConstraint SetNull")
            }
        }
    }
}

/// Check a field against the editor's range and consistency rules
pub fn check_field(field: &FieldSpec) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if field.api_name.is_empty() {
        issues.push(FieldIssue::MissingApiName);
    } else if !field.api_name.ends_with("__c") {
        issues.push(FieldIssue::MissingSuffix(field.api_name.clone()));
    }
    if field.label.is_empty() {
        issues.push(FieldIssue::MissingLabel);
    }

    let field_type = field.field_type();
    if let (Some(length), Some(max)) = (field.kind.length(), field_type.max_length()) {
        if length == 0 || length > max {
            issues.push(FieldIssue::LengthOutOfRange { length, max });
        }
    }

    if let Some(numeric) = numeric_in_use(&field.kind) {
        let precision = numeric.precision();
        let scale = numeric.scale();
        if precision == 0 || precision > MAX_PRECISION {
            issues.push(FieldIssue::PrecisionOutOfRange(precision));
        }
        if scale > MAX_SCALE {
            issues.push(FieldIssue::ScaleOutOfRange(scale));
        }
        if scale > precision {
            issues.push(FieldIssue::ScaleExceedsPrecision { precision, scale });
        }
    }

    if let Some(picklist) = field.kind.picklist() {
        if picklist.values.is_empty() {
            issues.push(FieldIssue::EmptyPicklist);
        }
        let defaults = picklist.default_count();
        if field_type == FieldType::Picklist && defaults > 1 {
            issues.push(FieldIssue::MultipleDefaults(defaults));
        }
    }

    if let Some(target) = field.kind.relationship_target() {
        if target.reference_to.as_deref().map_or(true, str::is_empty) {
            issues.push(FieldIssue::MissingReferenceTo);
        }
    }

    if field.has_lookup_conflict() {
        issues.push(FieldIssue::RequiredSetNull);
    }

    issues
}

/// Precision/scale that actually reach the output
fn numeric_in_use(kind: &FieldKind) -> Option<crate::numeric::NumericAttrs> {
    match kind {
        FieldKind::Formula(attrs) if !attrs.return_type().is_numeric() => None,
        other => other.numeric(),
    }
}
