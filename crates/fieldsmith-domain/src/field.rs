//! Field module - the canonical field specification

use crate::field_type::FieldType;
use crate::formula::FormulaAttrs;
use crate::numeric::{NumericAttrs, TextAreaAttrs};
use crate::picklist::PicklistAttrs;
use crate::relationship::{
    DeleteConstraint, LookupAttrs, MasterDetailAttrs, RelationshipTarget,
};

/// Type-specific attributes of a field
///
/// Each variant carries only the attributes meaningful for that type, so an
/// attribute set for one type can never leak into another type's output.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text
    Text {
        /// Maximum characters
        length: Option<u32>,
    },
    /// Multi-line plain text
    TextArea(TextAreaAttrs),
    /// Long multi-line text
    LongTextArea(TextAreaAttrs),
    /// Rich text
    RichTextArea(TextAreaAttrs),
    /// Number
    Number(NumericAttrs),
    /// Currency
    Currency(NumericAttrs),
    /// Percent
    Percent(NumericAttrs),
    /// Checkbox
    Checkbox {
        /// Initial checked state
        default_value: bool,
    },
    /// Date
    Date,
    /// Date and time
    DateTime,
    /// Email address
    Email {
        /// Maximum characters
        length: Option<u32>,
    },
    /// Phone number
    Phone {
        /// Maximum characters
        length: Option<u32>,
    },
    /// URL
    Url {
        /// Maximum characters
        length: Option<u32>,
    },
    /// Single-select picklist
    Picklist(PicklistAttrs),
    /// Multi-select picklist
    MultiselectPicklist {
        /// Value set
        picklist: PicklistAttrs,
        /// Rows shown in the editor
        visible_lines: Option<u32>,
    },
    /// Lookup relationship
    Lookup(LookupAttrs),
    /// Master-Detail relationship
    MasterDetail(MasterDetailAttrs),
    /// Formula
    Formula(FormulaAttrs),
}

impl FieldKind {
    /// Default attribute set for a type
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text { length: None },
            FieldType::TextArea => FieldKind::TextArea(TextAreaAttrs::default()),
            FieldType::LongTextArea => FieldKind::LongTextArea(TextAreaAttrs::default()),
            FieldType::RichTextArea => FieldKind::RichTextArea(TextAreaAttrs::default()),
            FieldType::Number => FieldKind::Number(NumericAttrs::default()),
            FieldType::Currency => FieldKind::Currency(NumericAttrs::default()),
            FieldType::Percent => FieldKind::Percent(NumericAttrs::default()),
            FieldType::Checkbox => FieldKind::Checkbox { default_value: false },
            FieldType::Date => FieldKind::Date,
            FieldType::DateTime => FieldKind::DateTime,
            FieldType::Email => FieldKind::Email { length: None },
            FieldType::Phone => FieldKind::Phone { length: None },
            FieldType::Url => FieldKind::Url { length: None },
            FieldType::Picklist => FieldKind::Picklist(PicklistAttrs::default()),
            FieldType::MultiselectPicklist => FieldKind::MultiselectPicklist {
                picklist: PicklistAttrs::default(),
                visible_lines: None,
            },
            FieldType::Lookup => FieldKind::Lookup(LookupAttrs::default()),
            FieldType::MasterDetail => FieldKind::MasterDetail(MasterDetailAttrs::default()),
            FieldType::Formula => FieldKind::Formula(FormulaAttrs::default()),
        }
    }

    /// The type discriminant
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::TextArea(_) => FieldType::TextArea,
            FieldKind::LongTextArea(_) => FieldType::LongTextArea,
            FieldKind::RichTextArea(_) => FieldType::RichTextArea,
            FieldKind::Number(_) => FieldType::Number,
            FieldKind::Currency(_) => FieldType::Currency,
            FieldKind::Percent(_) => FieldType::Percent,
            FieldKind::Checkbox { .. } => FieldType::Checkbox,
            FieldKind::Date => FieldType::Date,
            FieldKind::DateTime => FieldType::DateTime,
            FieldKind::Email { .. } => FieldType::Email,
            FieldKind::Phone { .. } => FieldType::Phone,
            FieldKind::Url { .. } => FieldType::Url,
            FieldKind::Picklist(_) => FieldType::Picklist,
            FieldKind::MultiselectPicklist { .. } => FieldType::MultiselectPicklist,
            FieldKind::Lookup(_) => FieldType::Lookup,
            FieldKind::MasterDetail(_) => FieldType::MasterDetail,
            FieldKind::Formula(_) => FieldType::Formula,
        }
    }

    /// Configured length, for types that carry one
    pub fn length(&self) -> Option<u32> {
        match self {
            FieldKind::Text { length }
            | FieldKind::Email { length }
            | FieldKind::Phone { length }
            | FieldKind::Url { length } => *length,
            FieldKind::TextArea(attrs)
            | FieldKind::LongTextArea(attrs)
            | FieldKind::RichTextArea(attrs) => attrs.length,
            _ => None,
        }
    }

    /// Configured visible lines, for types that carry them
    pub fn visible_lines(&self) -> Option<u32> {
        match self {
            FieldKind::TextArea(attrs)
            | FieldKind::LongTextArea(attrs)
            | FieldKind::RichTextArea(attrs) => attrs.visible_lines,
            FieldKind::MultiselectPicklist { visible_lines, .. } => *visible_lines,
            _ => None,
        }
    }

    /// Precision and scale, for numeric types and formulas
    pub fn numeric(&self) -> Option<NumericAttrs> {
        match self {
            FieldKind::Number(attrs) | FieldKind::Currency(attrs) | FieldKind::Percent(attrs) => {
                Some(*attrs)
            }
            FieldKind::Formula(attrs) => Some(attrs.numeric),
            _ => None,
        }
    }

    /// Value set, for picklist types
    pub fn picklist(&self) -> Option<&PicklistAttrs> {
        match self {
            FieldKind::Picklist(attrs) => Some(attrs),
            FieldKind::MultiselectPicklist { picklist, .. } => Some(picklist),
            _ => None,
        }
    }

    /// Mutable value set, for picklist types
    pub fn picklist_mut(&mut self) -> Option<&mut PicklistAttrs> {
        match self {
            FieldKind::Picklist(attrs) => Some(attrs),
            FieldKind::MultiselectPicklist { picklist, .. } => Some(picklist),
            _ => None,
        }
    }

    /// Relationship target, for relationship types
    pub fn relationship_target(&self) -> Option<&RelationshipTarget> {
        match self {
            FieldKind::Lookup(attrs) => Some(&attrs.target),
            FieldKind::MasterDetail(attrs) => Some(&attrs.target),
            _ => None,
        }
    }

    /// Rebuild the attribute set for another type
    ///
    /// Attributes meaningful for both the old and the new type carry over;
    /// everything else is dropped. A length only carries over when it fits
    /// the new type's maximum.
    pub fn convert_to(&self, field_type: FieldType) -> FieldKind {
        let mut next = FieldKind::default_for(field_type);

        let length = self
            .length()
            .filter(|len| field_type.max_length().is_some_and(|max| *len <= max));
        let visible_lines = self.visible_lines();
        let numeric = self.numeric();

        match &mut next {
            FieldKind::Text { length: l }
            | FieldKind::Email { length: l }
            | FieldKind::Phone { length: l }
            | FieldKind::Url { length: l } => *l = length,
            FieldKind::TextArea(attrs)
            | FieldKind::LongTextArea(attrs)
            | FieldKind::RichTextArea(attrs) => {
                attrs.length = length;
                attrs.visible_lines = visible_lines;
            }
            FieldKind::Number(attrs) | FieldKind::Currency(attrs) | FieldKind::Percent(attrs) => {
                if let Some(numeric) = numeric {
                    *attrs = numeric;
                }
            }
            FieldKind::Formula(attrs) => {
                if let Some(numeric) = numeric {
                    attrs.numeric = numeric;
                }
            }
            FieldKind::Picklist(attrs) => {
                if let Some(existing) = self.picklist() {
                    *attrs = existing.clone();
                }
            }
            FieldKind::MultiselectPicklist {
                picklist,
                visible_lines: lines,
            } => {
                if let Some(existing) = self.picklist() {
                    *picklist = existing.clone();
                }
                *lines = visible_lines;
            }
            FieldKind::Lookup(attrs) => {
                if let Some(target) = self.relationship_target() {
                    attrs.target = target.clone();
                }
            }
            FieldKind::MasterDetail(attrs) => {
                if let Some(target) = self.relationship_target() {
                    attrs.target = target.clone();
                }
            }
            FieldKind::Checkbox { .. } | FieldKind::Date | FieldKind::DateTime => {}
        }

        next
    }
}

/// A custom field specification
///
/// Universal attributes sit on the struct; everything type-specific lives in
/// [`FieldKind`]. Fields are public so callers (and the JSON import path) can
/// construct any combination; the editor operations below apply the
/// interactive coercion rules.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// API name, conventionally suffixed with `__c`
    pub api_name: String,

    /// Display label
    pub label: String,

    /// Value required on save
    pub required: bool,

    /// Field history tracking
    pub track_history: bool,

    /// External identifier flag; `None` when never defined
    pub external_id: Option<bool>,

    /// Uniqueness flag; `None` when never defined
    pub unique: Option<bool>,

    /// Inline help shown to users
    pub help_text: Option<String>,

    /// Administrator-facing description
    pub description: Option<String>,

    /// Type and type-specific attributes
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a field with default attributes for its type
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsmith_domain::{FieldSpec, FieldType};
    ///
    /// let field = FieldSpec::new("Patient_Name__c", "Patient Name", FieldType::Text);
    /// assert_eq!(field.field_type(), FieldType::Text);
    /// assert_eq!(field.external_id, Some(false));
    /// ```
    pub fn new(api_name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            api_name: api_name.into(),
            label: label.into(),
            required: false,
            track_history: false,
            external_id: Some(false),
            unique: Some(false),
            help_text: None,
            description: None,
            kind: FieldKind::default_for(field_type),
        }
    }

    /// Builder-style kind replacement
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// The field's type
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// Switch the field to another type, keeping compatible attributes
    pub fn change_type(&mut self, field_type: FieldType) {
        if self.field_type() == field_type {
            return;
        }
        self.kind = self.kind.convert_to(field_type);
    }

    /// Set the required flag, coercing a Lookup's `SetNull` constraint to
    /// `Restrict` (a required lookup cannot be cleared)
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        if required {
            if let FieldKind::Lookup(attrs) = &mut self.kind {
                if attrs.delete_constraint == Some(DeleteConstraint::SetNull) {
                    attrs.delete_constraint = Some(DeleteConstraint::Restrict);
                }
            }
        }
    }

    /// Set a Lookup's delete constraint, clearing `required` when the
    /// constraint is `SetNull`
    ///
    /// Returns false (and changes nothing) when the field is not a Lookup.
    pub fn set_delete_constraint(&mut self, constraint: DeleteConstraint) -> bool {
        let FieldKind::Lookup(attrs) = &mut self.kind else {
            return false;
        };
        attrs.delete_constraint = Some(constraint);
        if constraint == DeleteConstraint::SetNull {
            self.required = false;
        }
        true
    }

    /// True for a required Lookup with a `SetNull` delete constraint
    pub fn has_lookup_conflict(&self) -> bool {
        matches!(
            &self.kind,
            FieldKind::Lookup(LookupAttrs {
                delete_constraint: Some(DeleteConstraint::SetNull),
                ..
            })
        ) && self.required
    }
}
