//! Field type module - the discriminant of every field specification

use std::fmt;

/// Type of a custom field
///
/// The type decides which optional attributes are meaningful for a field.
/// Attribute sets per type live in [`crate::FieldKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Single-line text (length 1-255)
    Text,
    /// Multi-line plain text
    TextArea,
    /// Long multi-line text (length up to 131072)
    LongTextArea,
    /// Rich text with markup (length up to 131072)
    RichTextArea,
    /// Numeric value with precision and scale
    Number,
    /// Monetary value with precision and scale
    Currency,
    /// Percentage with precision and scale
    Percent,
    /// Boolean checkbox
    Checkbox,
    /// Calendar date
    Date,
    /// Date and time
    DateTime,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// URL
    Url,
    /// Single-select picklist
    Picklist,
    /// Multi-select picklist
    MultiselectPicklist,
    /// Loose relationship to another object
    Lookup,
    /// Tight parent-child relationship
    MasterDetail,
    /// Calculated field
    Formula,
}

impl FieldType {
    /// Every field type, in declaration order
    pub const ALL: [FieldType; 18] = [
        FieldType::Text,
        FieldType::TextArea,
        FieldType::LongTextArea,
        FieldType::RichTextArea,
        FieldType::Number,
        FieldType::Currency,
        FieldType::Percent,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Url,
        FieldType::Picklist,
        FieldType::MultiselectPicklist,
        FieldType::Lookup,
        FieldType::MasterDetail,
        FieldType::Formula,
    ];

    /// Get the type name as written in metadata and JSON documents
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::TextArea => "TextArea",
            FieldType::LongTextArea => "LongTextArea",
            FieldType::RichTextArea => "RichTextArea",
            FieldType::Number => "Number",
            FieldType::Currency => "Currency",
            FieldType::Percent => "Percent",
            FieldType::Checkbox => "Checkbox",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::Url => "Url",
            FieldType::Picklist => "Picklist",
            FieldType::MultiselectPicklist => "MultiselectPicklist",
            FieldType::Lookup => "Lookup",
            FieldType::MasterDetail => "MasterDetail",
            FieldType::Formula => "Formula",
        }
    }

    /// Parse a type name (exact match, as produced by [`FieldType::as_str`])
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Single-line text types that carry a `length` of 1-255
    pub fn is_short_text(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Url
        )
    }

    /// Text area family (`TextArea`, `LongTextArea`, `RichTextArea`)
    pub fn is_text_area(&self) -> bool {
        matches!(
            self,
            FieldType::TextArea | FieldType::LongTextArea | FieldType::RichTextArea
        )
    }

    /// Numeric types that carry precision and scale
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Currency | FieldType::Percent)
    }

    /// Picklist family
    pub fn is_picklist(&self) -> bool {
        matches!(self, FieldType::Picklist | FieldType::MultiselectPicklist)
    }

    /// Relationship family
    pub fn is_relationship(&self) -> bool {
        matches!(self, FieldType::Lookup | FieldType::MasterDetail)
    }

    /// Maximum allowed `length` for types that carry one
    pub fn max_length(&self) -> Option<u32> {
        match self {
            FieldType::Text
            | FieldType::Email
            | FieldType::Phone
            | FieldType::Url
            | FieldType::TextArea => Some(255),
            FieldType::LongTextArea | FieldType::RichTextArea => Some(131_072),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid field type: {}", s))
    }
}
