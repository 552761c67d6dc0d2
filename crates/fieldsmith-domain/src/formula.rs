//! Formula module - calculated field attributes

use crate::numeric::NumericAttrs;

/// Data type a formula evaluates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormulaReturnType {
    /// Text result (the default when no return type is given)
    #[default]
    Text,
    /// Numeric result
    Number,
    /// Monetary result
    Currency,
    /// Percentage result
    Percent,
    /// Boolean result
    Checkbox,
    /// Date result
    Date,
    /// Date-time result
    DateTime,
}

impl FormulaReturnType {
    /// Get the return type name as written in metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaReturnType::Text => "Text",
            FormulaReturnType::Number => "Number",
            FormulaReturnType::Currency => "Currency",
            FormulaReturnType::Percent => "Percent",
            FormulaReturnType::Checkbox => "Checkbox",
            FormulaReturnType::Date => "Date",
            FormulaReturnType::DateTime => "DateTime",
        }
    }

    /// Parse a return type name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Text" => Some(FormulaReturnType::Text),
            "Number" => Some(FormulaReturnType::Number),
            "Currency" => Some(FormulaReturnType::Currency),
            "Percent" => Some(FormulaReturnType::Percent),
            "Checkbox" => Some(FormulaReturnType::Checkbox),
            "Date" => Some(FormulaReturnType::Date),
            "DateTime" => Some(FormulaReturnType::DateTime),
            _ => None,
        }
    }

    /// Whether the result carries precision and scale
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormulaReturnType::Number | FormulaReturnType::Currency | FormulaReturnType::Percent
        )
    }
}

/// How blank field references are treated inside a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreatBlanksAs {
    /// Blanks evaluate as zero (the default)
    #[default]
    BlankAsZero,
    /// Blanks stay blank
    BlankAsBlank,
}

impl TreatBlanksAs {
    /// Get the name as written in metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatBlanksAs::BlankAsZero => "BlankAsZero",
            TreatBlanksAs::BlankAsBlank => "BlankAsBlank",
        }
    }

    /// Parse a name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BlankAsZero" => Some(TreatBlanksAs::BlankAsZero),
            "BlankAsBlank" => Some(TreatBlanksAs::BlankAsBlank),
            _ => None,
        }
    }
}

/// Formula-specific attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaAttrs {
    /// Formula expression, stored raw
    pub formula: Option<String>,

    /// Result type; `None` means Text
    pub return_type: Option<FormulaReturnType>,

    /// Blank handling; `None` means BlankAsZero
    pub treat_blanks_as: Option<TreatBlanksAs>,

    /// Precision and scale, meaningful only for numeric return types
    pub numeric: NumericAttrs,
}

impl FormulaAttrs {
    /// Effective return type
    pub fn return_type(&self) -> FormulaReturnType {
        self.return_type.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_return_type_is_text() {
        let attrs = FormulaAttrs::default();
        assert_eq!(attrs.return_type(), FormulaReturnType::Text);
        assert!(!attrs.return_type().is_numeric());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(FormulaReturnType::parse("Currency"), Some(FormulaReturnType::Currency));
        assert_eq!(FormulaReturnType::parse("Lookup"), None);
        assert_eq!(TreatBlanksAs::parse("BlankAsBlank"), Some(TreatBlanksAs::BlankAsBlank));
        assert_eq!(TreatBlanksAs::default().as_str(), "BlankAsZero");
    }
}
