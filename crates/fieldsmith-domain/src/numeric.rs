//! Text and numeric attribute sets

/// Default precision for numeric fields
pub const DEFAULT_PRECISION: u32 = 18;

/// Default scale for numeric fields
pub const DEFAULT_SCALE: u32 = 2;

/// Precision (total digits) and scale (decimal digits)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericAttrs {
    /// Total digits, 1-18
    pub precision: Option<u32>,

    /// Digits right of the decimal point, 0-17
    pub scale: Option<u32>,
}

impl NumericAttrs {
    /// Effective precision
    pub fn precision(&self) -> u32 {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    /// Effective scale
    pub fn scale(&self) -> u32 {
        self.scale.unwrap_or(DEFAULT_SCALE)
    }
}

/// Length and visible lines of text area fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextAreaAttrs {
    /// Maximum characters
    pub length: Option<u32>,

    /// Rows shown in the editor
    pub visible_lines: Option<u32>,
}
