//! Picklist module - ordered value sets

/// One picklist entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicklistValue {
    /// API value
    pub full_name: String,

    /// Display label; the compiler falls back to `full_name` when absent
    pub label: Option<String>,

    /// Whether this value is pre-selected
    pub default: bool,
}

impl PicklistValue {
    /// Create a non-default value with a label
    pub fn new(full_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            label: Some(label.into()),
            default: false,
        }
    }

    /// Label used for display
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.full_name,
        }
    }
}

/// Picklist and multi-select picklist attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PicklistAttrs {
    /// Values in display order
    pub values: Vec<PicklistValue>,

    /// Restrict input to the value set; `None` means restricted
    pub restricted: Option<bool>,
}

impl PicklistAttrs {
    /// Effective restriction flag
    pub fn restricted(&self) -> bool {
        self.restricted.unwrap_or(true)
    }

    /// Append a value
    pub fn push(&mut self, value: PicklistValue) {
        self.values.push(value);
    }

    /// Remove a value by API name, returning it if present
    pub fn remove(&mut self, full_name: &str) -> Option<PicklistValue> {
        let idx = self.values.iter().position(|v| v.full_name == full_name)?;
        Some(self.values.remove(idx))
    }

    /// Mark a value as default
    ///
    /// With `exclusive` set (single-select picklists) every other value loses
    /// its default flag. Returns false when no value has this API name.
    pub fn set_default(&mut self, full_name: &str, exclusive: bool) -> bool {
        if !self.values.iter().any(|v| v.full_name == full_name) {
            return false;
        }
        for value in &mut self.values {
            if value.full_name == full_name {
                value.default = true;
            } else if exclusive {
                value.default = false;
            }
        }
        true
    }

    /// Number of values flagged as default
    pub fn default_count(&self) -> usize {
        self.values.iter().filter(|v| v.default).count()
    }
}
