//! Field list module - the in-memory working set of fields

use crate::field::FieldSpec;

/// Ordered fields for one object
///
/// There is no backing store: a list lives for as long as the caller keeps
/// it, and an import replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    object_name: Option<String>,
    fields: Vec<FieldSpec>,
}

impl FieldList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from existing fields
    pub fn from_fields(object_name: Option<String>, fields: Vec<FieldSpec>) -> Self {
        Self { object_name, fields }
    }

    /// Object the fields belong to
    pub fn object_name(&self) -> Option<&str> {
        self.object_name.as_deref()
    }

    /// Fields in order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a field
    pub fn push(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }

    /// Look up a field by API name
    pub fn get(&self, api_name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.api_name == api_name)
    }

    /// Look up a field by API name for editing
    pub fn get_mut(&mut self, api_name: &str) -> Option<&mut FieldSpec> {
        self.fields.iter_mut().find(|f| f.api_name == api_name)
    }

    /// Remove a field by API name, returning it if present
    pub fn remove(&mut self, api_name: &str) -> Option<FieldSpec> {
        let idx = self.fields.iter().position(|f| f.api_name == api_name)?;
        Some(self.fields.remove(idx))
    }

    /// Replace every field (and the object name) at once
    pub fn replace_all(&mut self, object_name: Option<String>, fields: Vec<FieldSpec>) {
        self.object_name = object_name;
        self.fields = fields;
    }

    /// API names that occur more than once
    pub fn duplicate_api_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for field in &self.fields {
            let name = field.api_name.as_str();
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }
}
