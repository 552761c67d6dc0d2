//! JSON import and export of field documents
//!
//! The document format is `{ "objectName"?: string, "fields": FieldRecord[] }`.
//! Imports are all-or-nothing: a document is fully converted before any
//! caller state is touched.

use crate::error::ExtractorError;
use crate::record::FieldRecord;
use fieldsmith_domain::{FieldList, FieldSpec};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// A parsed field document
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDocument {
    /// Object the fields belong to, when the document names one
    pub object_name: Option<String>,
    /// Fields in document order
    pub fields: Vec<FieldSpec>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    object_name: Option<&'a str>,
    fields: Vec<FieldRecord>,
}

/// Parse an import document
///
/// # Errors
///
/// `ImportValidation` when the text is not a JSON object, `fields` is
/// missing or not an array, or any field fails to convert.
pub fn import_document(json: &str) -> Result<ImportDocument, ExtractorError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ExtractorError::ImportValidation(format!("not valid JSON: {}", e)))?;
    document_from_value(&value).map_err(ExtractorError::ImportValidation)
}

/// Import into a field list, replacing its contents
///
/// The list is untouched when the import fails. A document without an
/// object name keeps the list's current one. Returns the field count.
pub fn import_into(list: &mut FieldList, json: &str) -> Result<usize, ExtractorError> {
    let document = import_document(json)?;
    let count = document.fields.len();
    let object_name = document
        .object_name
        .or_else(|| list.object_name().map(str::to_string));

    list.replace_all(object_name, document.fields);
    info!("Imported {} fields", count);
    Ok(count)
}

/// Render fields in the import format
pub fn export_document(
    object_name: Option<&str>,
    fields: &[FieldSpec],
) -> Result<String, serde_json::Error> {
    let document = ExportDocument {
        object_name,
        fields: fields.iter().map(FieldRecord::from).collect(),
    };
    serde_json::to_string_pretty(&document)
}

/// Convert a parsed JSON value into a field document
///
/// Shared by imports and generation responses; the caller decides which
/// error the message becomes.
pub(crate) fn document_from_value(value: &Value) -> Result<ImportDocument, String> {
    let object = value
        .as_object()
        .ok_or_else(|| "expected a JSON object".to_string())?;

    let fields = object
        .get("fields")
        .ok_or_else(|| "missing \"fields\"".to_string())?
        .as_array()
        .ok_or_else(|| "\"fields\" must be an array".to_string())?;

    let object_name = match object.get("objectName") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) if name.trim().is_empty() => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => return Err("\"objectName\" must be a string".to_string()),
    };

    let fields = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let record: FieldRecord = serde_json::from_value(field.clone())
                .map_err(|e| format!("field {}: {}", index, e))?;
            let api_name = record.api_name.clone();
            record
                .into_spec()
                .map_err(|e| format!("field {} ({}): {}", index, api_name, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ImportDocument {
        object_name,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use fieldsmith_domain::FieldType;

    const DOCUMENT: &str = r#"{
        "objectName": "Patient__c",
        "fields": [
            {"apiName": "Patient_Name__c", "label": "Patient Name", "type": "Text", "length": 255, "required": true},
            {"apiName": "Admitted__c", "label": "Admitted", "type": "Checkbox", "defaultValue": true}
        ]
    }"#;

    #[test]
    fn test_import_document() {
        let document = import_document(DOCUMENT).unwrap();
        assert_eq!(document.object_name.as_deref(), Some("Patient__c"));
        assert_eq!(document.fields.len(), 2);
        assert_eq!(document.fields[1].field_type(), FieldType::Checkbox);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = import_document(r#"{"objectName": "X__c"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImportValidation);
        assert!(err.to_string().contains("missing \"fields\""));
    }

    #[test]
    fn test_fields_must_be_array() {
        let err = import_document(r#"{"fields": {"apiName": "X__c"}}"#).unwrap_err();
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(import_document("[]").is_err());
        assert!(import_document("not json").is_err());
    }

    #[test]
    fn test_import_into_is_all_or_nothing() {
        let mut list = FieldList::new();
        import_into(&mut list, DOCUMENT).unwrap();
        assert_eq!(list.len(), 2);

        let bad = r#"{"fields": [
            {"apiName": "Ok__c", "type": "Text"},
            {"apiName": "Bad__c", "type": "Hologram"}
        ]}"#;
        let err = import_into(&mut list, bad).unwrap_err();
        assert!(err.to_string().contains("Bad__c"));
        assert_eq!(list.len(), 2);
        assert!(list.get("Patient_Name__c").is_some());
        assert!(list.get("Ok__c").is_none());
    }

    #[test]
    fn test_import_keeps_object_name_when_absent() {
        let mut list = FieldList::new();
        import_into(&mut list, DOCUMENT).unwrap();
        import_into(&mut list, r#"{"fields": []}"#).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.object_name(), Some("Patient__c"));
    }

    #[test]
    fn test_export_then_import() {
        let document = import_document(DOCUMENT).unwrap();
        let json = export_document(Some("Patient__c"), &document.fields).unwrap();
        assert!(json.contains("\"objectName\": \"Patient__c\""));

        let again = import_document(&json).unwrap();
        assert_eq!(again, document);
    }
}
