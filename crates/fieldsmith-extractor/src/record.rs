//! Flat JSON record of a field
//!
//! Editor state and model output both carry every attribute on one flat
//! object keyed by the metadata attribute names. [`FieldRecord`] mirrors that
//! shape; [`FieldRecord::into_spec`] keeps only the attributes meaningful to
//! the declared type.

use fieldsmith_domain::{
    DeleteConstraint, FieldKind, FieldSpec, FieldType, FormulaAttrs, FormulaReturnType,
    LookupAttrs, MasterDetailAttrs, NumericAttrs, PicklistAttrs, PicklistValue,
    RelationshipTarget, TextAreaAttrs, TreatBlanksAs,
};
use serde::{Deserialize, Serialize};

/// One field as it appears in import, export and generated JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// API name
    #[serde(default)]
    pub api_name: String,

    /// Display label
    #[serde(default)]
    pub label: String,

    /// Type name (e.g. "Text", "MasterDetail")
    #[serde(rename = "type")]
    pub field_type: String,

    /// Required flag
    #[serde(default)]
    pub required: bool,

    /// Field history tracking
    #[serde(default)]
    pub track_history: bool,

    /// External ID flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<bool>,

    /// Unique flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    /// Inline help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Internal description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Maximum characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Visible lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_lines: Option<u32>,

    /// Total digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    /// Decimal places
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    /// Checkbox default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<bool>,

    /// Related object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<String>,

    /// Child relationship name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,

    /// Child relationship label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_label: Option<String>,

    /// Lookup delete behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_constraint: Option<String>,

    /// Master-detail order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_order: Option<u32>,

    /// Master-detail reparenting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reparentable_master_detail: Option<bool>,

    /// Master-detail sharing requirement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_requires_master_read: Option<bool>,

    /// Formula expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Formula result type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    /// Formula blank handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_blanks_as: Option<String>,

    /// Picklist values in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picklist_values: Option<Vec<PicklistValueRecord>>,

    /// Restricted picklist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted: Option<bool>,
}

/// One picklist value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValueRecord {
    /// Stored value
    #[serde(default)]
    pub full_name: String,

    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Selected by default
    #[serde(default)]
    pub default: bool,
}

impl From<PicklistValueRecord> for PicklistValue {
    fn from(record: PicklistValueRecord) -> Self {
        PicklistValue {
            full_name: record.full_name,
            label: record.label,
            default: record.default,
        }
    }
}

impl From<&PicklistValue> for PicklistValueRecord {
    fn from(value: &PicklistValue) -> Self {
        PicklistValueRecord {
            full_name: value.full_name.clone(),
            label: value.label.clone(),
            default: value.default,
        }
    }
}

impl FieldRecord {
    /// Convert to a typed field, dropping attributes foreign to its type
    ///
    /// Fails on an unknown type name, or an unknown delete constraint,
    /// return type or blank treatment where that attribute applies.
    pub fn into_spec(self) -> Result<FieldSpec, String> {
        let FieldRecord {
            api_name,
            label,
            field_type,
            required,
            track_history,
            external_id,
            unique,
            help_text,
            description,
            length,
            visible_lines,
            precision,
            scale,
            default_value,
            reference_to,
            relationship_name,
            relationship_label,
            delete_constraint,
            relationship_order,
            reparentable_master_detail,
            write_requires_master_read,
            formula,
            return_type,
            treat_blanks_as,
            picklist_values,
            restricted,
        } = self;

        let parsed_type = FieldType::parse(&field_type)
            .ok_or_else(|| format!("unknown field type '{}'", field_type))?;

        let numeric = NumericAttrs { precision, scale };
        let text_area = TextAreaAttrs {
            length,
            visible_lines,
        };
        let target = RelationshipTarget {
            reference_to,
            relationship_name,
            relationship_label,
        };
        let picklist = PicklistAttrs {
            values: picklist_values
                .unwrap_or_default()
                .into_iter()
                .map(PicklistValue::from)
                .collect(),
            restricted,
        };

        let kind = match parsed_type {
            FieldType::Text => FieldKind::Text { length },
            FieldType::Email => FieldKind::Email { length },
            FieldType::Phone => FieldKind::Phone { length },
            FieldType::Url => FieldKind::Url { length },
            FieldType::TextArea => FieldKind::TextArea(text_area),
            FieldType::LongTextArea => FieldKind::LongTextArea(text_area),
            FieldType::RichTextArea => FieldKind::RichTextArea(text_area),
            FieldType::Number => FieldKind::Number(numeric),
            FieldType::Currency => FieldKind::Currency(numeric),
            FieldType::Percent => FieldKind::Percent(numeric),
            FieldType::Checkbox => FieldKind::Checkbox {
                default_value: default_value.unwrap_or(false),
            },
            FieldType::Date => FieldKind::Date,
            FieldType::DateTime => FieldKind::DateTime,
            FieldType::Picklist => FieldKind::Picklist(picklist),
            FieldType::MultiselectPicklist => FieldKind::MultiselectPicklist {
                picklist,
                visible_lines,
            },
            FieldType::Lookup => FieldKind::Lookup(LookupAttrs {
                target,
                delete_constraint: parse_keyword(
                    delete_constraint,
                    "deleteConstraint",
                    DeleteConstraint::parse,
                )?,
            }),
            FieldType::MasterDetail => FieldKind::MasterDetail(MasterDetailAttrs {
                target,
                relationship_order,
                reparentable: reparentable_master_detail.unwrap_or(false),
                write_requires_master_read: write_requires_master_read.unwrap_or(false),
            }),
            FieldType::Formula => FieldKind::Formula(FormulaAttrs {
                formula,
                return_type: parse_keyword(return_type, "returnType", FormulaReturnType::parse)?,
                treat_blanks_as: parse_keyword(
                    treat_blanks_as,
                    "treatBlanksAs",
                    TreatBlanksAs::parse,
                )?,
                numeric,
            }),
        };

        Ok(FieldSpec {
            api_name,
            label,
            required,
            track_history,
            external_id,
            unique,
            help_text,
            description,
            kind,
        })
    }
}

/// Parse an optional keyword attribute; empty strings count as absent
fn parse_keyword<T>(
    value: Option<String>,
    attribute: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse(text)
            .map(Some)
            .ok_or_else(|| format!("unknown {} '{}'", attribute, text)),
    }
}

impl From<&FieldSpec> for FieldRecord {
    fn from(field: &FieldSpec) -> Self {
        let mut record = FieldRecord {
            api_name: field.api_name.clone(),
            label: field.label.clone(),
            field_type: field.field_type().as_str().to_string(),
            required: field.required,
            track_history: field.track_history,
            external_id: field.external_id,
            unique: field.unique,
            help_text: field.help_text.clone(),
            description: field.description.clone(),
            ..FieldRecord::default()
        };

        match &field.kind {
            FieldKind::Text { length }
            | FieldKind::Email { length }
            | FieldKind::Phone { length }
            | FieldKind::Url { length } => record.length = *length,
            FieldKind::TextArea(attrs)
            | FieldKind::LongTextArea(attrs)
            | FieldKind::RichTextArea(attrs) => {
                record.length = attrs.length;
                record.visible_lines = attrs.visible_lines;
            }
            FieldKind::Number(numeric) | FieldKind::Currency(numeric) | FieldKind::Percent(numeric) => {
                record.precision = numeric.precision;
                record.scale = numeric.scale;
            }
            FieldKind::Checkbox { default_value } => record.default_value = Some(*default_value),
            FieldKind::Date | FieldKind::DateTime => {}
            FieldKind::Picklist(picklist) => record.set_picklist(picklist),
            FieldKind::MultiselectPicklist {
                picklist,
                visible_lines,
            } => {
                record.set_picklist(picklist);
                record.visible_lines = *visible_lines;
            }
            FieldKind::Lookup(lookup) => {
                record.set_target(&lookup.target);
                record.delete_constraint = lookup.delete_constraint.map(|c| c.as_str().to_string());
            }
            FieldKind::MasterDetail(detail) => {
                record.set_target(&detail.target);
                record.relationship_order = detail.relationship_order;
                record.reparentable_master_detail = Some(detail.reparentable);
                record.write_requires_master_read = Some(detail.write_requires_master_read);
            }
            FieldKind::Formula(formula) => {
                record.formula = formula.formula.clone();
                record.return_type = formula.return_type.map(|t| t.as_str().to_string());
                record.treat_blanks_as = formula.treat_blanks_as.map(|t| t.as_str().to_string());
                record.precision = formula.numeric.precision;
                record.scale = formula.numeric.scale;
            }
        }

        record
    }
}

impl FieldRecord {
    fn set_picklist(&mut self, picklist: &PicklistAttrs) {
        self.picklist_values = Some(picklist.values.iter().map(PicklistValueRecord::from).collect());
        self.restricted = picklist.restricted;
    }

    fn set_target(&mut self, target: &RelationshipTarget) {
        self.reference_to = target.reference_to.clone();
        self.relationship_name = target.relationship_name.clone();
        self.relationship_label = target.relationship_label.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> FieldRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_record() {
        let spec = record(
            r#"{"apiName": "Patient_Name__c", "label": "Patient Name", "type": "Text", "length": 255, "required": true}"#,
        )
        .into_spec()
        .unwrap();
        assert_eq!(spec.api_name, "Patient_Name__c");
        assert!(spec.required);
        assert_eq!(spec.kind, FieldKind::Text { length: Some(255) });
        assert_eq!(spec.external_id, None);
    }

    #[test]
    fn test_formula_drops_stray_relationship() {
        let spec = record(
            r#"{"apiName": "Total__c", "label": "Total", "type": "Formula", "referenceTo": "Account", "formula": "A__c + B__c", "returnType": "Currency", "precision": 16}"#,
        )
        .into_spec()
        .unwrap();
        assert!(spec.kind.relationship_target().is_none());
        match spec.kind {
            FieldKind::Formula(formula) => {
                assert_eq!(formula.return_type, Some(FormulaReturnType::Currency));
                assert_eq!(formula.numeric.precision, Some(16));
            }
            other => panic!("expected formula, got {:?}", other),
        }
    }

    #[test]
    fn test_picklist_values_in_order() {
        let spec = record(
            r#"{"apiName": "Tier__c", "label": "Tier", "type": "Picklist", "picklistValues": [{"fullName": "A", "label": "Option A", "default": true}, {"fullName": "B", "label": "Option B"}]}"#,
        )
        .into_spec()
        .unwrap();
        let picklist = spec.kind.picklist().unwrap();
        assert_eq!(picklist.values.len(), 2);
        assert_eq!(picklist.values[0].full_name, "A");
        assert!(picklist.values[0].default);
        assert!(!picklist.values[1].default);
        assert!(picklist.restricted());
    }

    #[test]
    fn test_lookup_constraint() {
        let spec = record(
            r#"{"apiName": "Owner__c", "label": "Owner", "type": "Lookup", "referenceTo": "Contact", "deleteConstraint": "SetNull"}"#,
        )
        .into_spec()
        .unwrap();
        match spec.kind {
            FieldKind::Lookup(lookup) => {
                assert_eq!(lookup.delete_constraint, Some(DeleteConstraint::SetNull));
                assert_eq!(lookup.target.reference_to.as_deref(), Some("Contact"));
            }
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_constraint_is_absent() {
        let spec = record(r#"{"apiName": "Owner__c", "type": "Lookup", "deleteConstraint": ""}"#)
            .into_spec()
            .unwrap();
        assert!(matches!(
            spec.kind,
            FieldKind::Lookup(LookupAttrs { delete_constraint: None, .. })
        ));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = record(r#"{"apiName": "X__c", "type": "Geolocation"}"#)
            .into_spec()
            .unwrap_err();
        assert!(err.contains("Geolocation"));
    }

    #[test]
    fn test_unknown_return_type_is_rejected() {
        let result = record(r#"{"apiName": "X__c", "type": "Formula", "returnType": "Blob"}"#).into_spec();
        assert!(result.is_err());
    }

    #[test]
    fn test_foreign_keyword_is_ignored() {
        let spec = record(r#"{"apiName": "X__c", "type": "Text", "deleteConstraint": "Sometimes"}"#)
            .into_spec();
        assert!(spec.is_ok());
    }

    #[test]
    fn test_quoted_boolean_is_rejected() {
        let result: Result<FieldRecord, _> =
            serde_json::from_str(r#"{"apiName": "X__c", "type": "Text", "required": "true"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_spec_writes_active_attributes_only() {
        let mut field = FieldSpec::new("Owner__c", "Owner", FieldType::Lookup);
        if let FieldKind::Lookup(lookup) = &mut field.kind {
            lookup.target.reference_to = Some("Contact".to_string());
        }
        field.change_type(FieldType::Checkbox);

        let record = FieldRecord::from(&field);
        assert_eq!(record.field_type, "Checkbox");
        assert_eq!(record.default_value, Some(false));
        assert_eq!(record.reference_to, None);

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("referenceTo"));
        assert!(json.contains("\"type\":\"Checkbox\""));
    }

    #[test]
    fn test_spec_survives_record_conversion() {
        let mut field = FieldSpec::new("Stage__c", "Stage", FieldType::MultiselectPicklist);
        if let FieldKind::MultiselectPicklist { picklist, visible_lines } = &mut field.kind {
            picklist.push(PicklistValue::new("Open", "Open"));
            picklist.push(PicklistValue::new("Won", "Closed Won"));
            picklist.restricted = Some(false);
            *visible_lines = Some(4);
        }
        field.help_text = Some("Current stage".to_string());

        let converted = FieldRecord::from(&field).into_spec().unwrap();
        assert_eq!(converted, field);
    }
}
