//! Integration tests for compilation and export

use fieldsmith_domain::{
    DeleteConstraint, FieldKind, FieldSpec, FieldType, LookupAttrs, PicklistAttrs, PicklistValue,
    RelationshipTarget,
};
use fieldsmith_metadata::{
    compile_field, export_artifacts, write_artifacts, MetadataError, METADATA_NAMESPACE,
    XML_DECLARATION,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn sample_fields() -> Vec<FieldSpec> {
    let mut status = FieldSpec::new("Status__c", "Status", FieldType::Picklist);
    status.kind = FieldKind::Picklist(PicklistAttrs {
        values: vec![PicklistValue::new("New", "New"), PicklistValue::new("Done", "Done")],
        restricted: None,
    });

    vec![
        FieldSpec::new("Patient_Name__c", "Patient Name", FieldType::Text)
            .with_kind(FieldKind::Text { length: Some(120) }),
        status,
        FieldSpec::new("Admitted__c", "Admitted", FieldType::DateTime),
    ]
}

#[test]
fn test_every_type_compiles_to_a_complete_document() {
    for field_type in FieldType::ALL {
        let field = FieldSpec::new("Any__c", "Any", field_type);
        let xml = compile_field(&field);
        let mut lines = xml.lines();
        assert_eq!(lines.next(), Some(XML_DECLARATION));
        assert_eq!(
            lines.next().map(str::to_string),
            Some(format!("<CustomField xmlns=\"{}\">", METADATA_NAMESPACE))
        );
        assert_eq!(xml.lines().last(), Some("</CustomField>"));
        assert!(xml.contains("<trackHistory>false</trackHistory>"));
        assert!(!xml.contains("/>"), "{} produced a self-closing element", field_type);
    }
}

#[test]
fn test_stale_relationship_never_reaches_formula_output() {
    let mut field = FieldSpec::new("Owner_Name__c", "Owner Name", FieldType::Lookup).with_kind(
        FieldKind::Lookup(LookupAttrs {
            target: RelationshipTarget {
                reference_to: Some("Contact".to_string()),
                relationship_name: Some("Owners".to_string()),
                relationship_label: Some("Owners".to_string()),
            },
            delete_constraint: Some(DeleteConstraint::Restrict),
        }),
    );
    field.change_type(FieldType::Formula);

    let xml = compile_field(&field);
    assert!(!xml.contains("referenceTo"));
    assert!(!xml.contains("relationshipName"));
    assert!(!xml.contains("deleteConstraint"));
    assert!(xml.contains("<type>Text</type>"));
}

#[test]
fn test_export_file_names_follow_api_names() {
    let artifacts = export_artifacts(&sample_fields());
    let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Patient_Name__c.field-meta.xml",
            "Status__c.field-meta.xml",
            "Admitted__c.field-meta.xml",
        ]
    );
}

#[test]
fn test_write_artifacts_writes_exact_contents() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("fields");
    let artifacts = export_artifacts(&sample_fields());

    let written = write_artifacts(&out, &artifacts).unwrap();
    assert_eq!(written.len(), 3);

    for (path, artifact) in written.iter().zip(&artifacts) {
        let on_disk = std::fs::read_to_string(path).unwrap();
        assert_eq!(on_disk, artifact.contents);
        assert!(!on_disk.ends_with('\n'));
    }
}

#[test]
fn test_write_artifacts_rejects_empty_api_name() {
    let dir = TempDir::new().unwrap();
    let artifacts = export_artifacts(&[FieldSpec::new("", "Nameless", FieldType::Text)]);
    let result = write_artifacts(dir.path(), &artifacts);
    assert!(matches!(result, Err(MetadataError::EmptyApiName)));
}

proptest! {
    /// Property: compiling the same field twice yields identical bytes
    #[test]
    fn test_compile_is_deterministic(
        type_idx in 0..FieldType::ALL.len(),
        api_name in "[A-Za-z][A-Za-z0-9_]{0,20}__c",
        label in ".{0,40}",
        required: bool,
        track_history: bool,
        help in proptest::option::of(".{0,40}"),
    ) {
        let mut field = FieldSpec::new(api_name, label, FieldType::ALL[type_idx]);
        field.required = required;
        field.track_history = track_history;
        field.help_text = help;

        let first = compile_field(&field);
        let second = compile_field(&field.clone());
        prop_assert_eq!(first, second);
    }

    /// Property: escaped output never contains raw markup from values
    #[test]
    fn test_label_markup_is_escaped(label in "[<>&\"' a-z]{1,30}") {
        let field = FieldSpec::new("X__c", label, FieldType::Date);
        let xml = compile_field(&field);
        let label_line = xml.lines().find(|l| l.trim_start().starts_with("<label>")).unwrap();
        let body = label_line
            .trim_start()
            .trim_start_matches("<label>")
            .trim_end_matches("</label>");
        prop_assert!(!body.contains('<'));
        prop_assert!(!body.contains('>'));
        prop_assert!(!body.contains('"'));
        prop_assert!(!body.contains('\''));
    }
}
