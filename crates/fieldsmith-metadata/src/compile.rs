//! Field-to-XML compiler
//!
//! Elements are written in a fixed order, alphabetical by tag name except
//! where the format places a type-specific element elsewhere (the
//! multi-select `visibleLines` after `valueSet`). Each element is emitted only
//! when its governing type condition holds, so attributes from another type
//! can never appear in the output.
//!
//! The compiler does not re-validate its input: a required Lookup with a
//! `SetNull` delete constraint is written exactly as given. Coercion belongs
//! to the editing operations on [`FieldSpec`].

use crate::writer::MetadataWriter;
use fieldsmith_domain::{
    FieldKind, FieldSpec, FieldType, NumericAttrs, PicklistAttrs, RelationshipTarget,
};

const ROOT_ELEMENT: &str = "CustomField";

/// Compile a field into its metadata XML document
///
/// # Examples
///
/// ```
/// use fieldsmith_domain::{FieldKind, FieldSpec, FieldType};
/// use fieldsmith_metadata::compile_field;
///
/// let field = FieldSpec::new("Patient_Name__c", "Patient Name", FieldType::Text)
///     .with_kind(FieldKind::Text { length: Some(255) });
/// let xml = compile_field(&field);
/// assert!(xml.contains("<fullName>Patient_Name__c</fullName>"));
/// assert!(xml.contains("<length>255</length>"));
/// ```
pub fn compile_field(field: &FieldSpec) -> String {
    let kind = &field.kind;
    let field_type = field.field_type();
    let numeric = numeric_output(kind);

    let mut w = MetadataWriter::new(ROOT_ELEMENT);

    w.text("fullName", &field.api_name);

    if let FieldKind::Checkbox { default_value } = kind {
        w.boolean("defaultValue", *default_value);
    }

    if let FieldKind::Lookup(attrs) = kind {
        if let Some(constraint) = attrs.delete_constraint {
            w.keyword("deleteConstraint", constraint.as_str());
        }
    }

    if let Some(external_id) = field.external_id {
        w.boolean("externalId", external_id);
    }

    if let FieldKind::Formula(attrs) = kind {
        w.opt_text("formula", attrs.formula.as_deref());
        w.keyword(
            "formulaTreatBlanksAs",
            attrs.treat_blanks_as.unwrap_or_default().as_str(),
        );
    }

    w.opt_text("inlineHelpText", field.help_text.as_deref());
    w.text("label", &field.label);

    if let Some(length) = kind.length() {
        w.number("length", length);
    }

    if field_type.is_text_area() {
        if let Some(lines) = kind.visible_lines() {
            w.number("visibleLines", lines);
        }
    }

    if let Some(numeric) = numeric {
        w.number("precision", numeric.precision());
    }

    if let Some(target) = kind.relationship_target() {
        write_relationship_target(&mut w, target);
    }

    if let FieldKind::MasterDetail(attrs) = kind {
        w.number("relationshipOrder", attrs.relationship_order.unwrap_or(0));
        w.boolean("reparentableMasterDetail", attrs.reparentable);
    }

    if field_type != FieldType::MasterDetail {
        w.boolean("required", field.required);
    }

    if let Some(numeric) = numeric {
        w.number("scale", numeric.scale());
    }

    w.boolean("trackHistory", field.track_history);
    w.keyword("type", metadata_type(kind));

    if let Some(unique) = field.unique {
        w.boolean("unique", unique);
    }

    if let Some(picklist) = kind.picklist() {
        write_value_set(&mut w, picklist);
    }

    if let FieldKind::MultiselectPicklist {
        visible_lines: Some(lines),
        ..
    } = kind
    {
        w.number("visibleLines", *lines);
    }

    if let FieldKind::MasterDetail(attrs) = kind {
        w.boolean("writeRequiresMasterRead", attrs.write_requires_master_read);
    }

    w.finish()
}

/// Value of the `type` element; formulas are typed by their result
fn metadata_type(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Formula(attrs) => attrs.return_type().as_str(),
        other => other.field_type().as_str(),
    }
}

/// Precision and scale that reach the output, if any
fn numeric_output(kind: &FieldKind) -> Option<NumericAttrs> {
    match kind {
        FieldKind::Number(attrs) | FieldKind::Currency(attrs) | FieldKind::Percent(attrs) => {
            Some(*attrs)
        }
        FieldKind::Formula(attrs) if attrs.return_type().is_numeric() => Some(attrs.numeric),
        _ => None,
    }
}

fn write_relationship_target(w: &mut MetadataWriter, target: &RelationshipTarget) {
    w.opt_text("referenceTo", target.reference_to.as_deref());
    w.opt_text("relationshipLabel", target.relationship_label.as_deref());
    w.opt_text("relationshipName", target.relationship_name.as_deref());
}

fn write_value_set(w: &mut MetadataWriter, picklist: &PicklistAttrs) {
    w.open("valueSet");
    w.boolean("restricted", picklist.restricted());
    w.open("valueSetDefinition");
    w.boolean("sorted", false);
    for value in picklist.values.iter().filter(|v| !v.full_name.is_empty()) {
        w.open("value");
        w.text("fullName", &value.full_name);
        w.boolean("default", value.default);
        w.text("label", value.display_label());
        w.close("value");
    }
    w.close("valueSetDefinition");
    w.close("valueSet");
}
