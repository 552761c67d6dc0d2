//! Prompt engineering for field generation

use crate::config::DEFAULT_OBJECT_NAME;

/// Builds the generation prompt around a reduced document
///
/// The scaffold never varies; only the embedded text and the fallback
/// object name are substituted.
pub struct PromptBuilder {
    text: String,
    default_object_name: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default_object_name: DEFAULT_OBJECT_NAME.to_string(),
        }
    }

    /// Object name the model should use when the document names none
    pub fn with_default_object_name(mut self, name: impl Into<String>) -> Self {
        self.default_object_name = name.into();
        self
    }

    /// Build the complete generation prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len()
                + ATTRIBUTE_REFERENCE.len()
                + CONVERSION_RULES.len()
                + OUTPUT_FORMAT_REMINDER.len()
                + self.text.len()
                + 256,
        );

        // 1. Task and output shape
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Which attributes belong to which type
        prompt.push_str(ATTRIBUTE_REFERENCE);
        prompt.push_str("\n\n");

        // 3. Conversion rules
        prompt.push_str(CONVERSION_RULES);
        prompt.push_str(&format!(
            "- If the document does not name the object, set \"objectName\" to \"{}\".\n\n",
            self.default_object_name
        ));

        // 4. The text to analyze
        prompt.push_str("Field specification document:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Render the prompt with the default fallback object name
pub fn build_prompt(field_spec_text: &str) -> String {
    PromptBuilder::new(field_spec_text).build()
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are a metadata analyst. Read the field specification document below and convert every custom field it defines into a JSON object.

Respond with a single JSON object of this shape:

{
  "objectName": "Patient__c",
  "fields": [
    {
      "apiName": "Patient_Name__c",
      "label": "Patient Name",
      "type": "Text",
      "required": true,
      "trackHistory": false,
      "externalId": false,
      "unique": false,
      "helpText": "Full legal name",
      "description": "Name as printed on the admission form",
      "length": 255
    }
  ]
}"#;

const ATTRIBUTE_REFERENCE: &str = r#"Attributes by type (include only those that apply to the field's type):
- Text, Email, Phone, Url: length (1-255)
- TextArea: length (1-255), visibleLines
- LongTextArea, RichTextArea: length (1-131072), visibleLines
- Number, Currency, Percent: precision (1-18), scale (0-17)
- Checkbox: defaultValue (true or false)
- Date, DateTime: no extra attributes
- Picklist: picklistValues [{"fullName", "label", "default"}], restricted
- MultiselectPicklist: picklistValues, restricted, visibleLines
- Lookup: referenceTo, relationshipName, relationshipLabel, deleteConstraint (SetNull, Restrict or Cascade)
- MasterDetail: referenceTo, relationshipName, relationshipLabel, relationshipOrder (0 or 1), reparentableMasterDetail, writeRequiresMasterRead
- Formula: formula, returnType (Text, Number, Currency, Percent, Checkbox, Date or DateTime), treatBlanksAs (BlankAsZero or BlankAsBlank); precision and scale when returnType is Number, Currency or Percent
Every field also has apiName, label, type, required, trackHistory, externalId, unique, and optionally helpText and description."#;

const CONVERSION_RULES: &str = r#"Rules:
- "type" must be exactly one of the type names listed above.
- API names end with "__c"; derive one from the label when the document gives none.
- Booleans are JSON literals true and false, never quoted strings.
- Omit attributes the document does not state; do not invent values. Unstated booleans are false.
- A Lookup field cannot be required with deleteConstraint SetNull. If the document asks for both, keep required true and use deleteConstraint Restrict.
- Extract every field in the document, including fields mentioned only in tables or lists. Do not stop early or summarize.
- helpText is the end-user hint shown next to the field; description is internal documentation. Keep them as separate attributes and never merge one into the other.
"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output ONLY the JSON object. No explanations, no markdown, just JSON.
Example: {"objectName": "Account", "fields": [{"apiName": "Tier__c", "label": "Tier", "type": "Picklist", "required": false, "picklistValues": [{"fullName": "Gold", "label": "Gold", "default": true}]}]}"#;
