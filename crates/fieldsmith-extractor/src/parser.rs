//! Parse generation output into fields
//!
//! Parsing is strict: a response either yields a well-formed field document
//! or fails with the stage that rejected it. Nothing is repaired.

use crate::error::ExtractorError;
use crate::import::{document_from_value, ImportDocument};
use crate::normalize::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Opening or closing fence with an optional language tag
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("valid code fence regex"));

/// Strip code fences and slice out the outermost JSON object
///
/// The slice runs from the first `{` to the last `}` and is normalized.
pub fn extract_json_object(response: &str) -> Result<String, ExtractorError> {
    let unfenced = strip_code_fences(response);

    let start = unfenced.find('{');
    let end = unfenced.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(normalize(&unfenced[start..=end])),
        (None, _) => Err(ExtractorError::MalformedResponse(
            "no '{' found in response".to_string(),
        )),
        _ => Err(ExtractorError::MalformedResponse(
            "no closing '}' found in response".to_string(),
        )),
    }
}

/// Parse a response into a JSON value carrying a `fields` array
pub fn parse_generation_response(response: &str) -> Result<Value, ExtractorError> {
    let json_str = extract_json_object(response)?;

    let value: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidJson(format!("JSON parse error: {}", e)))?;

    match value.get("fields") {
        Some(Value::Array(fields)) => {
            debug!("Response carries {} field entries", fields.len());
            Ok(value)
        }
        Some(_) => Err(ExtractorError::InvalidStructure(
            "\"fields\" must be an array".to_string(),
        )),
        None => Err(ExtractorError::InvalidStructure(
            "missing \"fields\"".to_string(),
        )),
    }
}

/// Parse a response all the way to typed fields
pub fn parse_generated_fields(response: &str) -> Result<ImportDocument, ExtractorError> {
    let value = parse_generation_response(response)?;
    document_from_value(&value).map_err(ExtractorError::InvalidStructure)
}

/// Remove fence markers, keeping whatever shares their line
fn strip_code_fences(response: &str) -> String {
    CODE_FENCE.replace_all(response, "").into_owned()
}
