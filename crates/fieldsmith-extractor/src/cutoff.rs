//! Section cutoff detection
//!
//! Requirement documents usually end with sections about automation,
//! layouts, rollout and so on. Those sections mention field names too, which
//! confuses generation, so everything from the first such heading after the
//! last real field definition is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Lines after the last field line that are never treated as a boundary
pub const GRACE_LINES: usize = 15;

/// Level assigned to bold-opened pseudo headings (weaker than any `#`)
const BOLD_LEVEL: usize = 7;

static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(#{1,6})\s+(.*)$").expect("valid heading regex"));

static BOLD_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\*\*(.*)$").expect("valid bold heading regex"));

static FIELD_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:#{1,6}\s+|\*\*)\s*(?:\*\*)?\s*(?i:field\s+)?\d+[.):]?\s*.*[A-Za-z][A-Za-z0-9_]*__c\b")
        .expect("valid field header regex")
});

static NON_FIELD_CONTEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)validation|workflow|dashboard|layout|report|flow|process\s+builder|trigger|apex|automation|lightning|permission|security|sharing|record\s+type",
    )
    .expect("valid context regex")
});

static FALLBACK_INDICATORS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)^\s*(?:[-*+]\s+)?\**\s*API\s+Name\s*\**\s*:\s*\**.*__c\b")
            .expect("valid api name regex"),
        Regex::new(r"(?i)^\s*(?:[-*+]\s+)?\**\s*Field\s+Label\s*\**\s*:")
            .expect("valid field label regex"),
        Regex::new(r"(?i)^\s*(?:[-*+]\s+)?\**\s*Data\s+Type\s*\**\s*:")
            .expect("valid data type regex"),
    ]
});

/// Non-field section headings, checked in order
const SECTION_KEYWORDS: &[(&str, &str)] = &[
    ("validation rules", r"validation\s+rules?"),
    ("page layouts", r"page\s+layouts?"),
    ("record types", r"record\s+types?"),
    ("workflows", r"workflows?"),
    ("process builder", r"process\s+builders?"),
    ("flows", r"flows?"),
    ("apex", r"apex"),
    ("lightning", r"lightning"),
    ("reports", r"reports?"),
    ("dashboards", r"dashboards?"),
    ("integration", r"integrations?"),
    ("security", r"security"),
    ("sharing", r"sharing"),
    ("permissions", r"permissions?"),
    ("best practices", r"best\s+practices?"),
    ("success metrics", r"success\s+metrics?"),
    ("training", r"training"),
    ("maintenance", r"maintenance"),
    ("support", r"support"),
    ("summary", r"summary"),
    ("related lists", r"related\s+lists?"),
    ("mobile layout", r"mobile\s+layouts?"),
    ("deployment", r"deployment"),
    ("testing", r"testing"),
];

struct SectionPattern {
    name: &'static str,
    regex: Regex,
}

static SECTION_HEADINGS: Lazy<Vec<SectionPattern>> = Lazy::new(|| {
    SECTION_KEYWORDS
        .iter()
        .map(|&(name, keyword)| SectionPattern {
            name,
            regex: Regex::new(&format!(
                r"(?i)^\s*(?:#{{1,6}}\s+|\*\*\s*)(?:\d+(?:\.\d+)*\.?\s+)?(?:\*\*)?\s*{}\b",
                keyword
            ))
            .expect("valid section heading regex"),
        })
        .collect()
});

/// Truncate trailing non-field sections
///
/// Always returns a prefix of `text`. When no boundary heading is found the
/// input comes back unchanged.
pub fn cutoff(text: &str) -> &str {
    let lines: Vec<&str> = text.split('\n').collect();
    let last_field = last_field_line(&lines);
    let start = last_field.map_or(0, |index| index + GRACE_LINES);

    let mut offset = 0;
    for (index, line) in lines.iter().enumerate() {
        if index >= start {
            if let Some(name) = section_heading(line) {
                debug!(
                    "Cutoff at line {} ('{}' heading), last field line {:?}",
                    index, name, last_field
                );
                return text[..offset].trim_end();
            }
        }
        offset += line.len() + 1;
    }

    text
}

/// Count numbered field headers outside non-field contexts
pub fn count_field_headers(text: &str) -> usize {
    let lines: Vec<&str> = text.split('\n').collect();
    (0..lines.len())
        .filter(|&index| is_field_header(&lines, index))
        .count()
}

fn last_field_line(lines: &[&str]) -> Option<usize> {
    (0..lines.len())
        .rev()
        .find(|&index| is_field_header(lines, index))
        .or_else(|| {
            (0..lines.len()).rev().find(|&index| {
                FALLBACK_INDICATORS
                    .iter()
                    .any(|regex| regex.is_match(lines[index]))
            })
        })
}

fn is_field_header(lines: &[&str], index: usize) -> bool {
    let line = lines[index];
    if !FIELD_HEADER.is_match(line) {
        return false;
    }
    match heading(line) {
        Some((level, _)) => !in_non_field_context(&lines[..index], level),
        None => true,
    }
}

/// Whether the nearest stronger heading above is a non-field topic
fn in_non_field_context(preceding: &[&str], level: usize) -> bool {
    preceding
        .iter()
        .rev()
        .find_map(|line| heading(line).filter(|(parent, _)| *parent < level))
        .is_some_and(|(_, text)| NON_FIELD_CONTEXT.is_match(text))
}

fn heading(line: &str) -> Option<(usize, &str)> {
    if let Some(caps) = MARKDOWN_HEADING.captures(line) {
        let level = caps.get(1).map_or(0, |m| m.len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Some((level, text));
    }
    BOLD_HEADING
        .captures(line)
        .map(|caps| (BOLD_LEVEL, caps.get(1).map_or("", |m| m.as_str())))
}

fn section_heading(line: &str) -> Option<&'static str> {
    SECTION_HEADINGS
        .iter()
        .find(|pattern| pattern.regex.is_match(line))
        .map(|pattern| pattern.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filler(count: usize) -> String {
        (0..count)
            .map(|i| format!("Detail line {} about the field.\n", i))
            .collect()
    }

    #[test]
    fn test_truncates_after_grace_buffer() {
        let text = format!(
            "# Patient Object\n## 1. Patient_Name__c\n{}## Validation Rules\nRule text",
            filler(20)
        );
        let result = cutoff(&text);
        assert!(result.contains("Patient_Name__c"));
        assert!(!result.contains("Validation"));
        assert!(text.starts_with(result));
    }

    #[test]
    fn test_heading_inside_grace_buffer_is_kept() {
        let text = "## 1. Patient_Name__c\nType: Text\n## Summary\nShort summary.";
        assert_eq!(cutoff(text), text);
    }

    #[test]
    fn test_numbered_section_heading() {
        let text = format!("### 1. Status__c\n{}## 7.2 Security Model\nProfiles", filler(16));
        assert!(!cutoff(&text).contains("Security Model"));
    }

    #[test]
    fn test_bold_section_heading() {
        let text = format!("### 1. Status__c\n{}**Deployment Plan**\nSteps", filler(16));
        assert!(!cutoff(&text).contains("Deployment"));
    }

    #[test]
    fn test_headers_in_validation_context_are_skipped() {
        let text = format!(
            "## Fields\n### 1. Status__c\n{}## Validation Rules\n### 1. Status__c must be set\n{}",
            filler(16),
            filler(3)
        );
        let result = cutoff(&text);
        assert!(result.ends_with("Detail line 15 about the field."));
    }

    #[test]
    fn test_fallback_indicators() {
        let text = format!(
            "Patient\n- **API Name:** Patient_Name__c\n- Data Type: Text\n{}## Page Layouts\nLayout text",
            filler(20)
        );
        let result = cutoff(&text);
        assert!(result.contains("Data Type"));
        assert!(!result.contains("Page Layouts"));
    }

    #[test]
    fn test_no_fields_scans_from_start() {
        let text = "Intro\n## Reports\nQuarterly numbers";
        assert_eq!(cutoff(text), "Intro");
    }

    #[test]
    fn test_no_boundary_returns_input() {
        let text = format!("## 1. Status__c\n{}", filler(30));
        assert_eq!(cutoff(&text), text);
    }

    #[test]
    fn test_keyword_must_open_heading() {
        let text = format!("## 1. Status__c\n{}## Field Summary Table\nmore", filler(20));
        assert_eq!(cutoff(&text), text);
    }

    #[test]
    fn test_count_field_headers() {
        let text = "## 1. Name__c\n## Field 2: Status__c\n**3) Owner__c**\n## Flows\n### 1. Update Status__c\n## Body";
        assert_eq!(count_field_headers(text), 3);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading("### Fields"), Some((3, "Fields")));
        assert_eq!(heading("**Fields**"), Some((BOLD_LEVEL, "Fields**")));
        assert_eq!(heading("Fields"), None);
    }

    proptest! {
        /// Property: cutoff returns a prefix and never grows its input
        #[test]
        fn test_cutoff_is_prefix(
            lines in proptest::collection::vec(
                prop_oneof![
                    Just("## 1. Status__c".to_string()),
                    Just("## Summary".to_string()),
                    Just("**Testing**".to_string()),
                    Just("API Name: Owner__c".to_string()),
                    "[a-z :]{0,20}",
                ],
                0..60,
            )
        ) {
            let text = lines.join("\n");
            let result = cutoff(&text);
            prop_assert!(result.len() <= text.len());
            prop_assert!(text.starts_with(result));
        }
    }
}
