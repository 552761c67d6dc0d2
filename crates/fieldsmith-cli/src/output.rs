//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use fieldsmith_domain::{FieldIssue, FieldSpec};
use fieldsmith_extractor::ReductionStats;
use std::path::PathBuf;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a field list.
    pub fn format_fields(&self, fields: &[FieldSpec]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = fields
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "apiName": f.api_name,
                            "label": f.label,
                            "type": f.field_type().as_str(),
                            "required": f.required,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                if fields.is_empty() {
                    return Ok(self.colorize("No fields found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["API Name", "Label", "Type", "Required"]);
                for field in fields {
                    builder.push_record([
                        field.api_name.as_str(),
                        field.label.as_str(),
                        field.field_type().as_str(),
                        if field.required { "yes" } else { "" },
                    ]);
                }
                Ok(self.finish_table(builder))
            }
        }
    }

    /// Format check findings, one entry per field with issues.
    pub fn format_issues(&self, report: &[(String, Vec<FieldIssue>)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = report
                    .iter()
                    .map(|(api_name, issues)| {
                        let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
                        serde_json::json!({ "apiName": api_name, "issues": issues })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Table => {
                if report.is_empty() {
                    return Ok(self.success("No issues found"));
                }

                let mut builder = Builder::default();
                builder.push_record(["API Name", "Issue"]);
                for (api_name, issues) in report {
                    for issue in issues {
                        builder.push_record([api_name.clone(), issue.to_string()]);
                    }
                }
                Ok(self.finish_table(builder))
            }
        }
    }

    /// Format reduction statistics.
    pub fn format_stats(&self, stats: &ReductionStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Stage", "Characters"]);
                builder.push_record(["original".to_string(), stats.original_chars.to_string()]);
                builder.push_record(["normalized".to_string(), stats.normalized_chars.to_string()]);
                builder.push_record(["cutoff".to_string(), stats.cutoff_chars.to_string()]);
                builder.push_record(["extracted".to_string(), stats.extracted_chars.to_string()]);
                let mut table = self.finish_table(builder);
                table.push('\n');
                table.push_str(&self.info(&format!(
                    "{} field headers, {:.0}% removed",
                    stats.field_headers,
                    stats.removed_ratio() * 100.0
                )));
                Ok(table)
            }
        }
    }

    /// Format the list of written files.
    pub fn written_files(&self, paths: &[PathBuf]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                Ok(serde_json::to_string_pretty(&paths)?)
            }
            OutputFormat::Table => {
                let mut lines = vec![self.success(&format!("Wrote {} file(s)", paths.len()))];
                lines.extend(paths.iter().map(|p| format!("  {}", p.display())));
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn finish_table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsmith_domain::FieldType;

    fn fields() -> Vec<FieldSpec> {
        let mut name = FieldSpec::new("Patient_Name__c", "Patient Name", FieldType::Text);
        name.required = true;
        vec![
            name,
            FieldSpec::new("Admitted__c", "Admitted", FieldType::Date),
        ]
    }

    #[test]
    fn test_fields_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_fields(&fields()).unwrap();
        assert!(output.contains("API Name"));
        assert!(output.contains("Patient_Name__c"));
        assert!(output.contains("Date"));
    }

    #[test]
    fn test_fields_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_fields(&fields()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["apiName"], "Patient_Name__c");
        assert_eq!(value[0]["required"], true);
        assert_eq!(value[1]["type"], "Date");
    }

    #[test]
    fn test_empty_fields() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_fields(&[]).unwrap();
        assert!(output.contains("No fields found"));
    }

    #[test]
    fn test_issues() {
        let report = vec![(
            "Status".to_string(),
            vec![FieldIssue::MissingSuffix("Status".to_string()), FieldIssue::EmptyPicklist],
        )];

        let table = Formatter::new(OutputFormat::Table, false)
            .format_issues(&report)
            .unwrap();
        assert!(table.matches("Status").count() >= 2);

        let json = Formatter::new(OutputFormat::Json, false)
            .format_issues(&report)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["issues"].as_array().unwrap().len(), 2);

        let clean = Formatter::new(OutputFormat::Table, false)
            .format_issues(&[])
            .unwrap();
        assert_eq!(clean, "✓ No issues found");
    }

    #[test]
    fn test_stats_json() {
        let stats = ReductionStats {
            original_chars: 100,
            normalized_chars: 98,
            cutoff_chars: 60,
            extracted_chars: 50,
            field_headers: 3,
        };
        let formatter = Formatter::new(OutputFormat::Json, false);
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format_stats(&stats).unwrap()).unwrap();
        assert_eq!(value["cutoff_chars"], 60);

        let table = Formatter::new(OutputFormat::Table, false)
            .format_stats(&stats)
            .unwrap();
        assert!(table.contains("3 field headers, 50% removed"));
    }

    #[test]
    fn test_error_keeps_context_chain() {
        let err = anyhow::anyhow!("missing file").context("Failed to load configuration");
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            formatter.error(&format!("{:#}", err)),
            "✗ Failed to load configuration: missing file"
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.warning("test"), "⚠ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
