//! Check command implementation.

use super::read_field_document;
use crate::cli::FieldsArgs;
use crate::error::Result;
use crate::output::Formatter;
use fieldsmith_domain::{check_field, FieldIssue, FieldList};

/// Execute the check command.
///
/// Issues are advisory; the command succeeds whatever it finds.
pub async fn execute_check(args: FieldsArgs, formatter: &Formatter) -> Result<()> {
    let document = read_field_document(&args.input)?;
    let list = FieldList::from_fields(document.object_name, document.fields);

    for name in list.duplicate_api_names() {
        eprintln!(
            "{}",
            formatter.warning(&format!("API name '{}' is used more than once", name))
        );
    }

    let report = issue_report(&list);
    println!("{}", formatter.format_issues(&report)?);
    Ok(())
}

/// Issues per field, skipping fields without any.
pub fn issue_report(list: &FieldList) -> Vec<(String, Vec<FieldIssue>)> {
    list.fields()
        .iter()
        .filter_map(|field| {
            let issues = check_field(field);
            (!issues.is_empty()).then(|| (field.api_name.clone(), issues))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsmith_domain::{FieldSpec, FieldType};

    #[test]
    fn test_issue_report_skips_clean_fields() {
        let list = FieldList::from_fields(
            None,
            vec![
                FieldSpec::new("Name__c", "Name", FieldType::Text),
                FieldSpec::new("Status", "Status", FieldType::Picklist),
            ],
        );

        let report = issue_report(&list);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].0, "Status");
        assert!(report[0].1.contains(&FieldIssue::EmptyPicklist));
    }
}
