//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use fieldsmith_domain::traits::GenerationProvider;
use fieldsmith_extractor::{
    export_document, read_document, FieldGenerator, GenerationOutcome, GenerationRequest,
};
use fieldsmith_llm::HttpProvider;
use fieldsmith_metadata::{export_artifacts, write_artifacts};
use std::fmt::Display;
use std::fs;
use tracing::info;

/// Execute the generate command against the configured HTTP service.
pub async fn execute_generate(
    args: GenerateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.generation.endpoint.clone());
    let mut provider = HttpProvider::with_timeout(endpoint, config.generation.timeout())?;
    if let Some(key) = &config.generation.api_key {
        provider = provider.with_api_key(key.clone());
    }
    info!("Using generation service at {}", provider.endpoint());

    let outcome = generate_with(provider, &args, config, formatter).await?;
    if args.out.is_none() && args.xml_dir.is_none() {
        println!(
            "{}",
            export_document(Some(&outcome.object_name), &outcome.fields)?
        );
    } else {
        println!("{}", formatter.format_fields(&outcome.fields)?);
    }
    Ok(())
}

/// Run the pipeline with any provider and write the requested outputs.
pub async fn generate_with<P>(
    provider: P,
    args: &GenerateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<GenerationOutcome>
where
    P: GenerationProvider,
    P::Error: Display,
{
    let raw = read_document(&args.input, &config.extractor)?;
    let generator = FieldGenerator::new(provider, config.extractor.clone())?;

    let mut request = GenerationRequest::from_document(raw);
    if let Some(object) = &args.object {
        request = request.with_object_name(object.clone());
    }
    let outcome = generator.generate(request).await?;

    for warning in &outcome.warnings {
        eprintln!("{}", formatter.warning(&warning.to_string()));
    }

    if let Some(path) = &args.out {
        let json = export_document(Some(&outcome.object_name), &outcome.fields)?;
        fs::write(path, json)?;
        eprintln!(
            "{}",
            formatter.success(&format!(
                "Wrote {} fields to {}",
                outcome.fields.len(),
                path.display()
            ))
        );
    }

    if let Some(dir) = &args.xml_dir {
        let written = write_artifacts(dir, &export_artifacts(&outcome.fields))?;
        eprintln!("{}", formatter.written_files(&written)?);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use fieldsmith_extractor::{import_document, ExtractorError};
    use fieldsmith_llm::MockProvider;
    use std::path::Path;
    use tempfile::TempDir;

    const RESPONSE: &str = r#"{"objectName": "Patient__c", "fields": [
        {"apiName": "Patient_Name__c", "label": "Patient Name", "type": "Text", "length": 80},
        {"apiName": "Status__c", "label": "Status", "type": "Picklist",
         "picklistValues": [{"fullName": "New", "default": true}, {"fullName": "Closed"}]}
    ]}"#;

    fn args(dir: &Path) -> GenerateArgs {
        let input = dir.join("intake.md");
        fs::write(
            &input,
            "## 1. Patient_Name__c\n- Type: Text(80)\n## 2. Status__c\n- Type: Picklist\n",
        )
        .unwrap();
        GenerateArgs {
            input,
            object: None,
            endpoint: None,
            out: Some(dir.join("fields.json")),
            xml_dir: Some(dir.join("xml")),
        }
    }

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Table, false)
    }

    #[tokio::test]
    async fn test_generate_writes_json_and_xml() {
        let dir = TempDir::new().unwrap();
        let args = args(dir.path());

        let outcome = generate_with(MockProvider::new(RESPONSE), &args, &Config::default(), &formatter())
            .await
            .unwrap();
        assert_eq!(outcome.object_name, "Patient__c");
        assert!(outcome.warnings.is_empty());

        let json = fs::read_to_string(dir.path().join("fields.json")).unwrap();
        let document = import_document(&json).unwrap();
        assert_eq!(document.object_name.as_deref(), Some("Patient__c"));
        assert_eq!(document.fields, outcome.fields);

        let xml = fs::read_to_string(dir.path().join("xml").join("Status__c.field-meta.xml")).unwrap();
        assert!(xml.contains("<fullName>New</fullName>"));
    }

    #[tokio::test]
    async fn test_generate_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let args = args(dir.path());

        let err = generate_with(
            MockProvider::failing("unavailable"),
            &args,
            &Config::default(),
            &formatter(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Extractor(ExtractorError::ServiceFailure(_))
        ));
        assert!(!dir.path().join("fields.json").exists());
        assert!(!dir.path().join("xml").exists());
    }

    #[tokio::test]
    async fn test_unsupported_document_rejected() {
        let dir = TempDir::new().unwrap();
        let mut args = args(dir.path());
        args.input = dir.path().join("intake.pdf");
        fs::write(&args.input, "%PDF").unwrap();

        let provider = MockProvider::default();
        let err = generate_with(provider.clone(), &args, &Config::default(), &formatter())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Extractor(ExtractorError::UnsupportedInput(_))
        ));
        assert_eq!(provider.call_count(), 0);
    }
}
