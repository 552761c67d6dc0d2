//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::config::Config;
use crate::error::Result;
use fieldsmith_extractor::{read_document, reduce_document, PromptBuilder};

/// Execute the prompt command.
pub async fn execute_prompt(args: PromptArgs, config: &Config) -> Result<()> {
    let raw = read_document(&args.input, &config.extractor)?;
    println!("{}", render_prompt(&raw, args.object.as_deref(), config));
    Ok(())
}

/// Reduce a document and embed it in the generation prompt.
pub fn render_prompt(raw: &str, object: Option<&str>, config: &Config) -> String {
    let reduced = reduce_document(raw);
    PromptBuilder::new(reduced.text)
        .with_default_object_name(object.unwrap_or(&config.extractor.default_object_name))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_uses_object_fallback() {
        let config = Config::default();
        let prompt = render_prompt("## 1. Ward__c\n- Type: Text", Some("Ward__c"), &config);
        assert!(prompt.contains("## 1. Ward__c"));
        assert!(prompt.contains("set \"objectName\" to \"Ward__c\""));

        let prompt = render_prompt("## 1. Ward__c", None, &config);
        assert!(prompt.contains("set \"objectName\" to \"Custom_Object__c\""));
    }

    #[test]
    fn test_render_prompt_normalizes() {
        let prompt = render_prompt("\u{201C}Status\u{201D} field", None, &Config::default());
        assert!(prompt.contains("\"Status\" field"));
    }
}
