//! CLI command definitions and argument parsing.

use crate::config::API_KEY_ENV;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fieldsmith - compile custom field definitions to metadata XML.
#[derive(Debug, Parser)]
#[command(name = "fieldsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log pipeline progress at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API key for the generation service
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a field document to one XML file per field
    Compile(CompileArgs),

    /// List the fields of a field document
    List(FieldsArgs),

    /// Report range issues in a field document
    Check(FieldsArgs),

    /// Print the reduced text of a requirements document
    Reduce(DocumentArgs),

    /// Print the generation prompt for a requirements document
    Prompt(PromptArgs),

    /// Generate fields from a requirements document
    Generate(GenerateArgs),
}

/// Arguments for the compile command.
#[derive(Debug, Parser)]
pub struct CompileArgs {
    /// Field document (JSON)
    pub input: PathBuf,

    /// Directory for the .field-meta.xml files
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Print the XML documents instead of writing files
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,
}

/// Arguments for commands reading a field document.
#[derive(Debug, Parser)]
pub struct FieldsArgs {
    /// Field document (JSON)
    pub input: PathBuf,
}

/// Arguments for commands reading a requirements document.
#[derive(Debug, Parser)]
pub struct DocumentArgs {
    /// Requirements document (.txt, .md or .docx)
    pub input: PathBuf,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Requirements document (.txt, .md or .docx)
    pub input: PathBuf,

    /// Object name to use when the document names none
    #[arg(long)]
    pub object: Option<String>,
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Requirements document (.txt, .md or .docx)
    pub input: PathBuf,

    /// Object name to use when the response names none
    #[arg(long)]
    pub object: Option<String>,

    /// Generation service endpoint (overrides the config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Write the generated field document here
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Also compile the generated fields into this directory
    #[arg(long)]
    pub xml_dir: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_command() {
        let cli = Cli::parse_from(["fieldsmith", "compile", "fields.json", "--out", "xml"]);
        match cli.command {
            Command::Compile(args) => {
                assert_eq!(args.input, PathBuf::from("fields.json"));
                assert_eq!(args.out, PathBuf::from("xml"));
                assert!(!args.stdout);
            }
            _ => panic!("Expected Compile command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["fieldsmith", "list", "fields.json", "--format", "json", "-v"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn test_generate_command() {
        let cli = Cli::parse_from([
            "fieldsmith",
            "generate",
            "intake.docx",
            "--object",
            "Patient__c",
            "--xml-dir",
            "out",
        ]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.object.as_deref(), Some("Patient__c"));
                assert_eq!(args.xml_dir, Some(PathBuf::from("out")));
                assert!(args.out.is_none());
                assert!(args.endpoint.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_stdout_conflicts_with_out() {
        let result = Cli::try_parse_from([
            "fieldsmith", "compile", "fields.json", "--out", "xml", "--stdout",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Json.into();
        assert_eq!(format, crate::config::OutputFormat::Json);
    }
}
