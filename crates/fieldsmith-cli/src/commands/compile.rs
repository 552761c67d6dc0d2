//! Compile command implementation.

use super::read_field_document;
use crate::cli::CompileArgs;
use crate::error::Result;
use crate::output::Formatter;
use fieldsmith_metadata::{export_artifacts, write_artifacts, FieldArtifact};
use std::path::{Path, PathBuf};

/// Execute the compile command.
pub async fn execute_compile(args: CompileArgs, formatter: &Formatter) -> Result<()> {
    let document = read_field_document(&args.input)?;
    let artifacts = export_artifacts(&document.fields);

    if args.stdout {
        println!("{}", render_artifacts(&artifacts));
    } else {
        let written = compile_to_dir(&artifacts, &args.out)?;
        println!("{}", formatter.written_files(&written)?);
    }
    Ok(())
}

/// Write artifacts, refusing an empty set.
pub fn compile_to_dir(artifacts: &[FieldArtifact], dir: &Path) -> Result<Vec<PathBuf>> {
    if artifacts.is_empty() {
        return Err(crate::error::CliError::InvalidInput(
            "The field document has no fields".to_string(),
        ));
    }
    Ok(write_artifacts(dir, artifacts)?)
}

/// All documents, each preceded by its file name.
fn render_artifacts(artifacts: &[FieldArtifact]) -> String {
    artifacts
        .iter()
        .map(|artifact| format!("<!-- {} -->\n{}", artifact.file_name, artifact.contents))
        .collect::<Vec<_>>()
        .join("\n")
}
