//! List command implementation.

use super::read_field_document;
use crate::cli::FieldsArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the list command.
pub async fn execute_list(args: FieldsArgs, formatter: &Formatter) -> Result<()> {
    let document = read_field_document(&args.input)?;
    if let Some(object_name) = &document.object_name {
        eprintln!("{}", formatter.info(&format!("Object: {}", object_name)));
    }
    println!("{}", formatter.format_fields(&document.fields)?);
    Ok(())
}
