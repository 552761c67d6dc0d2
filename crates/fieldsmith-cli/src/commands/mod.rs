//! Command implementations.

pub mod check;
pub mod compile;
pub mod generate;
pub mod list;
pub mod prompt;
pub mod reduce;

pub use self::check::execute_check;
pub use self::compile::execute_compile;
pub use self::generate::execute_generate;
pub use self::list::execute_list;
pub use self::prompt::execute_prompt;
pub use self::reduce::execute_reduce;

use crate::error::{CliError, Result};
use fieldsmith_extractor::{import_document, ImportDocument};
use std::fs;
use std::path::Path;

/// Read and validate a field document.
pub(crate) fn read_field_document(path: &Path) -> Result<ImportDocument> {
    let json = fs::read_to_string(path).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    Ok(import_document(&json)?)
}
