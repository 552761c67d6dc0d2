//! Export artifacts - one metadata file per field

use crate::compile::compile_field;
use crate::error::MetadataError;
use fieldsmith_domain::FieldSpec;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name suffix of field metadata documents
pub const FIELD_META_SUFFIX: &str = ".field-meta.xml";

/// A compiled field ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArtifact {
    /// `{apiName}.field-meta.xml`
    pub file_name: String,

    /// Compiled XML document, exactly as produced by the compiler
    pub contents: String,
}

impl FieldArtifact {
    /// Compile one field
    pub fn from_field(field: &FieldSpec) -> Self {
        Self {
            file_name: format!("{}{}", field.api_name, FIELD_META_SUFFIX),
            contents: compile_field(field),
        }
    }
}

/// Compile every field, preserving input order
pub fn export_artifacts(fields: &[FieldSpec]) -> Vec<FieldArtifact> {
    fields.iter().map(FieldArtifact::from_field).collect()
}

/// Write artifacts into a directory, creating it if needed
///
/// Returns the paths written, in artifact order.
pub fn write_artifacts(dir: &Path, artifacts: &[FieldArtifact]) -> Result<Vec<PathBuf>, MetadataError> {
    fs::create_dir_all(dir).map_err(|source| MetadataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        if artifact.file_name == FIELD_META_SUFFIX {
            return Err(MetadataError::EmptyApiName);
        }
        let path = dir.join(&artifact.file_name);
        fs::write(&path, &artifact.contents).map_err(|source| MetadataError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    info!("Wrote {} field metadata files to {}", written.len(), dir.display());
    Ok(written)
}
