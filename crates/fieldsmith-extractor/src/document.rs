//! Document intake
//!
//! Plain text and Markdown are read as UTF-8. Word documents are unpacked
//! and their paragraph text recovered, with heading styles rewritten as `#`
//! markers so the heading heuristics still see them.

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

/// Accepted input document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.txt`, `.text`
    PlainText,
    /// `.md`, `.markdown`
    Markdown,
    /// `.docx`
    Docx,
}

impl DocumentFormat {
    /// Format for a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(DocumentFormat::PlainText),
            "md" | "markdown" => Some(DocumentFormat::Markdown),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    /// Format for a path, from its extension
    pub fn from_path(path: &Path) -> Result<Self, ExtractorError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(extension).ok_or_else(|| {
            ExtractorError::UnsupportedInput(format!(
                "unsupported document type '{}' (expected txt, md or docx)",
                path.display()
            ))
        })
    }

    /// Whether text has to be recovered from a container
    pub fn is_binary(&self) -> bool {
        matches!(self, DocumentFormat::Docx)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::PlainText => "plain text",
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Docx => "docx",
        };
        f.write_str(name)
    }
}

/// Read a document from disk and return its text
///
/// Format and size are checked before the file contents are read.
pub fn read_document(path: &Path, config: &ExtractorConfig) -> Result<String, ExtractorError> {
    let format = DocumentFormat::from_path(path)?;

    let metadata = fs::metadata(path).map_err(|e| {
        ExtractorError::ExtractionFailure(format!("cannot read {}: {}", path.display(), e))
    })?;
    check_size(metadata.len(), config.max_document_bytes)?;

    let bytes = fs::read(path).map_err(|e| {
        ExtractorError::ExtractionFailure(format!("cannot read {}: {}", path.display(), e))
    })?;
    info!(
        "Read {} document {} ({} bytes)",
        format,
        path.display(),
        bytes.len()
    );

    document_text(&bytes, format, config.max_document_bytes)
}

/// Recover the text of an in-memory document
pub fn document_text(
    bytes: &[u8],
    format: DocumentFormat,
    max_bytes: usize,
) -> Result<String, ExtractorError> {
    check_size(bytes.len() as u64, max_bytes)?;

    let text = match format {
        DocumentFormat::PlainText | DocumentFormat::Markdown => String::from_utf8(bytes.to_vec())
            .map_err(|e| {
                ExtractorError::ExtractionFailure(format!("document is not valid UTF-8: {}", e))
            })?,
        DocumentFormat::Docx => docx_text(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractorError::ExtractionFailure(
            "document contains no text".to_string(),
        ));
    }

    debug!("Recovered {} chars of {} text", text.chars().count(), format);
    Ok(text)
}

fn check_size(len: u64, max_bytes: usize) -> Result<(), ExtractorError> {
    if len > max_bytes as u64 {
        return Err(ExtractorError::UnsupportedInput(format!(
            "document is {} bytes (max: {})",
            len, max_bytes
        )));
    }
    Ok(())
}

fn docx_text(bytes: &[u8]) -> Result<String, ExtractorError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ExtractorError::ExtractionFailure(format!("not a valid docx container: {}", e))
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractorError::ExtractionFailure(format!("missing word/document.xml: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| {
            ExtractorError::ExtractionFailure(format!("cannot read word/document.xml: {}", e))
        })?;

    document_xml_text(&xml)
}

/// Paragraph text of a WordprocessingML body, one line per paragraph
fn document_xml_text(xml: &str) -> Result<String, ExtractorError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut out = String::new();
    let mut paragraph = String::new();
    let mut heading_level: Option<usize> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph.clear();
                    heading_level = None;
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => paragraph.push('\t'),
                b"w:br" | b"w:cr" => paragraph.push('\n'),
                b"w:pStyle" => heading_level = heading_style_level(&e),
                b"w:p" => {
                    heading_level = None;
                    out.push('\n');
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| {
                    ExtractorError::ExtractionFailure(format!("invalid text in document: {}", err))
                })?;
                paragraph.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(level) = heading_level.take() {
                        out.push_str(&"#".repeat(level));
                        out.push(' ');
                    }
                    out.push_str(&paragraph);
                    out.push('\n');
                    paragraph.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractorError::ExtractionFailure(format!(
                    "invalid document XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

/// `HeadingN` paragraph style to heading level
fn heading_style_level(element: &BytesStart) -> Option<usize> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"w:val")
        .and_then(|attr| {
            let style = String::from_utf8_lossy(&attr.value).to_string();
            style
                .strip_prefix("Heading")
                .and_then(|level| level.parse::<usize>().ok())
        })
        .filter(|level| (1..=6).contains(level))
}
