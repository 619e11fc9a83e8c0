//! Document loader — raw text and hyperlinks from an uploaded PDF or DOCX.
//!
//! Extraction itself is delegated: `pdf-extract` for PDF text, `lopdf` for PDF link
//! annotations, `docx-rs` for Word documents.

use std::collections::BTreeSet;

use thiserror::Error;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type '{0}'. Use PDF or DOCX.")]
    UnsupportedFormat(String),

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX: {0}")]
    Docx(String),

    #[error("Document contains no extractable text")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, DocumentError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(DocumentError::UnsupportedFormat(if extension.is_empty() {
                filename.to_string()
            } else {
                format!(".{extension}")
            })),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedDocument {
    pub raw_text: String,
    /// Deduplicated and sorted.
    pub hyperlinks: Vec<String>,
}

/// Extracts text and hyperlinks from an uploaded file.
pub fn load_document(filename: &str, bytes: &[u8]) -> Result<LoadedDocument, DocumentError> {
    let format = DocumentFormat::from_filename(filename)?;
    let (raw_text, embedded_links) = match format {
        DocumentFormat::Pdf => (pdf::extract_text(bytes)?, pdf::extract_links(bytes)),
        DocumentFormat::Docx => docx::extract(bytes)?,
    };

    if raw_text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    let hyperlinks = collect_links(embedded_links, &raw_text);
    Ok(LoadedDocument {
        raw_text,
        hyperlinks,
    })
}

/// Merges annotation links with URLs written out in the text itself.
fn collect_links(embedded: Vec<String>, raw_text: &str) -> Vec<String> {
    let mut links: BTreeSet<String> = embedded
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    links.extend(urls_in_text(raw_text));
    links.into_iter().collect()
}

fn urls_in_text(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|token| {
            token.trim_matches(|c: char| matches!(c, '(' | ')' | '<' | '>' | ',' | ';' | '"'))
        })
        .map(|token| token.trim_end_matches('.'))
        .filter(|token| {
            let lower = token.to_lowercase();
            (lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www."))
                && token.len() > "www.".len() + 2
        })
        .map(String::from)
}
