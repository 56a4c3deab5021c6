//! Multipart protocol adapters.
//!
//! The backend ingests everything through file-upload endpoints, so raw
//! text is wrapped as a synthetic markdown file to reuse the same code
//! path. The wrapping lives here as a named adapter instead of being
//! inlined at each call site.

use reqwest::multipart::Part;

use crate::error::{Error, Result};
use crate::models::Document;

/// File name given to text submitted as a synthetic file.
pub const TEXT_STREAM_FILE_NAME: &str = "document.md";

/// Media type given to text submitted as a synthetic file.
pub const TEXT_STREAM_MIME: &str = "text/markdown";

/// Wrap raw text as a synthetic markdown file part.
///
/// The part carries the fixed file name [`TEXT_STREAM_FILE_NAME`] and media
/// type [`TEXT_STREAM_MIME`] so the file-ingestion endpoint accepts it like
/// any uploaded document.
pub fn markdown_text_part(text: impl Into<String>) -> Result<Part> {
    Part::text(text.into())
        .file_name(TEXT_STREAM_FILE_NAME)
        .mime_str(TEXT_STREAM_MIME)
        .map_err(|e| Error::config(format!("Invalid MIME type '{TEXT_STREAM_MIME}': {e}")))
}

/// Build the binary file part for a document upload.
pub fn document_part(document: &Document) -> Result<Part> {
    let mut part = Part::bytes(document.content().to_vec())
        .file_name(document.file_name().to_owned());

    if let Some(content_type) = document.content_type() {
        part = part
            .mime_str(content_type)
            .map_err(|e| Error::config(format!("Invalid MIME type '{content_type}': {e}")))?;
    }

    Ok(part)
}
