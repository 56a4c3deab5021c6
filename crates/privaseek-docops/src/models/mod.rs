//! Data types for document submission and redaction.
//!
//! Everything here is request-scoped: a [`Document`] or [`ReplacementSpec`]
//! exists for the duration of one call and carries no session state.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque binary document payload with its file name.
///
/// The content is never inspected client-side; whether the file type is
/// supported is decided by the backend.
///
/// # Examples
///
/// ```ignore
/// use privaseek_docops::Document;
///
/// let document = Document::new("contract.docx", bytes);
/// assert_eq!(document.file_name(), "contract.docx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name sent with the multipart part
    file_name: String,

    /// Raw document bytes
    content: Bytes,

    /// MIME type, when known
    content_type: Option<String>,
}

impl Document {
    /// Create a new document from raw bytes.
    ///
    /// The MIME type is guessed from the file name extension when possible;
    /// unknown extensions are sent without one and left for the backend to
    /// classify.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name);

        Self {
            file_name,
            content: content.into(),
            content_type,
        }
    }

    /// Read a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the path has no file
    /// name component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::invalid_input(format!("Path '{}' has no file name", path.display()))
            })?
            .to_owned();

        let content = tokio::fs::read(path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read file '{}': {}", path.display(), e),
            ))
        })?;

        Ok(Self::new(file_name, content))
    }

    /// Override the MIME type sent with the document.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Get the file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the raw document bytes.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Get the MIME type, if known.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the size of the document in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Guess a MIME type from a file name extension.
///
/// Covers the Office and text formats the backend ingests; anything else is
/// sent untyped.
fn guess_content_type(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name).extension().and_then(|e| e.to_str())?;

    let mime_type = match extension.to_lowercase().as_str() {
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "odt" => "application/vnd.oasis.opendocument.text",
        "rtf" => "application/rtf",
        "pdf" => "application/pdf",
        "md" => "text/markdown",
        "txt" => "text/plain",
        _ => return None,
    };

    Some(mime_type.to_string())
}

/// Selects which sensitive-data categories the backend should detect.
///
/// The value is passed through as an opaque request field and never
/// interpreted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryFilter(String);

impl CategoryFilter {
    /// Create a filter from a single category identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Create a filter from a set of category identifiers.
    ///
    /// Identifiers are joined with commas, which is the backend's list
    /// encoding for this field.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = ids
            .into_iter()
            .map(|id| id.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(",");

        Self(joined)
    }

    /// Get the filter value as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One redaction: the text to find and the text to substitute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Text to search for in the document
    pub find: String,

    /// Text that replaces every occurrence
    pub replace: String,
}

impl Replacement {
    /// Create a new replacement pair.
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

/// A replacement specification for the redaction endpoint.
///
/// Two shapes exist across backend revisions: the canonical structured list
/// and a legacy single pattern/replacement pair. Both deserialize; the
/// client always normalizes to the structured list before serializing, and
/// the legacy shape is never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplacementSpec {
    /// Canonical structured list of replacements.
    List(Vec<Replacement>),

    /// Legacy pattern/replacement pair (deprecated input shape).
    Pair {
        /// Text to search for
        pattern: String,
        /// Replacement text
        replacement: String,
    },
}

impl ReplacementSpec {
    /// Create a specification from a list of replacements.
    pub fn list(replacements: impl IntoIterator<Item = Replacement>) -> Self {
        Self::List(replacements.into_iter().collect())
    }

    /// Get the replacements in canonical (structured list) form.
    ///
    /// The legacy pair shape normalizes to a one-element list.
    pub fn replacements(&self) -> Vec<Replacement> {
        match self {
            Self::List(replacements) => replacements.clone(),
            Self::Pair {
                pattern,
                replacement,
            } => vec![Replacement::new(pattern, replacement)],
        }
    }

    /// Serialize the specification as the JSON string sent in the `data`
    /// form field.
    ///
    /// Always produces the structured list shape, regardless of the input
    /// variant.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.replacements())?)
    }
}

impl From<Vec<Replacement>> for ReplacementSpec {
    fn from(replacements: Vec<Replacement>) -> Self {
        Self::List(replacements)
    }
}

/// A redacted document returned by the backend as a blob response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedDocument {
    /// Raw bytes of the redacted file
    content: Bytes,

    /// Content type reported by the backend, if any
    content_type: Option<String>,
}

impl RedactedDocument {
    /// Create a redacted document from response bytes.
    pub fn new(content: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            content: content.into(),
            content_type,
        }
    }

    /// Get the raw bytes of the redacted file.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Get the content type reported by the backend.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the size of the file in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Consume the document, returning the raw bytes.
    pub fn into_content(self) -> Bytes {
        self.content
    }

    /// Write the redacted file to disk.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        tokio::fs::write(path, &self.content).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write file '{}': {}", path.display(), e),
            ))
        })
    }
}
