#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # privaseek-docops
//!
//! A client for the privaseek document-processing backend. It covers the
//! document submission and redaction workflow:
//!
//! - **Parse**: upload a binary document and receive its structure as JSON
//! - **Detect**: submit raw text and receive detected sensitive-data spans
//! - **Redact**: upload a document plus a replacement specification and
//!   receive the redacted document back as raw bytes
//!
//! Every operation is one multipart request and one response; the client
//! holds no session state beyond the key it reads per call from the
//! injected [`SessionKeyProvider`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use privaseek_docops::{Document, PsClient, PsConfig, PsCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), privaseek_docops::Error> {
//!     let config = PsConfig::new("https://api.privaseek.dev")?;
//!     let client = PsClient::new(config, PsCredentials::bearer_token("key"))?;
//!
//!     let document = Document::new("contract.docx", std::fs::read("contract.docx")?);
//!     let structure = client.parse_document(&document).await?;
//!     println!("{structure}");
//!
//!     Ok(())
//! }
//! ```

// Tracing targets for observability
/// Logging target for document operation calls.
pub const DOCOPS_TARGET: &str = "privaseek_docops::client";

/// Logging target for HTTP requests and responses.
pub const HTTP_TARGET: &str = "privaseek_docops::http";

// Core modules
pub mod client;
pub mod models;

mod error;

pub use client::{PsClient, PsConfig, PsConfigBuilder, PsCredentials, SessionKeyProvider};
pub use error::{Error, Result};
pub use models::{CategoryFilter, Document, RedactedDocument, Replacement, ReplacementSpec};
