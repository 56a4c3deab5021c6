//! Document operations client module.
//!
//! This module provides the client interface for the privaseek document
//! services: parsing, sensitive-data detection, and redaction.

mod parts;
mod ps_client;
mod ps_config;
mod ps_credentials;

pub use parts::{TEXT_STREAM_FILE_NAME, TEXT_STREAM_MIME};
pub use ps_client::PsClient;
pub use ps_config::{PsConfig, PsConfigBuilder};
pub use ps_credentials::{PsCredentials, SessionKeyProvider};
