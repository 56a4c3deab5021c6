//! Document operations client implementation.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error, info};

use super::{PsConfig, PsCredentials, parts};
use crate::error::{Error, Result};
use crate::models::{CategoryFilter, Document, RedactedDocument, ReplacementSpec};
use crate::{DOCOPS_TARGET, HTTP_TARGET};

/// Endpoint for structured document parsing.
const PARSE_PATH: &str = "/parse/docx";

/// Endpoint for sensitive-data detection.
const DETECT_PATH: &str = "/data";

/// Endpoint for redacted document generation.
const REDACT_PATH: &str = "/redact/docx";

/// Endpoint for the service availability probe.
const HEALTH_PATH: &str = "/health";

/// Form field carrying the uploaded file or text blob.
const STREAM_FIELD: &str = "stream";

/// Form field carrying the category filter on the detection endpoint.
const CATEGORIES_FIELD: &str = "categories";

/// Form field carrying the JSON replacement spec on the redaction endpoint.
const DATA_FIELD: &str = "data";

/// HTTP client for the privaseek document services.
///
/// Translates the three document operations into multipart requests against
/// the backend. Each operation is a single request/response exchange; the
/// client is stateless between calls and may be shared across tasks (it is
/// cheap to clone).
///
/// # Examples
///
/// ```ignore
/// use privaseek_docops::{Document, PsClient, PsConfig, PsCredentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), privaseek_docops::Error> {
///     let config = PsConfig::new("https://api.privaseek.dev")?;
///     let credentials = PsCredentials::session_fn(|| session_store::current_key());
///     let client = PsClient::new(config, credentials)?;
///
///     let document = Document::from_path("contract.docx").await?;
///     let structure = client.parse_document(&document).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PsClient {
    /// HTTP client
    http_client: HttpClient,

    /// Configuration
    config: PsConfig,

    /// Session-key source, read per request
    credentials: PsCredentials,
}

impl PsClient {
    /// Create a new client with the given configuration and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration carries invalid header names
    /// or the HTTP client cannot be built.
    pub fn new(config: PsConfig, credentials: PsCredentials) -> Result<Self> {
        let mut client_builder = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .danger_accept_invalid_certs(!config.verify_ssl());

        let mut headers = reqwest::header::HeaderMap::new();
        for (key, value) in config.custom_headers() {
            let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::config(format!("Invalid header name '{}': {}", key, e)))?;
            let header_value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("Invalid header value '{}': {}", value, e)))?;
            headers.insert(header_name, header_value);
        }

        if !headers.is_empty() {
            client_builder = client_builder.default_headers(headers);
        }

        let http_client = client_builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(
            target: DOCOPS_TARGET,
            base_url = %config.base_url(),
            timeout = ?config.timeout(),
            credentials = credentials.credentials_type(),
            "Document operations client initialized"
        );

        Ok(Self {
            http_client,
            config,
            credentials,
        })
    }

    /// Create a new client with default configuration.
    pub fn with_defaults(
        base_url: impl AsRef<str>,
        credentials: PsCredentials,
    ) -> Result<Self> {
        Self::new(PsConfig::new(base_url)?, credentials)
    }

    /// Get a reference to the client configuration.
    pub fn config(&self) -> &PsConfig {
        &self.config
    }

    /// Parse a document into its structure.
    ///
    /// Uploads the binary document as a single `stream` form field and
    /// returns the backend's JSON description of the document structure.
    /// Whether the file type is supported is validated server-side.
    pub async fn parse_document(&self, document: &Document) -> Result<Value> {
        info!(
            target: DOCOPS_TARGET,
            file_name = document.file_name(),
            size = document.len(),
            "Parsing document"
        );

        let form = Form::new().part(STREAM_FIELD, parts::document_part(document)?);

        let response = self
            .request(Method::POST, PARSE_PATH)?
            .multipart(form)
            .send()
            .await?;

        self.handle_json_response(response).await
    }

    /// Detect sensitive data in raw text.
    ///
    /// The text travels as a synthetic markdown file (the backend ingests
    /// everything through file uploads) with the category filter as a
    /// sibling `categories` form field. Returns the backend's JSON
    /// description of the detected spans and their categories.
    pub async fn detect_sensitive_data(
        &self,
        text: &str,
        categories: &CategoryFilter,
    ) -> Result<Value> {
        info!(
            target: DOCOPS_TARGET,
            text_length = text.len(),
            categories = %categories,
            "Detecting sensitive data"
        );

        let form = Form::new()
            .part(STREAM_FIELD, parts::markdown_text_part(text)?)
            .text(CATEGORIES_FIELD, categories.as_str().to_owned());

        let response = self
            .request(Method::POST, DETECT_PATH)?
            .multipart(form)
            .send()
            .await?;

        self.handle_json_response(response).await
    }

    /// Request a redacted replacement document.
    ///
    /// Uploads the document together with the JSON-serialized replacement
    /// specification (normalized to the structured list shape) and returns
    /// the redacted file as raw bytes. A JSON response body is treated as
    /// an error payload rather than a downloadable file.
    pub async fn redact_document(
        &self,
        document: &Document,
        spec: &ReplacementSpec,
    ) -> Result<RedactedDocument> {
        let data = spec.to_json()?;

        info!(
            target: DOCOPS_TARGET,
            file_name = document.file_name(),
            size = document.len(),
            replacements = spec.replacements().len(),
            "Redacting document"
        );

        let form = Form::new()
            .part(STREAM_FIELD, parts::document_part(document)?)
            .text(DATA_FIELD, data);

        let response = self
            .request(Method::POST, REDACT_PATH)?
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        debug!(
            target: HTTP_TARGET,
            status = status.as_u16(),
            "Received redaction response"
        );

        if !status.is_success() {
            return Err(self.api_error(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        // A JSON body here is an error report, never a document
        if content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
        {
            let body = response.text().await.ok();
            error!(
                target: HTTP_TARGET,
                "Redaction endpoint returned JSON instead of a document"
            );
            return Err(Error::invalid_response(
                "Redaction endpoint returned JSON instead of a document",
                body,
            ));
        }

        let content = response.bytes().await?;

        info!(
            target: DOCOPS_TARGET,
            size = content.len(),
            content_type = content_type.as_deref().unwrap_or("unknown"),
            "Received redacted document"
        );

        Ok(RedactedDocument::new(content, content_type))
    }

    /// Health check for the document service.
    pub async fn health_check(&self) -> Result<()> {
        debug!(target: HTTP_TARGET, "Performing health check");

        let response = self.request(Method::GET, HEALTH_PATH)?.send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.api_error(response).await)
        }
    }

    /// Create a request builder for a path under the base URL, with the
    /// current session key attached as a bearer authorization.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .config
            .base_url()
            .join(path)
            .map_err(|e| Error::config(format!("Invalid request URL '{}': {}", path, e)))?;

        let mut request = self.http_client.request(method, url);

        // The key is read per request so session rotation is picked up
        if let Some(key) = self.credentials.current_key() {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        Ok(request)
    }

    /// Handle a response from a JSON endpoint.
    async fn handle_json_response(&self, response: Response) -> Result<Value> {
        let status = response.status();
        debug!(
            target: HTTP_TARGET,
            status = status.as_u16(),
            "Received response"
        );

        if status.is_success() {
            response.json().await.map_err(|e| {
                Error::invalid_response(format!("Failed to parse response body: {}", e), None)
            })
        } else {
            Err(self.api_error(response).await)
        }
    }

    /// Convert an HTTP error response into an [`Error::Api`], carrying the
    /// status and whatever body was received.
    async fn api_error(&self, response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.ok().filter(|b| !b.is_empty());

        error!(
            target: HTTP_TARGET,
            status = status.as_u16(),
            "Request failed"
        );

        Error::api(
            status.as_u16(),
            status.canonical_reason().unwrap_or("HTTP error"),
            body,
        )
    }
}
