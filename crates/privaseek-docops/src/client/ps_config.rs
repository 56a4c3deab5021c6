//! Configuration for the document operations client.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Configuration for the document operations client.
///
/// Holds the transport-level settings: where the backend lives and how
/// requests are dispatched. Session keys are supplied separately through
/// [`PsCredentials`](super::PsCredentials).
///
/// # Examples
///
/// ```ignore
/// use privaseek_docops::PsConfig;
/// use std::time::Duration;
///
/// // Basic configuration
/// let config = PsConfig::new("https://api.privaseek.dev")?;
///
/// // Advanced configuration
/// let config = PsConfig::builder()
///     .base_url("https://api.privaseek.dev")
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct PsConfig {
    /// Base URL of the document service
    base_url: Url,

    /// Request timeout duration
    timeout: Duration,

    /// User agent string for HTTP requests
    user_agent: String,

    /// Whether to verify SSL certificates
    verify_ssl: bool,

    /// Custom HTTP headers to include in all requests
    custom_headers: Vec<(String, String)>,
}

impl PsConfig {
    /// Create a new configuration with the given base URL and default
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(|e| {
            Error::config(format!("Invalid base URL '{}': {}", base_url.as_ref(), e))
        })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(30),
            user_agent: format!("privaseek-docops/{}", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            custom_headers: Vec::new(),
        })
    }

    /// Create a new configuration builder.
    pub fn builder() -> PsConfigBuilder {
        PsConfigBuilder::default()
    }

    /// Get the base URL of the document service.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the user agent string.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get whether SSL verification is enabled.
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Get custom headers.
    pub fn custom_headers(&self) -> &[(String, String)] {
        &self.custom_headers
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set whether to verify SSL certificates.
    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Add a custom header to all requests.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((key.into(), value.into()));
        self
    }
}

/// Builder for [`PsConfig`].
///
/// Provides a fluent interface for constructing client configuration.
#[derive(Debug, Default)]
pub struct PsConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    verify_ssl: Option<bool>,
    custom_headers: Vec<(String, String)>,
}

impl PsConfigBuilder {
    /// Set the base URL of the document service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set whether to verify SSL certificates.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((key.into(), value.into()));
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not set or is invalid.
    pub fn build(self) -> Result<PsConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::config("Base URL is required"))?;

        let mut config = PsConfig::new(base_url)?;

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent);
        }

        if let Some(verify_ssl) = self.verify_ssl {
            config = config.with_verify_ssl(verify_ssl);
        }

        for (key, value) in self.custom_headers {
            config = config.with_header(key, value);
        }

        Ok(config)
    }
}
