//! Session-key retrieval for request authorization.
//!
//! The session key is an injected capability rather than a stored value:
//! the client reads it from the provider on every request, so a rotated
//! session is picked up without rebuilding the client.

use std::fmt;
use std::sync::Arc;

/// Source of the current session key.
///
/// Implementations are expected to be cheap; the client calls
/// [`session_key`](Self::session_key) once per request.
pub trait SessionKeyProvider: Send + Sync {
    /// Returns the current session key, if one is available.
    fn session_key(&self) -> Option<String>;
}

impl SessionKeyProvider for String {
    fn session_key(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl SessionKeyProvider for &'static str {
    fn session_key(&self) -> Option<String> {
        Some((*self).to_owned())
    }
}

/// Adapter that turns a closure into a [`SessionKeyProvider`].
struct FnProvider<F>(F);

impl<F> SessionKeyProvider for FnProvider<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn session_key(&self) -> Option<String> {
        (self.0)()
    }
}

/// Authorization credentials for the document service.
///
/// Every request carries `Authorization: Bearer <session key>` when a
/// session source is configured.
#[derive(Clone)]
pub enum PsCredentials {
    /// Bearer authorization with the key read per request from a provider
    Session(Arc<dyn SessionKeyProvider>),

    /// No authorization (for testing/development)
    None,
}

impl PsCredentials {
    /// Create credentials backed by a session-key provider.
    pub fn session(provider: impl SessionKeyProvider + 'static) -> Self {
        Self::Session(Arc::new(provider))
    }

    /// Create credentials backed by a session-key closure.
    ///
    /// This is the usual way to wire in a live session store lookup.
    pub fn session_fn<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self::Session(Arc::new(FnProvider(f)))
    }

    /// Create credentials with a fixed bearer token.
    pub fn bearer_token(token: impl Into<String>) -> Self {
        Self::Session(Arc::new(token.into()))
    }

    /// Create credentials with no authorization.
    pub fn none() -> Self {
        Self::None
    }

    /// Read the current session key.
    pub(crate) fn current_key(&self) -> Option<String> {
        match self {
            Self::Session(provider) => provider.session_key(),
            Self::None => None,
        }
    }

    /// Get the credentials type (for debugging/logging purposes only).
    pub fn credentials_type(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::None => "none",
        }
    }
}

impl fmt::Debug for PsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material
        f.write_str(match self {
            Self::Session(_) => "PsCredentials::Session",
            Self::None => "PsCredentials::None",
        })
    }
}
