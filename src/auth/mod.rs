//! auth - bearer tokens for API requests
//!
//! The client asks a [`TokenProvider`] for a bearer token before every
//! request. Login and token refresh are handled by the CLI layer; this module
//! only supplies whatever token is currently stored.
//!
//! # Components
//!
//! - [`TokenProvider`] - Trait the client calls per request
//! - [`StaticToken`] - Fixed token, for scripts and tests
//! - [`TokenFile`] - JSON schema of the stored OAuth tokens
//! - [`FileTokenProvider`] - Reads the token file on each request
//!
//! # Security
//!
//! Tokens never appear in logs, error messages or `Debug` output.
//!
//! # Example
//!
//! ```ignore
//! use nexaa::auth::{FileTokenProvider, TokenProvider};
//! use std::sync::Arc;
//!
//! let provider: Arc<dyn TokenProvider> = Arc::new(FileTokenProvider::from_default_path()?);
//! let token = provider.bearer_token().await?;
//! ```

mod errors;
mod token_file;

pub use errors::AuthError;
pub use token_file::{FileTokenProvider, TokenFile};

use std::fmt;

/// Supplies bearer tokens to the GraphQL client.
///
/// Implementors must never log or expose token values.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the bearer token to attach to the next request.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] if no token exists
    /// - [`AuthError::Expired`] if the stored token has expired
    async fn bearer_token(&self) -> Result<String, AuthError>;

    /// Check if a usable token is available without fetching it.
    fn is_authenticated(&self) -> bool;
}

/// A fixed bearer token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken([REDACTED])")
    }
}

#[async_trait::async_trait]
impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Result<String, AuthError> {
        if self.0.is_empty() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(self.0.clone())
    }

    fn is_authenticated(&self) -> bool {
        !self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_token_is_returned() {
        let provider = StaticToken::new("abc");
        assert!(provider.is_authenticated());
        assert_eq!(provider.bearer_token().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn empty_static_token_is_not_authenticated() {
        let provider = StaticToken::new("");
        assert!(!provider.is_authenticated());
        assert!(matches!(
            provider.bearer_token().await,
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn static_token_debug_is_redacted() {
        let debug = format!("{:?}", StaticToken::new("super-secret"));
        assert!(!debug.contains("super-secret"));
    }
}
