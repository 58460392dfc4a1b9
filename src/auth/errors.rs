//! auth::errors
//!
//! Authentication error types.
//!
//! # Design
//!
//! Error messages never contain token values. Variants carry paths or
//! underlying I/O messages only.
//!
//! # Example
//!
//! ```
//! use nexaa::auth::AuthError;
//!
//! let err = AuthError::NotAuthenticated;
//! assert!(err.needs_reauth());
//! assert!(err.to_string().contains("nexaa login"));
//! ```

use thiserror::Error;

/// Errors from supplying a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No stored token exists.
    #[error("not authenticated. Run 'nexaa login'.")]
    NotAuthenticated,

    /// The stored access token has expired.
    #[error("access token expired. Run 'nexaa login' again.")]
    Expired,

    /// The token file exists but cannot be parsed.
    #[error("invalid token file: {0}")]
    InvalidTokenFile(String),

    /// Reading or writing the token file failed.
    #[error("token file I/O error: {0}")]
    Io(String),

    /// The home directory could not be determined.
    #[error("home directory not found")]
    NoHomeDir,
}

impl AuthError {
    /// Check if this error is resolved by logging in again.
    pub fn needs_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated | AuthError::Expired | AuthError::InvalidTokenFile(_)
        )
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::InvalidTokenFile(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_reauth_classification() {
        assert!(AuthError::NotAuthenticated.needs_reauth());
        assert!(AuthError::Expired.needs_reauth());
        assert!(AuthError::InvalidTokenFile("bad".into()).needs_reauth());

        assert!(!AuthError::Io("disk full".into()).needs_reauth());
        assert!(!AuthError::NoHomeDir.needs_reauth());
    }

    #[test]
    fn expired_error_suggests_login() {
        let msg = AuthError::Expired.to_string();
        assert!(msg.contains("expired"));
        assert!(msg.contains("nexaa login"));
    }

    #[test]
    fn io_errors_convert() {
        let err: AuthError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, AuthError::Io(ref m) if m.contains("denied")));
    }
}
