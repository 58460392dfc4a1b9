//! auth::token_file
//!
//! On-disk OAuth token storage.
//!
//! # Format
//!
//! The token file is JSON:
//!
//! ```json
//! {
//!   "access_token": "...",
//!   "expires_at": 1767225600,
//!   "refresh_token": "..."
//! }
//! ```
//!
//! `expires_at` is a Unix timestamp in seconds.
//!
//! # Security
//!
//! - Writes are atomic (temp file, then rename)
//! - File permissions are 0600 on Unix
//! - `Debug` output redacts both tokens

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;
use super::TokenProvider;

/// Stored OAuth tokens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFile {
    pub access_token: String,
    /// Access token expiry, Unix seconds
    pub expires_at: i64,
    pub refresh_token: String,
}

impl fmt::Debug for TokenFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenFile")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

impl TokenFile {
    /// Default location: `~/.nexaa/auth.json`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoHomeDir`] if the home directory is unknown.
    pub fn default_path() -> Result<PathBuf, AuthError> {
        let home = dirs::home_dir().ok_or(AuthError::NoHomeDir)?;
        Ok(home.join(".nexaa").join("auth.json"))
    }

    /// Read the token file at `path`.
    ///
    /// A missing file is not an error: it means nobody has logged in.
    pub fn load(path: &Path) -> Result<Option<Self>, AuthError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Read the token file at `path` without blocking the runtime.
    pub async fn load_async(path: &Path) -> Result<Option<Self>, AuthError> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the token file atomically with owner-only permissions.
    pub fn save(&self, path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            #[cfg(unix)]
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))?;

            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Access token expiry as a timestamp, `None` if out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    /// Whether the access token is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }

    /// Whether the access token is expired now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// [`TokenProvider`] backed by a token file.
///
/// The file is re-read on every request, so a login performed by another
/// process is picked up without restarting. Requests read it through
/// `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FileTokenProvider {
    path: PathBuf,
}

impl FileTokenProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provider reading [`TokenFile::default_path`].
    pub fn from_default_path() -> Result<Self, AuthError> {
        Ok(Self::new(TokenFile::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

}

fn usable(tokens: Option<TokenFile>) -> Result<TokenFile, AuthError> {
    let tokens = tokens.ok_or(AuthError::NotAuthenticated)?;
    if tokens.is_expired() {
        return Err(AuthError::Expired);
    }
    Ok(tokens)
}

#[async_trait]
impl TokenProvider for FileTokenProvider {
    async fn bearer_token(&self) -> Result<String, AuthError> {
        let tokens = TokenFile::load_async(&self.path).await?;
        usable(tokens).map(|tokens| tokens.access_token)
    }

    fn is_authenticated(&self) -> bool {
        TokenFile::load(&self.path).and_then(usable).is_ok()
    }
}
