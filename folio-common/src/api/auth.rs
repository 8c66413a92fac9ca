//! Bearer credentials and session token persistence
//!
//! The token obtained at login is carried in an explicit [`Credentials`]
//! value handed to each client, never in process-wide state. It can
//! optionally be persisted between runs with a [`TokenStore`].

use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

// ========================================
// Credentials
// ========================================

/// Request credentials attached to outgoing API calls
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    /// No credentials; requests are sent without an Authorization header
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Credentials carrying a bearer token
    ///
    /// Blank tokens are treated as anonymous.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into().trim().to_string();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header, if authenticated
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_common::api::Credentials;
    ///
    /// let creds = Credentials::bearer("abc123");
    /// assert_eq!(creds.authorization_header().as_deref(), Some("Bearer abc123"));
    /// assert!(Credentials::anonymous().authorization_header().is_none());
    /// ```
    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ========================================
// Token Store
// ========================================

/// File-backed session token storage
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load stored credentials; a missing file means anonymous
    pub fn load(&self) -> Result<Credentials> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Credentials::bearer(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Credentials::anonymous()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist credentials atomically (temp file + rename)
    ///
    /// On Unix the file is created with mode 0600.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let token = credentials.token().ok_or_else(|| {
            Error::InvalidInput("Refusing to store anonymous credentials".to_string())
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), "Session token stored");
        Ok(())
    }

    /// Remove the stored token; succeeds if none exists
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ========================================
// Tests
// ========================================
