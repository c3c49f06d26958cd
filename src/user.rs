//! Remote account records
//!
//! A [`User`] pairs a username with the credentials that can log it in.
//! Construction performs no IO and no validation; credentials are resolved
//! when a command actually runs.

use std::path::PathBuf;
use std::sync::Arc;

use crate::credential::{CredentialSource, KeyFile, Password};

/// A remote account: username plus ordered credential sources.
///
/// Credentials are tried in list order during authentication, and the
/// convenience constructors put key material first, so a user built with
/// both a key file and a password offers the key before falling back:
///
/// ```
/// use linux_remote::{Password, User};
///
/// let user = User::new("admin", "/home/admin/.ssh/id_ed25519")
///     .add_credential(Password::new("fallback"));
/// assert_eq!(user.username(), "admin");
/// assert_eq!(user.credentials().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct User {
    username: String,
    credentials: Vec<Arc<dyn CredentialSource>>,
}

impl User {
    /// Create a user that authenticates with a private key file.
    ///
    /// The path is recorded, not read; a missing or unreadable key file
    /// only surfaces when a command runs.
    pub fn new(username: impl Into<String>, keyfile: impl Into<PathBuf>) -> Self {
        Self::with_credential(username, KeyFile::new(keyfile))
    }

    /// Create a user that authenticates with a password
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_credential(username, Password::new(password))
    }

    /// Create a user with an arbitrary credential source
    pub fn with_credential(
        username: impl Into<String>,
        credential: impl CredentialSource + 'static,
    ) -> Self {
        Self {
            username: username.into(),
            credentials: vec![Arc::new(credential)],
        }
    }

    /// Append a fallback credential, tried after the ones already present
    pub fn add_credential(mut self, credential: impl CredentialSource + 'static) -> Self {
        self.credentials.push(Arc::new(credential));
        self
    }

    /// Name of the remote account
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Credential sources in the order they will be offered
    pub fn credentials(&self) -> &[Arc<dyn CredentialSource>] {
        &self.credentials
    }

    /// Resolve every credential up front. Any unusable credential fails the
    /// whole call here, before a connection is attempted.
    pub(crate) async fn resolve_credentials(
        &self,
    ) -> crate::error::Result<Vec<crate::credential::AuthMaterial>> {
        let mut materials = Vec::with_capacity(self.credentials.len());
        for credential in &self.credentials {
            materials.push(credential.resolve().await?);
        }
        Ok(materials)
    }
}
