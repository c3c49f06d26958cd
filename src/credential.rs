//! Credential sources for authenticating remote sessions
//!
//! A [`CredentialSource`] produces [`AuthMaterial`] when a command is about
//! to run — never at construction time. Constructing a [`KeyFile`] that
//! points at a missing file succeeds; the failure surfaces on resolve,
//! before any network activity.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use russh::keys::{decode_secret_key, PrivateKey};

use crate::error::{Error, Result};

/// Resolved authentication material, ready to present to the server.
pub enum AuthMaterial {
    /// A parsed private key for publickey authentication
    Key(Arc<PrivateKey>),
    /// A plain password
    Password(String),
}

impl AuthMaterial {
    /// Short label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            AuthMaterial::Key(_) => "public key",
            AuthMaterial::Password(_) => "password",
        }
    }
}

impl fmt::Debug for AuthMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMaterial::Key(key) => f
                .debug_tuple("Key")
                .field(&key.algorithm().to_string())
                .finish(),
            AuthMaterial::Password(_) => f.debug_tuple("Password").field(&"<redacted>").finish(),
        }
    }
}

/// A mechanism that can produce authentication material on demand.
///
/// Implementations ship for key files on disk ([`KeyFile`]), key material
/// already in memory ([`InMemoryKey`]), and plain passwords ([`Password`]).
/// Anything that can hand back one of the [`AuthMaterial`] variants — a
/// secret store, an environment variable, a prompt — can slot in without
/// touching [`Server`](crate::Server).
#[async_trait]
pub trait CredentialSource: fmt::Debug + Send + Sync {
    /// Load or produce the material. Called once per command invocation.
    async fn resolve(&self) -> Result<AuthMaterial>;
}

/// Private key stored on disk — the common case.
///
/// ```
/// use linux_remote::KeyFile;
///
/// // No IO happens here; the file is read when a command runs.
/// let key = KeyFile::new("/home/admin/.ssh/id_ed25519");
/// assert!(key.path().ends_with("id_ed25519"));
/// ```
#[derive(Clone)]
pub struct KeyFile {
    path: PathBuf,
    passphrase: Option<String>,
}

impl KeyFile {
    /// Reference a private key file. The path is not checked until use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            passphrase: None,
        }
    }

    /// Set the passphrase the key is encrypted with
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Path of the key file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl fmt::Debug for KeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFile")
            .field("path", &self.path)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl CredentialSource for KeyFile {
    async fn resolve(&self) -> Result<AuthMaterial> {
        let pem = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::credential(format!("cannot read key file {}: {}", self.path.display(), e))
        })?;
        let key = decode_secret_key(&pem, self.passphrase.as_deref()).map_err(|e| {
            Error::credential(format!(
                "cannot parse key file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(AuthMaterial::Key(Arc::new(key)))
    }
}

/// Key material held in memory, e.g. fetched from a secret store.
#[derive(Clone)]
pub struct InMemoryKey {
    pem: String,
    passphrase: Option<String>,
}

impl InMemoryKey {
    /// Wrap OpenSSH-encoded private key text
    pub fn new(pem: impl Into<String>) -> Self {
        Self {
            pem: pem.into(),
            passphrase: None,
        }
    }

    /// Set the passphrase the key is encrypted with
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }
}

impl fmt::Debug for InMemoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryKey")
            .field("pem", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl CredentialSource for InMemoryKey {
    async fn resolve(&self) -> Result<AuthMaterial> {
        let key = decode_secret_key(&self.pem, self.passphrase.as_deref())
            .map_err(|e| Error::credential(format!("cannot parse private key: {}", e)))?;
        Ok(AuthMaterial::Key(Arc::new(key)))
    }
}

/// Plain password authentication.
#[derive(Clone)]
pub struct Password {
    secret: String,
}

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl CredentialSource for Password {
    async fn resolve(&self) -> Result<AuthMaterial> {
        Ok(AuthMaterial::Password(self.secret.clone()))
    }
}
