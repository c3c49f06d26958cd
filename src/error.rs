//! Error types for remote command execution and file transfer

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Remote host unreachable, handshake failed, or connect timed out
    #[error("connection error: {0}")]
    Connection(String),

    /// Every offered credential was rejected, or authentication could not
    /// be carried out
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Credential material could not be loaded (missing, unreadable, or
    /// unparsable key)
    #[error("credential error: {0}")]
    Credential(String),

    /// The session could not open a channel or dispatch the command
    #[error("command dispatch failed: {0}")]
    Execution(String),

    /// Command ran past the configured timeout
    #[error("command timeout after {0}ms")]
    Timeout(u64),

    /// Command string rejected before any connection was attempted
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// File copy over the sftp subsystem failed
    #[error("file transfer failed: {0}")]
    Transfer(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Local IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error from a string
    pub fn connection(msg: impl Into<String>) -> Self {
        Error::Connection(msg.into())
    }

    /// Create an authentication error from a string
    pub fn authentication(msg: impl Into<String>) -> Self {
        Error::Authentication(msg.into())
    }

    /// Create a credential error from a string
    pub fn credential(msg: impl Into<String>) -> Self {
        Error::Credential(msg.into())
    }

    /// Create an execution error from a string
    pub fn execution(msg: impl Into<String>) -> Self {
        Error::Execution(msg.into())
    }

    /// Create a transfer error from a string
    pub fn transfer(msg: impl Into<String>) -> Self {
        Error::Transfer(msg.into())
    }

    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// True when the failure happened while establishing the authenticated
    /// session — the host could not be reached, the credential could not be
    /// loaded, or the server rejected it. No command was dispatched.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Error::Connection(_) | Error::Authentication(_) | Error::Credential(_)
        )
    }

    /// True when the session was established but the command could not be
    /// dispatched or did not complete. A non-zero remote exit status is not
    /// an error and never produces this.
    pub fn is_execution_error(&self) -> bool {
        matches!(self, Error::Execution(_) | Error::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Connection("no route to host".to_string());
        assert_eq!(err.to_string(), "connection error: no route to host");

        let err = Error::Timeout(60_000);
        assert_eq!(err.to_string(), "command timeout after 60000ms");

        let err = Error::credential("cannot read key file");
        assert_eq!(err.to_string(), "credential error: cannot read key file");
    }

    #[test]
    fn test_connection_kind() {
        assert!(Error::connection("unreachable").is_connection_error());
        assert!(Error::authentication("rejected").is_connection_error());
        assert!(Error::credential("missing key").is_connection_error());
        assert!(!Error::execution("channel refused").is_connection_error());
        assert!(!Error::Timeout(1000).is_connection_error());
    }

    #[test]
    fn test_execution_kind() {
        assert!(Error::execution("channel refused").is_execution_error());
        assert!(Error::Timeout(1000).is_execution_error());
        assert!(!Error::connection("unreachable").is_execution_error());
        assert!(!Error::InvalidCommand("empty".to_string()).is_execution_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_connection_error());
    }
}
