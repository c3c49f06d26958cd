//! Server handles
//!
//! A [`Server`] binds a host address to the [`User`] that logs into it and
//! exposes the remote operations: run a command, probe reachability, copy a
//! file either way. Each operation opens one session, does its work, and
//! closes the session before returning.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::Result;
use crate::ssh::command::sanitize_command;
use crate::ssh::session::RemoteSession;
use crate::ssh::transfer::{default_local_name, default_remote_name};
use crate::ssh::CommandResult;
use crate::user::User;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default command execution timeout in seconds
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;

/// A remote host bound to the user that logs into it.
///
/// Construction records the parameters and nothing else; no connection is
/// made until an operation runs, and none survives past that operation.
/// `Server` is `Clone` and all operations take `&self`, so concurrent calls
/// on the same value are fine: each one gets an independent session.
///
/// ```no_run
/// use linux_remote::{Server, User};
///
/// # async fn demo() -> linux_remote::Result<()> {
/// let user = User::new("ilker", "/home/ilker/.ssh/id_ed25519");
/// let server = Server::new("blog.example.org", user);
///
/// let out = server.run_command("df -h").await?;
/// print!("{}", out.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Server {
    host: String,
    port: u16,
    user: User,
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl Server {
    /// Bind `host` to `user`. Performs no IO; bad addresses and bad
    /// credentials surface when an operation runs.
    pub fn new(host: impl Into<String>, user: User) -> Self {
        Self {
            host: host.into(),
            port: 22,
            user,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
        }
    }

    /// Set the SSH port (default: 22)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set how long the TCP connect and handshake together may take
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set how long a dispatched command may run before the call fails
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Remote hostname or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// SSH port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The user this server is bound to
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Connection timeout currently in effect
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Command timeout currently in effect
    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    async fn session(&self) -> Result<RemoteSession> {
        RemoteSession::connect(&self.host, self.port, &self.user, self.connect_timeout).await
    }

    /// Execute `command` in a remote shell and capture its output.
    ///
    /// The command is validated locally (empty input is rejected before any
    /// connection), then a session is opened, the command dispatched, and
    /// stdout/stderr collected until it finishes. The session is closed
    /// before this returns, success or not.
    ///
    /// A non-zero exit status is reported in
    /// [`CommandResult::exit_status`], never as an error. Errors mean the
    /// session could not be established ([`Error::is_connection_error`]) or
    /// the command could not be dispatched or ran past the timeout
    /// ([`Error::is_execution_error`]).
    ///
    /// [`Error::is_connection_error`]: crate::Error::is_connection_error
    /// [`Error::is_execution_error`]: crate::Error::is_execution_error
    pub async fn run_command(&self, command: &str) -> Result<CommandResult> {
        let command = sanitize_command(command)?;

        let session = self.session().await?;
        let result = session.run(&command, self.command_timeout).await;
        close_quietly(&session).await;
        result
    }

    /// Check whether the host is up and answering commands.
    ///
    /// Runs `uname -a` and reports whether any output came back. Every kind
    /// of failure, connection problems included, comes back as `false`.
    pub async fn probe(&self) -> bool {
        match self.run_command("uname -a").await {
            Ok(result) => !result.stdout.is_empty(),
            Err(e) => {
                debug!("Probe of {} failed: {}", self.host, e);
                false
            }
        }
    }

    /// Copy a local file onto the host over the sftp subsystem.
    ///
    /// With `remote` set to `None` the file lands under its own name in the
    /// remote working directory. Returns the remote path that was written.
    pub async fn upload(&self, local: impl AsRef<Path>, remote: Option<&str>) -> Result<String> {
        let local = local.as_ref();
        let remote = match remote {
            Some(name) => name.to_string(),
            None => default_remote_name(local)?,
        };

        let session = self.session().await?;
        let outcome = session.upload(local, &remote).await;
        close_quietly(&session).await;
        outcome?;

        info!("Uploaded {} to {}:{}", local.display(), self.host, remote);
        Ok(remote)
    }

    /// Copy a file from the host to the local machine over the sftp
    /// subsystem.
    ///
    /// With `local` set to `None` the file lands under its remote base name
    /// in the current directory. Returns the local path that was written.
    pub async fn download(&self, remote: &str, local: Option<&Path>) -> Result<PathBuf> {
        let local = match local {
            Some(path) => path.to_path_buf(),
            None => default_local_name(remote)?,
        };

        let session = self.session().await?;
        let outcome = session.download(remote, &local).await;
        close_quietly(&session).await;
        outcome?;

        info!("Downloaded {}:{} to {}", self.host, remote, local.display());
        Ok(local)
    }
}

/// Close a session without letting a disconnect failure mask the
/// operation's own result.
async fn close_quietly(session: &RemoteSession) {
    if let Err(e) = session.close().await {
        debug!("Session close failed: {}", e);
    }
}
