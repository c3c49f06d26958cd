//! linux-remote - Run shell commands on remote Linux hosts over SSH
//!
//! This crate wraps the SSH plumbing that remote administration scripts keep
//! rewriting: construct a [`User`], bind it to a [`Server`], and call
//! [`Server::run_command`] to get captured output back. Every call opens its
//! own authenticated session and closes it before returning; nothing persists
//! between calls.
//!
//! # Features
//!
//! - Execute shell commands remotely with `stdout`, `stderr`, and the exit
//!   status captured separately ([`CommandResult`])
//! - Key file, in-memory key, and password credentials, offered in order
//!   until one is accepted ([`CredentialSource`])
//! - File copy to and from the host over the sftp subsystem
//!   ([`Server::upload`], [`Server::download`])
//! - A non-zero remote exit status is ordinary data, never an error
//!
//! # Example
//!
//! ```no_run
//! use linux_remote::{Server, User};
//!
//! # async fn demo() -> linux_remote::Result<()> {
//! let user = User::new("admin", "/home/admin/.ssh/id_ed25519");
//! let server = Server::new("blog.example.org", user);
//!
//! let out = server.run_command("df -h").await?;
//! print!("{}", out.stdout);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Usage (CLI)
//!
//! ```bash
//! linux-remote --host=192.168.1.100 --user=admin --key=~/.ssh/id_ed25519 -- df -h
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod server;
pub mod ssh;
pub mod user;

// Re-exports for convenience
pub use config::{Args, Config};
pub use credential::{AuthMaterial, CredentialSource, InMemoryKey, KeyFile, Password};
pub use error::{Error, Result};
pub use server::{Server, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS};
pub use ssh::{sanitize_command, CommandResult, RemoteSession};
pub use user::User;
