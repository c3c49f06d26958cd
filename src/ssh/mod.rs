//! Per-call SSH transport
//!
//! One [`RemoteSession`] per operation, closed before the operation
//! returns. [`session`] owns the connect/authenticate/disconnect lifecycle;
//! [`command`] and [`transfer`] build command execution and file copy on
//! top of it.

pub mod command;
pub mod session;
pub mod transfer;

// Re-exports
pub use command::{sanitize_command, CommandResult};
pub use session::RemoteSession;
