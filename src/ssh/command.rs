//! Command execution over an open session
//!
//! Provides [`CommandResult`] and the `run` half of [`RemoteSession`]:
//! dispatch a command on a fresh exec channel, capture stdout and stderr
//! separately, and report the remote exit status as data.

use std::time::Duration;

use russh::ChannelMsg;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::session::RemoteSession;
use crate::error::{Error, Result};

/// Outcome of one remote command.
///
/// `stdout` and `stderr` hold the captured streams as text, unmodified —
/// trailing newlines included. A non-zero `exit_status` is a normal result,
/// not an error; `None` means the remote side closed the channel without
/// reporting a status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandResult {
    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// Remote exit status, when the server reported one
    pub exit_status: Option<u32>,
}

impl CommandResult {
    /// True when the command exited 0 (or the server reported no status)
    pub fn success(&self) -> bool {
        self.exit_status.is_none_or(|status| status == 0)
    }
}

/// Validate a command before execution: trim surrounding whitespace and
/// reject empty input. Runs locally, before any connection is attempted.
pub fn sanitize_command(command: &str) -> Result<String> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidCommand("command cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

impl RemoteSession {
    /// Execute `command` in a remote shell and wait for it to finish.
    ///
    /// The command runs on a dedicated exec channel without a PTY, so
    /// stdout and stderr arrive separated. Output is collected until the
    /// channel closes; if that takes longer than `command_timeout` the call
    /// fails with [`Error::Timeout`] and the session should be discarded.
    pub async fn run(&self, command: &str, command_timeout: Duration) -> Result<CommandResult> {
        let channel = self.open_channel().await?;

        channel
            .exec(true, command)
            .await
            .map_err(|e| Error::execution(format!("failed to dispatch command: {}", e)))?;

        match timeout(command_timeout, collect_output(channel)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Command timed out after {}ms", command_timeout.as_millis());
                Err(Error::Timeout(command_timeout.as_millis() as u64))
            }
        }
    }
}

/// Drain a channel into a [`CommandResult`].
async fn collect_output(mut channel: russh::Channel<russh::client::Msg>) -> Result<CommandResult> {
    let mut result = CommandResult::default();

    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { ref data } => {
                result.stdout.push_str(&String::from_utf8_lossy(data));
            }
            ChannelMsg::ExtendedData { ref data, ext } => {
                // ext 1 is the stderr stream
                if ext == 1 {
                    result.stderr.push_str(&String::from_utf8_lossy(data));
                } else {
                    result.stdout.push_str(&String::from_utf8_lossy(data));
                }
            }
            ChannelMsg::ExitStatus { exit_status } => {
                result.exit_status = Some(exit_status);
            }
            ChannelMsg::Close => break,
            // The status can arrive after EOF; keep draining until close.
            _ => {}
        }
    }

    debug!(
        "Command completed: exit_status={:?}, stdout_len={}, stderr_len={}",
        result.exit_status,
        result.stdout.len(),
        result.stderr.len()
    );

    Ok(result)
}
