//! File copy over the sftp subsystem
//!
//! The `upload`/`download` half of [`RemoteSession`]. Each call starts the
//! `sftp` subsystem on a fresh channel of the already-authenticated
//! session and streams one file through it.

use std::path::{Path, PathBuf};

use russh_sftp::client::SftpSession;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::session::RemoteSession;
use crate::error::{Error, Result};

impl RemoteSession {
    async fn sftp_session(&self) -> Result<SftpSession> {
        let channel = self
            .handle()
            .channel_open_session()
            .await
            .map_err(|e| Error::transfer(format!("failed to open channel: {}", e)))?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| Error::transfer(format!("sftp subsystem unavailable: {}", e)))?;
        SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| Error::transfer(format!("sftp handshake failed: {}", e)))
    }

    /// Copy a local file to `remote` on this session's host
    pub async fn upload(&self, local: &Path, remote: &str) -> Result<()> {
        let sftp = self.sftp_session().await?;

        let mut src = tokio::fs::File::open(local).await?;
        let mut dst = sftp
            .create(remote)
            .await
            .map_err(|e| Error::transfer(format!("cannot create {} on remote: {}", remote, e)))?;

        let bytes = tokio::io::copy(&mut src, &mut dst).await?;
        dst.shutdown().await?;

        debug!("Uploaded {} bytes to {}", bytes, remote);
        Ok(())
    }

    /// Copy `remote` from this session's host into a local file
    pub async fn download(&self, remote: &str, local: &Path) -> Result<()> {
        let sftp = self.sftp_session().await?;

        let mut src = sftp
            .open(remote)
            .await
            .map_err(|e| Error::transfer(format!("cannot open {} on remote: {}", remote, e)))?;
        let mut dst = tokio::fs::File::create(local).await?;

        let bytes = tokio::io::copy(&mut src, &mut dst).await?;
        dst.flush().await?;

        debug!("Downloaded {} bytes from {}", bytes, remote);
        Ok(())
    }
}

/// Remote name to use when uploading `local` without an explicit target:
/// the local file's name, landing in the remote working directory.
pub(crate) fn default_remote_name(local: &Path) -> Result<String> {
    local
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::transfer(format!("no file name in local path {}", local.display()))
        })
}

/// Local path to use when downloading `remote` without an explicit target:
/// the remote file's base name, in the current directory.
pub(crate) fn default_local_name(remote: &str) -> Result<PathBuf> {
    let name = remote.rsplit('/').next().unwrap_or("");
    if name.is_empty() {
        return Err(Error::transfer(format!(
            "no file name in remote path '{}'",
            remote
        )));
    }
    Ok(PathBuf::from(name))
}
