//! Per-call remote sessions
//!
//! A [`RemoteSession`] covers exactly one lifecycle: connect, authenticate,
//! do work, disconnect. Nothing is cached or reused across calls; two
//! commands on the same [`Server`](crate::Server) get two sessions.

use std::sync::Arc;
use std::time::Duration;

use russh::client::{self, Handle};
use russh::keys::PrivateKeyWithHashAlg;
use russh::Disconnect;
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::credential::AuthMaterial;
use crate::error::{Error, Result};
use crate::user::User;

/// SSH event handler for russh.
///
/// Accepts all server host keys, which suits automated connections where
/// host key trust is handled out of band. Connecting to a host whose key
/// has changed will not be flagged.
#[derive(Debug, Clone)]
pub(crate) struct ClientHandler;

impl client::Handler for ClientHandler {
    type Error = anyhow::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh::keys::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        Ok(true)
    }
}

/// An authenticated channel to one remote host, alive for a single call.
pub struct RemoteSession {
    handle: Handle<ClientHandler>,
}

impl RemoteSession {
    /// Open an authenticated session to `host:port` as `user`.
    ///
    /// Credential material is resolved before anything is dialed, so an
    /// unusable key file fails here without touching the network. The TCP
    /// connect and handshake together must finish within `connect_timeout`.
    /// Each resolved credential is then offered in order; the first one the
    /// server accepts wins.
    pub async fn connect(
        host: &str,
        port: u16,
        user: &User,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let materials = user.resolve_credentials().await?;

        let addr = format!("{}:{}", host, port);
        info!("Connecting to {} as {}", addr, user.username());

        let config = Arc::new(client::Config::default());
        let connect_result = timeout(
            connect_timeout,
            client::connect(config, addr.as_str(), ClientHandler),
        )
        .await;

        let mut handle = match connect_result {
            Ok(Ok(handle)) => handle,
            Ok(Err(e)) => {
                error!("Connection to {} failed: {}", addr, e);
                return Err(Error::connection(e.to_string()));
            }
            Err(_) => {
                error!(
                    "Connection to {} timed out after {}s",
                    addr,
                    connect_timeout.as_secs()
                );
                return Err(Error::connection(format!(
                    "connection to {} timed out after {}s",
                    addr,
                    connect_timeout.as_secs()
                )));
            }
        };

        for material in &materials {
            if Self::try_authenticate(&mut handle, user.username(), material).await? {
                debug!("{} authentication accepted", material.kind());
                return Ok(Self { handle });
            }
            debug!("{} authentication rejected, trying next", material.kind());
        }

        error!("All credentials rejected for {}@{}", user.username(), addr);
        Err(Error::authentication(format!(
            "server rejected every credential offered for user '{}'",
            user.username()
        )))
    }

    /// Offer one credential. `Ok(false)` means the server said no and the
    /// next credential may be tried; errors are transport failures.
    async fn try_authenticate(
        handle: &mut Handle<ClientHandler>,
        username: &str,
        material: &AuthMaterial,
    ) -> Result<bool> {
        match material {
            AuthMaterial::Key(key) => {
                let key = PrivateKeyWithHashAlg::new(Arc::clone(key), None);
                let auth_result = handle
                    .authenticate_publickey(username, key)
                    .await
                    .map_err(|e| Error::authentication(e.to_string()))?;
                Ok(auth_result.success())
            }
            AuthMaterial::Password(password) => {
                let auth_result = handle
                    .authenticate_password(username, password.as_str())
                    .await
                    .map_err(|e| Error::authentication(e.to_string()))?;
                Ok(auth_result.success())
            }
        }
    }

    pub(crate) fn handle(&self) -> &Handle<ClientHandler> {
        &self.handle
    }

    /// Open a fresh session channel on this connection
    pub(crate) async fn open_channel(&self) -> Result<russh::Channel<client::Msg>> {
        self.handle
            .channel_open_session()
            .await
            .map_err(|e| Error::execution(format!("failed to open channel: {}", e)))
    }

    /// Tear the session down. Best effort on the remote side; the
    /// connection is gone either way.
    pub async fn close(&self) -> Result<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "")
            .await
            .map_err(|e| Error::connection(e.to_string()))?;
        debug!("Session closed");
        Ok(())
    }
}

impl std::fmt::Debug for RemoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSession").finish_non_exhaustive()
    }
}
