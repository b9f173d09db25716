//! SSH transport implementation using russh.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use regex::bytes::Regex;
use russh::client::{self, Handle, Msg};
use russh::keys::{PrivateKeyWithHashAlg, PublicKey, load_secret_key};
use russh::{Channel, ChannelMsg};
use secrecy::ExposeSecret;

use super::config::{AuthMethod, HostKeyVerification, SshConfig};
use crate::channel::PatternBuffer;
use crate::error::{ChannelError, Result, TransportError};

/// SSH transport wrapping a russh client with an open PTY shell.
///
/// Owns the interactive channel and the pattern buffer the session
/// layer reads from. All reads are pattern-bounded: data accumulates
/// until a supplied regex matches in the buffer tail or the timeout
/// expires.
pub struct SshTransport {
    /// The russh session handle.
    session: Handle<SshHandler>,

    /// The interactive PTY channel.
    channel: Channel<Msg>,

    /// Accumulated, ANSI-stripped output.
    buffer: PatternBuffer,

    /// Configuration used for this connection.
    config: SshConfig,
}

impl SshTransport {
    /// Connect to the SSH server, authenticate and open a PTY shell.
    pub async fn connect(config: SshConfig) -> Result<Self> {
        let ssh_config = Arc::new(client::Config {
            inactivity_timeout: Some(config.timeout),
            ..Default::default()
        });

        let host_key_error: Arc<Mutex<Option<TransportError>>> = Arc::new(Mutex::new(None));

        let handler = SshHandler {
            host: config.host.clone(),
            port: config.port,
            host_key_verification: config.host_key_verification.clone(),
            known_hosts_path: config.known_hosts_path.clone(),
            host_key_error: host_key_error.clone(),
        };

        debug!("connecting to {}", config.socket_addr());
        let mut session = tokio::time::timeout(
            config.timeout,
            client::connect(ssh_config, (config.host.as_str(), config.port), handler),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(|e| {
            // If check_server_key stored a detailed error, use that instead
            // of the generic russh::Error::UnknownKey
            if let Some(hk_err) = host_key_error.lock().unwrap().take() {
                hk_err
            } else {
                TransportError::Ssh(e)
            }
        })?;

        Self::authenticate(&mut session, &config).await?;

        let channel = Self::open_shell(&session, &config).await?;

        Ok(Self {
            session,
            channel,
            buffer: PatternBuffer::default(),
            config,
        })
    }

    /// Open a PTY channel with a shell on the authenticated session.
    async fn open_shell(session: &Handle<SshHandler>, config: &SshConfig) -> Result<Channel<Msg>> {
        let channel = session
            .channel_open_session()
            .await
            .map_err(|_| ChannelError::PtyOpenFailed)?;

        channel
            .request_pty(
                true,
                "xterm",
                config.terminal_width,
                config.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(|_| ChannelError::PtyOpenFailed)?;

        channel
            .request_shell(true)
            .await
            .map_err(|_| ChannelError::ShellRequestFailed)?;

        Ok(channel)
    }

    /// Authenticate with the server.
    async fn authenticate(session: &mut Handle<SshHandler>, config: &SshConfig) -> Result<()> {
        let success = match &config.auth {
            AuthMethod::None => session
                .authenticate_none(&config.username)
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::Password(password) => session
                .authenticate_password(&config.username, password.expose_secret())
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::PrivateKey { path, passphrase } => {
                let key = load_secret_key(path, passphrase.as_ref().map(|p| p.expose_secret()))
                    .map_err(|e| TransportError::Key(e.to_string()))?;

                // Best RSA hash algorithm supported by the server.
                let hash_alg = session
                    .best_supported_rsa_hash()
                    .await
                    .map_err(TransportError::Ssh)?
                    .flatten();

                session
                    .authenticate_publickey(
                        &config.username,
                        PrivateKeyWithHashAlg::new(Arc::new(key), hash_alg),
                    )
                    .await
                    .map_err(TransportError::Ssh)?
                    .success()
            }
        };

        if !success {
            return Err(TransportError::AuthenticationFailed {
                user: config.username.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Send a line of text, appending a newline.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        trace!("send line: {:?}", line);
        let mut data = line.as_bytes().to_vec();
        data.push(b'\n');
        self.channel
            .data(&data[..])
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Send raw text with no newline (pager continuation, passwords).
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.channel
            .data(text.as_bytes())
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read until `pattern` matches in the buffer tail, returning the
    /// output up to and including the matched text. Output past the
    /// match stays buffered for the next read.
    pub async fn read_until_pattern(
        &mut self,
        pattern: &Regex,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        let (data, _) = self.read_until_any(&[pattern], timeout).await?;
        Ok(data)
    }

    /// Read until any of `patterns` matches in the buffer tail.
    ///
    /// Returns the output through the end of the match and the index
    /// of the pattern that matched; anything already received past the
    /// match stays buffered. Patterns are checked in order, so put
    /// the more specific pattern first when the alternatives can
    /// overlap.
    pub async fn read_until_any(
        &mut self,
        patterns: &[&Regex],
        timeout: Duration,
    ) -> Result<(Vec<u8>, usize)> {
        let deadline = Instant::now() + timeout;

        loop {
            for (idx, pattern) in patterns.iter().enumerate() {
                if let Some(data) = self.buffer.take_through(pattern) {
                    return Ok((data, idx));
                }
            }

            let remaining = deadline
                .checked_duration_since(Instant::now())
                .ok_or(ChannelError::PatternTimeout(timeout))?;

            match tokio::time::timeout(remaining, self.channel.wait()).await {
                Err(_) => return Err(ChannelError::PatternTimeout(timeout).into()),
                Ok(None) => return Err(ChannelError::Closed.into()),
                Ok(Some(ChannelMsg::Data { ref data })) => self.buffer.extend(data),
                Ok(Some(ChannelMsg::ExtendedData { ref data, .. })) => self.buffer.extend(data),
                Ok(Some(ChannelMsg::Eof | ChannelMsg::Close)) => {
                    return Err(ChannelError::Closed.into());
                }
                Ok(Some(_)) => {}
            }
        }
    }

    /// Drop any buffered output (used before prompt discovery so login
    /// banners do not leak into the first capture).
    pub fn discard_buffered(&mut self) {
        self.buffer.clear();
    }

    /// Whether the underlying SSH session is still alive.
    pub fn is_alive(&self) -> bool {
        !self.session.is_closed()
    }

    /// Get the configuration for this connection.
    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    /// Close the connection.
    pub async fn close(self) -> Result<()> {
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

/// SSH client handler for russh.
struct SshHandler {
    host: String,
    port: u16,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    /// Stores a detailed host-key error so connect() can surface it
    /// instead of the generic russh::Error::UnknownKey.
    host_key_error: Arc<Mutex<Option<TransportError>>>,
}

impl SshHandler {
    /// Check the host key against known_hosts.
    ///
    /// Returns `Ok(true)` if matched, `Ok(false)` if host not found,
    /// `Err(TransportError::HostKeyChanged)` if key changed.
    fn check_known_hosts(&self, pubkey: &PublicKey) -> std::result::Result<bool, TransportError> {
        let result = if let Some(ref path) = self.known_hosts_path {
            russh::keys::check_known_hosts_path(&self.host, self.port, pubkey, path)
        } else {
            russh::keys::check_known_hosts(&self.host, self.port, pubkey)
        };

        match result {
            Ok(matched) => Ok(matched),
            Err(russh::keys::Error::KeyChanged { line }) => Err(TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            }),
            Err(e) => Err(TransportError::KnownHosts(e.to_string())),
        }
    }

    /// Save a new host key to known_hosts.
    fn learn_host_key(&self, pubkey: &PublicKey) -> std::result::Result<(), TransportError> {
        let result = if let Some(ref path) = self.known_hosts_path {
            russh::keys::known_hosts::learn_known_hosts_path(&self.host, self.port, pubkey, path)
        } else {
            russh::keys::known_hosts::learn_known_hosts(&self.host, self.port, pubkey)
        };

        result.map_err(|e| TransportError::KnownHosts(e.to_string()))
    }
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        match self.host_key_verification {
            HostKeyVerification::Disabled => Ok(true),

            HostKeyVerification::AcceptNew => match self.check_known_hosts(server_public_key) {
                Ok(true) => Ok(true),
                Ok(false) => {
                    // Unknown host - learn the key
                    if let Err(e) = self.learn_host_key(server_public_key) {
                        warn!("Failed to save host key: {}", e);
                    }
                    Ok(true)
                }
                Err(e) => {
                    // Key changed - store detailed error and reject
                    *self.host_key_error.lock().unwrap() = Some(e);
                    Ok(false)
                }
            },

            HostKeyVerification::Strict => match self.check_known_hosts(server_public_key) {
                Ok(true) => Ok(true),
                Ok(false) => {
                    *self.host_key_error.lock().unwrap() = Some(TransportError::HostKeyUnknown {
                        host: self.host.clone(),
                        port: self.port,
                    });
                    Ok(false)
                }
                Err(e) => {
                    *self.host_key_error.lock().unwrap() = Some(e);
                    Ok(false)
                }
            },
        }
    }
}
