//! Builder for device sessions.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::DeviceSession;
use crate::error::{PlatformError, Result, SessionError};
use crate::platform::{PlatformRegistry, vendors};
use crate::transport::{AuthMethod, HostKeyVerification, SshConfig};

/// Builder for constructing and opening a [`DeviceSession`].
///
/// # Example
///
/// ```rust,no_run
/// use netscribe::session::SessionBuilder;
///
/// # async fn example() -> Result<(), netscribe::Error> {
/// let mut session = SessionBuilder::new("10.0.0.1")
///     .username("admin")
///     .password("secret")
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    auth: AuthMethod,
    platform_name: Option<String>,
    timeout: Duration,
    terminal_width: u32,
    terminal_height: u32,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    modify_term: bool,
}

impl SessionBuilder {
    /// Create a new session builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            auth: AuthMethod::None,
            platform_name: None,
            timeout: Duration::from_secs(30),
            terminal_width: 511,
            terminal_height: 24,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
            modify_term: true,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Password(SecretString::from(password.into()));
        self
    }

    /// Set private key authentication.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        };
        self
    }

    /// Set private key authentication with passphrase.
    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        };
        self
    }

    /// Pin the platform (e.g., "cisco_nxos") instead of following the
    /// detected OS.
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform_name = Some(platform.into());
        self
    }

    /// Set the connection and per-command timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set terminal dimensions.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a specific known_hosts file.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Control whether the session disables the pager on open and
    /// restores the terminal on close (default: true).
    pub fn modify_term(mut self, modify: bool) -> Self {
        self.modify_term = modify;
        self
    }

    /// Connect, verify enable mode, detect the OS and set up the
    /// terminal. Returns an open session.
    pub async fn connect(self) -> Result<DeviceSession> {
        let username = self.username.ok_or_else(|| SessionError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;

        let (platform, pinned) = match self.platform_name {
            Some(name) => {
                let registry = PlatformRegistry::global()
                    .read()
                    .map_err(|_| PlatformError::InvalidDefinition {
                        message: "Failed to acquire registry lock".to_string(),
                    })?;
                let platform = registry
                    .get(&name)
                    .ok_or(PlatformError::UnknownPlatform { name })?
                    .clone();
                (platform, true)
            }
            // Prompt handling is shared across the Cisco platforms, so
            // session start runs on the IOS definition until the OS is
            // known.
            None => (vendors::cisco_ios::platform(), false),
        };

        let ssh_config = SshConfig {
            host: self.host,
            port: self.port,
            username,
            auth: self.auth,
            timeout: self.timeout,
            terminal_width: self.terminal_width,
            terminal_height: self.terminal_height,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        };

        DeviceSession::open(ssh_config, platform, pinned, self.modify_term).await
    }
}
