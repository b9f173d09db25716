//! Device session implementation over the SSH transport.
//!
//! Mirrors the lifecycle an operator goes through by hand: land on a
//! prompt, refuse to run outside enable mode, work out which OS is on
//! the other end, disable the pager, scrape, then put the terminal
//! back the way it was found.

use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use regex::bytes::Regex as BytesRegex;
use tokio::io::AsyncWriteExt;

use super::Session;
use super::response::Response;
use crate::channel::literal_prompt_pattern;
use crate::error::{Result, SessionError};
use crate::platform::{NetworkOs, PlatformDefinition, PlatformRegistry, PromptMode};
use crate::transport::{SshConfig, SshTransport};

/// Loose pattern used only to wait out the login banner, before the
/// literal prompt is known.
static ANY_PROMPT: Lazy<BytesRegex> =
    Lazy::new(|| BytesRegex::new(r"(?m)^[^\r\n]{1,80}[>#]\s*$").unwrap());

/// A single echoed linefeed, the anchor for prompt discovery.
static LINE_FEED: Lazy<BytesRegex> = Lazy::new(|| BytesRegex::new(r"\n").unwrap());

/// Pager leftovers: the continuation prompt itself plus the
/// backspace-and-space sequence the device uses to erase it.
static PAGER_ARTIFACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:--More--|<--- More --->)?\r?\x08+ +\x08+|--More--|<--- More --->").unwrap()
});

/// First number in a chunk of text (terminal geometry parsing).
static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// An open, enable-mode terminal session on a Cisco device.
pub struct DeviceSession {
    transport: Option<SshTransport>,
    platform: PlatformDefinition,
    /// Whether the platform was chosen automatically (may be swapped
    /// for the detected OS) or pinned by the caller.
    platform_pinned: bool,
    prompt: String,
    prompt_pattern: BytesRegex,
    hostname: String,
    os: NetworkOs,
    term_length: Option<u32>,
    term_width: Option<u32>,
    modify_term: bool,
    timeout: Duration,
}

impl DeviceSession {
    /// Connect and run the full session-start sequence.
    ///
    /// Called by [`super::SessionBuilder::connect`].
    pub(super) async fn open(
        config: SshConfig,
        platform: PlatformDefinition,
        platform_pinned: bool,
        modify_term: bool,
    ) -> Result<Self> {
        let timeout = config.timeout;
        let mut transport = SshTransport::connect(config).await?;

        let prompt = Self::discover_prompt(&mut transport, timeout).await?;
        match platform.classify_prompt(&prompt) {
            Some(PromptMode::Privileged) => {}
            Some(PromptMode::UserExec) => {
                let _ = transport.close().await;
                return Err(SessionError::NotEnableMode { prompt }.into());
            }
            Some(PromptMode::Config) => {
                let _ = transport.close().await;
                return Err(SessionError::InConfigMode { prompt }.into());
            }
            None => {
                let _ = transport.close().await;
                return Err(SessionError::PromptDiscovery.into());
            }
        }

        let hostname = prompt.trim_end().trim_end_matches('#').to_string();
        let prompt_pattern =
            literal_prompt_pattern(&prompt).map_err(crate::error::ChannelError::InvalidPattern)?;

        let mut session = Self {
            transport: Some(transport),
            platform,
            platform_pinned,
            prompt,
            prompt_pattern,
            hostname,
            os: NetworkOs::Unknown,
            term_length: None,
            term_width: None,
            modify_term,
            timeout,
        };

        session.detect_os().await?;
        session.capture_term_info().await?;

        // Unknown OS: leave the terminal alone, scrape as-is.
        if session.modify_term && session.os != NetworkOs::Unknown {
            for command in session.platform.disable_paging_commands.clone() {
                session.run(&command).await?;
            }
        }

        info!(
            "session open: host '{}', os {}, platform {}",
            session.hostname, session.os, session.platform.name
        );
        Ok(session)
    }

    /// Capture the device prompt by bracketing it between two echoed
    /// newlines.
    ///
    /// Two newlines are sent so the prompt line of interest is itself
    /// newline-terminated: wait for the first echoed linefeed, then
    /// everything up to the next one is the prompt.
    async fn discover_prompt(transport: &mut SshTransport, timeout: Duration) -> Result<String> {
        // Let the login banner and initial prompt land, then drop them.
        transport.read_until_pattern(&ANY_PROMPT, timeout).await?;
        transport.discard_buffered();

        transport.send_line("").await?;
        transport.send_line("").await?;

        transport.read_until_pattern(&LINE_FEED, timeout).await?;
        let data = transport.read_until_pattern(&LINE_FEED, timeout).await?;
        let text = String::from_utf8_lossy(&data);

        let prompt = text
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(SessionError::PromptDiscovery)?
            .to_string();

        debug!("discovered prompt: '{}'", prompt);
        Ok(prompt)
    }

    /// Detect the network OS from the version banner and, unless the
    /// platform was pinned, swap in the matching platform definition.
    async fn detect_os(&mut self) -> Result<()> {
        let response = self.run("show version | i Cisco").await?;
        self.os = NetworkOs::detect(&response.result);
        debug!("detected OS: {}", self.os);

        if !self.platform_pinned {
            let name = self.os.platform_name();
            if name != self.platform.name {
                if let Ok(registry) = PlatformRegistry::global().read() {
                    if let Some(platform) = registry.get(name) {
                        self.platform = platform.clone();
                    }
                }
            }
        }
        Ok(())
    }

    /// Record the current terminal length/width so close() can restore
    /// them.
    async fn capture_term_info(&mut self) -> Result<()> {
        match self.os {
            NetworkOs::Ios | NetworkOs::IosXe | NetworkOs::NxOs => {
                // "Length: 24 lines, Width: 511 columns"
                let response = self.run("show terminal | i Length").await?;
                let mut parts = response.result.split(',');
                self.term_length = parts.next().and_then(first_number);
                self.term_width = parts.next().and_then(first_number);
            }
            NetworkOs::Asa => {
                let response = self.run("show pager").await?;
                self.term_length = first_number(&response.result);
            }
            NetworkOs::Unknown => {}
        }
        debug!(
            "terminal geometry: length {:?}, width {:?}",
            self.term_length, self.term_width
        );
        Ok(())
    }

    /// Core command execution: send, skip the echo, collect through
    /// the pager, split off the prompt, normalize and check for
    /// failure patterns.
    async fn run(&mut self, command: &str) -> Result<Response> {
        let transport = self.transport.as_mut().ok_or(SessionError::NotConnected)?;
        let start = Instant::now();

        transport.send_line(command).await?;

        // Anchor on the echoed command: everything before it (stale
        // prompts, leftovers from the previous exchange) is discarded.
        let echo = echo_pattern(command).map_err(crate::error::ChannelError::InvalidPattern)?;
        transport.read_until_pattern(&echo, self.timeout).await?;

        let mut raw = Vec::new();
        let pager = self.platform.pager_prompt.clone();
        loop {
            match pager {
                Some(ref pager) => {
                    let (data, idx) = transport
                        .read_until_any(&[&self.prompt_pattern, pager], self.timeout)
                        .await?;
                    raw.extend_from_slice(&data);
                    if idx == 0 {
                        break;
                    }
                    // Pager waiting: answer with a space for the next page.
                    transport.send_raw(" ").await?;
                }
                None => {
                    let data = transport
                        .read_until_pattern(&self.prompt_pattern, self.timeout)
                        .await?;
                    raw.extend_from_slice(&data);
                    break;
                }
            }
        }

        let elapsed = start.elapsed();
        let raw_result = String::from_utf8_lossy(&raw).to_string();

        let cleaned = PAGER_ARTIFACT.replace_all(&raw_result, "").to_string();
        let (body, prompt) = split_trailing_prompt(&cleaned, &self.prompt);
        let result = strip_echo(body, command).trim_matches(['\r', '\n']).to_string();

        if let Some(pattern) = self.platform.detect_failure(&result) {
            warn!("command '{}' failed: {}", command, pattern);
            return Ok(Response::failed(
                command,
                result.clone(),
                raw_result,
                prompt,
                elapsed,
                pattern,
            ));
        }

        Ok(Response::new(command, result, raw_result, prompt, elapsed))
    }
}

impl Session for DeviceSession {
    async fn send_command(&mut self, command: &str) -> Result<Response> {
        self.run(command).await
    }

    async fn write_command_to_file(&mut self, command: &str, path: &Path) -> Result<()> {
        let io_err = |source, path: &Path| SessionError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| io_err(e, path))?;

        let transport = self.transport.as_mut().ok_or(SessionError::NotConnected)?;
        transport.send_line(command).await?;

        let echo = echo_pattern(command).map_err(crate::error::ChannelError::InvalidPattern)?;
        transport.read_until_pattern(&echo, self.timeout).await?;

        let pager = self.platform.pager_prompt.clone();
        let mut first_chunk = true;
        loop {
            let (data, idx) = match pager {
                Some(ref pager) => {
                    transport
                        .read_until_any(&[&self.prompt_pattern, pager], self.timeout)
                        .await?
                }
                None => {
                    let data = transport
                        .read_until_pattern(&self.prompt_pattern, self.timeout)
                        .await?;
                    (data, 0)
                }
            };

            let text = String::from_utf8_lossy(&data);
            let cleaned = PAGER_ARTIFACT.replace_all(&text, "").to_string();
            let done = idx == 0;
            let chunk = if done {
                split_trailing_prompt(&cleaned, &self.prompt).0
            } else {
                cleaned.as_str()
            };
            let chunk = if first_chunk {
                strip_echo(chunk, command)
            } else {
                chunk
            };
            first_chunk = false;

            for line in chunk.lines() {
                file.write_all(line.trim_end_matches('\r').as_bytes())
                    .await
                    .map_err(|e| io_err(e, path))?;
                file.write_all(b"\n").await.map_err(|e| io_err(e, path))?;
            }

            if done {
                break;
            }
            transport.send_raw(" ").await?;
        }

        file.flush().await.map_err(|e| io_err(e, path))?;
        Ok(())
    }

    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn os(&self) -> NetworkOs {
        self.os
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    async fn close(&mut self) -> Result<()> {
        if self.transport.is_none() {
            return Ok(());
        }

        if self.modify_term {
            // Restore errors are logged, not fatal: the session is going
            // away either way.
            if let (Some(template), Some(length)) =
                (self.platform.restore_length_command.clone(), self.term_length)
            {
                let command = template.replace("{}", &length.to_string());
                if let Err(e) = self.run(&command).await {
                    warn!("terminal length restore failed: {}", e);
                }
            }
            if let (Some(template), Some(width)) =
                (self.platform.restore_width_command.clone(), self.term_width)
            {
                let command = template.replace("{}", &width.to_string());
                if let Err(e) = self.run(&command).await {
                    warn!("terminal width restore failed: {}", e);
                }
            }
        }

        if let Some(transport) = self.transport.take() {
            transport.close().await?;
        }
        info!("session closed: host '{}'", self.hostname);
        Ok(())
    }
}

/// Split the captured text into (body, matched prompt) at the last
/// occurrence of the literal prompt.
fn split_trailing_prompt<'a>(text: &'a str, prompt: &str) -> (&'a str, String) {
    match text.rfind(prompt) {
        Some(pos) => (&text[..pos], text[pos..].trim().to_string()),
        None => (text, String::new()),
    }
}

/// Pattern matching the echoed command text.
fn echo_pattern(command: &str) -> std::result::Result<BytesRegex, regex::Error> {
    BytesRegex::new(&regex::escape(command.trim()))
}

/// Drop the echoed command from the front of the capture.
///
/// The echo is normally consumed by the anchor read; this catches the
/// tail of a wrapped echo that regrows at the front of the capture.
fn strip_echo<'a>(text: &'a str, command: &str) -> &'a str {
    let head = text.trim_start_matches(['\r', '\n', ' ']);
    match head.strip_prefix(command.trim()) {
        Some(rest) => rest.trim_start_matches(['\r', '\n']),
        None => text,
    }
}

fn first_number(text: impl AsRef<str>) -> Option<u32> {
    FIRST_NUMBER
        .find(text.as_ref())
        .and_then(|m| m.as_str().parse().ok())
}
