//! Error types for netscribe.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for netscribe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Session-level errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Platform/vendor errors
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Output parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Report generation errors
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Settings file errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host key for a known host changed
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged {
        host: String,
        port: u16,
        line: usize,
    },

    /// Host key unknown and strict checking requested
    #[error("Unknown host key for {host}:{port}")]
    HostKeyUnknown { host: String, port: u16 },

    /// known_hosts file could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (pattern matching, PTY operations).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Failed to open PTY channel
    #[error("Failed to open PTY channel")]
    PtyOpenFailed,

    /// Failed to request shell
    #[error("Failed to request shell")]
    ShellRequestFailed,

    /// Pattern matching timed out
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(std::time::Duration),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Session layer errors (prompt discovery, command execution).
#[derive(Error, Debug)]
pub enum SessionError {
    /// Session not connected
    #[error("Session not connected")]
    NotConnected,

    /// Invalid configuration in the session builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Session already connected
    #[error("Session already connected")]
    AlreadyConnected,

    /// The device prompt could not be captured
    #[error("Unable to capture the device prompt")]
    PromptDiscovery,

    /// Connected in user-exec mode instead of enable mode
    #[error("Not in enable mode (prompt '{prompt}') - enter enable and retry")]
    NotEnableMode { prompt: String },

    /// Connected with the device sitting in config mode
    #[error("Device is in config mode (prompt '{prompt}') - exit config mode and retry")]
    InConfigMode { prompt: String },

    /// Command execution reported a device-side failure
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The detected network OS is not supported by this operation
    #[error("{operation} does not support {os}; supported: {supported}")]
    UnsupportedOs {
        operation: String,
        os: String,
        supported: String,
    },

    /// I/O error while streaming captured output to a file
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Platform/vendor definition errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Invalid platform definition
    #[error("Invalid platform definition: {message}")]
    InvalidDefinition { message: String },

    /// Platform name not found in the registry
    #[error("Unknown platform '{name}'")]
    UnknownPlatform { name: String },

    /// Platform name already registered
    #[error("Platform '{name}' is already registered")]
    AlreadyRegistered { name: String },
}

/// Errors raised while parsing command output into records.
#[derive(Error, Debug)]
pub enum ParseError {
    /// TextFSM template could not be read
    #[error("Cannot read template {path}: {source}")]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TextFSM template failed to compile or apply
    #[error("Template error: {message}")]
    Template { message: String },

    /// A record is missing a column the caller requires
    #[error("Parsed record is missing column '{column}'")]
    MissingColumn { column: String },

    /// A field did not parse as the expected type
    #[error("Invalid {what}: '{value}'")]
    InvalidField { what: &'static str, value: String },
}

/// Report generation errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error while writing a report
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The ARP CSV used for the port map could not be used
    #[error("ARP CSV {path} is unusable: {message}")]
    ArpCsv { path: PathBuf, message: String },
}

/// Settings file errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read or created
    #[error("Cannot access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Settings file is not valid JSON
    #[error("Settings file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias using netscribe's Error.
pub type Result<T> = std::result::Result<T, Error>;
