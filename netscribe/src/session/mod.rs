//! High-level device session layer.
//!
//! The session layer owns prompt discovery, OS detection, terminal
//! setup/restore and command execution. Reports consume the [`Session`]
//! trait rather than [`DeviceSession`] directly, so they can be tested
//! against scripted fakes.

mod builder;
mod device;
pub(crate) mod response;

pub use builder::SessionBuilder;
pub use device::DeviceSession;
pub use response::Response;

use std::future::Future;
use std::path::Path;

use crate::error::Result;
use crate::platform::NetworkOs;

/// Trait for an open terminal session on a network device.
pub trait Session: Send {
    /// Send a command and capture its output until the prompt returns.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Send a command and stream its output to a file, line by line.
    ///
    /// Intended for very large outputs (full route tables, `show
    /// tech`) where holding the whole capture in one string is
    /// undesirable.
    fn write_command_to_file(
        &mut self,
        command: &str,
        path: &Path,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Hostname of the connected device (prompt minus the mode suffix).
    fn hostname(&self) -> &str;

    /// Detected network OS.
    fn os(&self) -> NetworkOs;

    /// The discovered device prompt.
    fn prompt(&self) -> &str;

    /// Restore terminal settings and close the connection.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}
