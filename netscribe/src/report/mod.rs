//! Report operations.
//!
//! Each submodule is one report: gather output over the session,
//! parse it into records and write a CSV (or raw text) file under the
//! configured output directory. The heavy lifting lives in pure
//! functions in the `parse` layer; the report modules wire session,
//! templates and output together.

pub mod arp;
pub mod cdp;
pub mod document;
pub mod interfaces;
pub mod mac_table;
pub mod nexthop;
pub mod port_map;
pub mod vlans;

use std::path::PathBuf;

use crate::error::{Result, SessionError};
use crate::output;
use crate::platform::NetworkOs;
use crate::session::Session;
use crate::settings::Settings;

/// The OSes most table reports support.
pub(crate) const IOS_AND_NXOS: &[NetworkOs] =
    &[NetworkOs::Ios, NetworkOs::IosXe, NetworkOs::NxOs];

/// Refuse to run a report on an unsupported OS.
pub(crate) fn require_os(operation: &str, os: NetworkOs, supported: &[NetworkOs]) -> Result<()> {
    if supported.contains(&os) {
        return Ok(());
    }
    Err(SessionError::UnsupportedOs {
        operation: operation.to_string(),
        os: os.to_string(),
        supported: supported
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    }
    .into())
}

/// Build (and make room for) the output path of a report file.
pub(crate) fn output_file(
    settings: &Settings,
    hostname: &str,
    desc: &str,
    ext: &str,
) -> Result<PathBuf> {
    let path = output::create_output_filename(settings, hostname, desc, ext, true);
    output::ensure_parent_dir(&path)?;
    Ok(path)
}

/// Run a command and return its output, mapping device-side failures
/// to errors.
pub(crate) async fn capture<S: Session>(session: &mut S, command: &str) -> Result<String> {
    let response = session.send_command(command).await?;
    match response.failure_message {
        Some(message) => Err(SessionError::CommandFailed {
            command: command.to_string(),
            message,
        }
        .into()),
        None => Ok(response.result),
    }
}
