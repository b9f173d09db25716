//! CDP neighbor detail report.
//!
//! Captures `show cdp neighbors detail` and writes one CSV row per
//! neighbor: where it is attached, what it is, and how to reach it.

use std::path::PathBuf;

use log::info;

use super::{IOS_AND_NXOS, capture, output_file, require_os};
use crate::error::Result;
use crate::output::write_rows;
use crate::parse::parse_cdp_detail;
use crate::session::Session;
use crate::settings::Settings;

/// Run the CDP report. Returns the written file path.
pub async fn run<S: Session>(session: &mut S, settings: &Settings) -> Result<PathBuf> {
    require_os("CDP report", session.os(), IOS_AND_NXOS)?;

    let raw = capture(session, "show cdp neighbors detail").await?;
    let neighbors = parse_cdp_detail(&raw);

    let mut rows = vec![
        [
            "Local Interface",
            "Remote System Name",
            "Remote Interface",
            "IP Address",
            "Platform",
            "Capabilities",
        ]
        .map(String::from)
        .to_vec(),
    ];
    for neighbor in &neighbors {
        rows.push(vec![
            neighbor.local_interface.clone(),
            neighbor.system_name.clone(),
            neighbor.remote_interface.clone(),
            neighbor.ip_address.clone().unwrap_or_default(),
            neighbor.platform.clone(),
            neighbor.capabilities.clone(),
        ]);
    }

    let path = output_file(settings, session.hostname(), "cdp", ".csv")?;
    write_rows(&path, &rows)?;
    info!("wrote {} CDP neighbors to {}", neighbors.len(), path.display());
    Ok(path)
}
