//! Interface statistics report.
//!
//! Scrapes `show interface` and exports the per-interface counters
//! (packets, rates, errors) the template extracts.

use std::path::PathBuf;

use log::info;

use super::{IOS_AND_NXOS, capture, output_file, require_os};
use crate::error::Result;
use crate::output::write_rows;
use crate::parse::textfsm::{parse_with_template_file, records_to_rows, template_path};
use crate::session::Session;
use crate::settings::Settings;

/// Template Values this report expects, in output order.
const COLUMNS: [&str; 12] = [
    "INTERFACE",
    "LINK_STATUS",
    "PROTOCOL_STATUS",
    "DESCRIPTION",
    "IP_ADDRESS",
    "MTU",
    "INPUT_PACKETS",
    "INPUT_RATE",
    "INPUT_ERRORS",
    "OUTPUT_PACKETS",
    "OUTPUT_RATE",
    "OUTPUT_ERRORS",
];

const HEADER: [&str; 12] = [
    "Interface",
    "Link",
    "Protocol",
    "Description",
    "IP Address",
    "MTU",
    "Input Packets",
    "Input Rate (bps)",
    "Input Errors",
    "Output Packets",
    "Output Rate (bps)",
    "Output Errors",
];

/// Run the interface statistics report. Returns the written file path.
pub async fn run<S: Session>(session: &mut S, settings: &Settings) -> Result<PathBuf> {
    require_os("Interface statistics report", session.os(), IOS_AND_NXOS)?;

    let raw = capture(session, "show interface").await?;

    let template = template_path(&settings.template_dir, session.os(), "show-interfaces");
    let records = parse_with_template_file(&raw, &template)?;

    let mut rows = vec![HEADER.map(String::from).to_vec()];
    rows.extend(records_to_rows(&records, &COLUMNS)?);

    let path = output_file(settings, session.hostname(), "show-interfaces", ".csv")?;
    write_rows(&path, &rows)?;
    info!(
        "wrote statistics for {} interfaces to {}",
        rows.len() - 1,
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NetworkOs;
    use crate::report::testing::ScriptedSession;

    #[tokio::test]
    async fn test_refuses_asa() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        let mut session = ScriptedSession::new("asa-fw", NetworkOs::Asa);
        assert!(run(&mut session, &settings).await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            template_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        // No scripted reply for "show interface".
        let mut session = ScriptedSession::new("switch01", NetworkOs::Ios);
        assert!(run(&mut session, &settings).await.is_err());
    }
}
