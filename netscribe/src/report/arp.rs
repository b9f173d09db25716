//! ARP table report.
//!
//! Besides being a report in its own right, the CSV written here is
//! the lookup input for the port-map report: column order is part of
//! the contract (IP first, MAC third, interface fifth).

use std::path::PathBuf;

use log::info;

use super::{IOS_AND_NXOS, capture, output_file, require_os};
use crate::error::Result;
use crate::output::write_rows;
use crate::parse::textfsm::{parse_with_template_file, records_to_rows, template_path};
use crate::platform::NetworkOs;
use crate::session::Session;
use crate::settings::Settings;

/// Template Values this report expects, in output order.
const COLUMNS: [&str; 5] = ["ADDRESS", "AGE", "MAC", "TYPE", "INTERFACE"];

/// Run the ARP report. Returns the written file path.
pub async fn run<S: Session>(session: &mut S, settings: &Settings) -> Result<PathBuf> {
    require_os("ARP report", session.os(), IOS_AND_NXOS)?;

    // NX-OS needs the detail form for the interface column.
    let command = match session.os() {
        NetworkOs::NxOs => "show ip arp detail",
        _ => "show ip arp",
    };
    let raw = capture(session, command).await?;

    let template = template_path(&settings.template_dir, session.os(), "show-ip-arp");
    let records = parse_with_template_file(&raw, &template)?;

    let mut rows = vec![
        ["Address", "Age", "MAC Address", "Type", "Interface"]
            .map(String::from)
            .to_vec(),
    ];
    rows.extend(records_to_rows(&records, &COLUMNS)?);

    let path = output_file(settings, session.hostname(), "arp", ".csv")?;
    write_rows(&path, &rows)?;
    info!("wrote {} ARP entries to {}", rows.len() - 1, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::ScriptedSession;

    const ARP_TEMPLATE: &str = "\
Value ADDRESS (\\d+\\.\\d+\\.\\d+\\.\\d+)
Value AGE (\\S+)
Value MAC (\\S+)
Value TYPE (\\S+)
Value INTERFACE (\\S+)

Start
  ^Internet\\s+${ADDRESS}\\s+${AGE}\\s+${MAC}\\s+${TYPE}\\s+${INTERFACE} -> Record
";

    const ARP_OUTPUT: &str = "\
Protocol  Address          Age (min)  Hardware Addr   Type   Interface
Internet  10.0.10.5               12  aabb.cc00.0100  ARPA   Vlan10
Internet  10.0.10.9                0  Incomplete      ARPA   Vlan10
";

    #[tokio::test]
    async fn test_arp_report_column_contract() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("show-ip-arp-ios"), ARP_TEMPLATE).unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            template_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };

        let mut session =
            ScriptedSession::new("core-rtr", NetworkOs::Ios).reply("show ip arp", ARP_OUTPUT);

        let path = run(&mut session, &settings).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Address,Age,MAC Address,Type,Interface"
        );
        assert_eq!(lines.next().unwrap(), "10.0.10.5,12,aabb.cc00.0100,ARPA,Vlan10");
        assert_eq!(lines.next().unwrap(), "10.0.10.9,0,Incomplete,ARPA,Vlan10");
    }

    #[tokio::test]
    async fn test_nxos_uses_detail_command() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("show-ip-arp-nxos"), ARP_TEMPLATE).unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            template_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };

        // Only the detail command is scripted; the report must pick it.
        let mut session = ScriptedSession::new("n5k", NetworkOs::NxOs)
            .reply("show ip arp detail", "Internet  10.1.1.1   5  aabb.cc00.0300  ARPA  Vlan20\n");

        assert!(run(&mut session, &settings).await.is_ok());
    }
}
