//! VLAN usage report.
//!
//! Parses the fixed-width `show vlan brief` table and writes one row
//! per VLAN with the count of assigned ports.

use std::path::PathBuf;

use log::info;

use super::{IOS_AND_NXOS, capture, output_file, require_os};
use crate::error::Result;
use crate::output::write_rows;
use crate::parse::vlans::{fixed_columns_to_rows, vlan_summary};
use crate::session::Session;
use crate::settings::Settings;

/// Column widths of `show vlan brief` (VLAN, Name, Status, Ports).
const SHOW_VLAN_WIDTHS: [isize; 4] = [5, 33, 10, -1];

/// Run the VLAN report. Returns the written file path.
pub async fn run<S: Session>(session: &mut S, settings: &Settings) -> Result<PathBuf> {
    require_os("VLAN report", session.os(), IOS_AND_NXOS)?;

    let raw = capture(session, "show vlan brief").await?;

    let table = fixed_columns_to_rows(&raw, &SHOW_VLAN_WIDTHS);
    let summary = vlan_summary(&table, settings.show_all_vlans);

    let path = output_file(settings, session.hostname(), "ActiveVLANs", ".csv")?;
    write_rows(&path, &summary)?;
    info!("wrote {} VLANs to {}", summary.len().saturating_sub(1), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NetworkOs;
    use crate::report::testing::ScriptedSession;

    const VLAN_OUTPUT: &str = "\
VLAN Name                             Status    Ports
---- -------------------------------- --------- -------------------------------
1    default                          active    Gi1/0/5, Gi1/0/6
99   mgmt                             active    Gi1/0/48
";

    #[tokio::test]
    async fn test_vlan_report() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };

        let mut session =
            ScriptedSession::new("switch01", NetworkOs::Ios).reply("show vlan brief", VLAN_OUTPUT);

        let path = run(&mut session, &settings).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        let mut lines = written.lines();
        assert_eq!(lines.next().unwrap(), "VLAN,Name,Status,Ports");
        assert_eq!(lines.next().unwrap(), "1,default,active,2");
        assert_eq!(lines.next().unwrap(), "99,mgmt,active,1");
    }
}
