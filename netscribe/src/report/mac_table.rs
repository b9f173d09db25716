//! MAC address table report.

use std::path::PathBuf;

use log::info;

use super::{IOS_AND_NXOS, capture, output_file, require_os};
use crate::error::Result;
use crate::output::write_rows;
use crate::parse::textfsm::{parse_with_template_file, records_to_rows, template_path};
use crate::session::Session;
use crate::settings::Settings;

/// Template Values this report expects, in output order.
const COLUMNS: [&str; 3] = ["VLAN", "MAC", "PORT"];

/// Run the MAC address table report. Returns the written file path.
pub async fn run<S: Session>(session: &mut S, settings: &Settings) -> Result<PathBuf> {
    require_os("MAC table report", session.os(), IOS_AND_NXOS)?;

    let raw = capture(session, "show mac address-table").await?;

    let template = template_path(&settings.template_dir, session.os(), "show-mac-addr-table");
    let records = parse_with_template_file(&raw, &template)?;

    let mut rows = vec![["VLAN", "MAC Address", "Port"].map(String::from).to_vec()];
    rows.extend(records_to_rows(&records, &COLUMNS)?);

    let path = output_file(settings, session.hostname(), "mac-addr", ".csv")?;
    write_rows(&path, &rows)?;
    info!("wrote {} MAC entries to {}", rows.len() - 1, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NetworkOs;
    use crate::report::testing::ScriptedSession;

    const MAC_TEMPLATE: &str = "\
Value VLAN (\\d+)
Value MAC ([0-9a-f]{4}\\.[0-9a-f]{4}\\.[0-9a-f]{4})
Value PORT (\\S+)

Start
  ^\\s*${VLAN}\\s+${MAC}\\s+\\S+\\s+${PORT} -> Record
";

    const MAC_OUTPUT: &str = "\
          Mac Address Table
-------------------------------------------
Vlan    Mac Address       Type        Ports
----    -----------       --------    -----
  10    aabb.cc00.0100    DYNAMIC     Gi1/0/1
  20    aabb.cc00.0200    DYNAMIC     Gi1/0/2
";

    #[tokio::test]
    async fn test_mac_report() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("show-mac-addr-table-ios"), MAC_TEMPLATE).unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            template_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };

        let mut session = ScriptedSession::new("switch01", NetworkOs::Ios)
            .reply("show mac address-table", MAC_OUTPUT);

        let path = run(&mut session, &settings).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        let mut lines = written.lines();
        assert_eq!(lines.next().unwrap(), "VLAN,MAC Address,Port");
        assert_eq!(lines.next().unwrap(), "10,aabb.cc00.0100,Gi1/0/1");
        assert_eq!(lines.next().unwrap(), "20,aabb.cc00.0200,Gi1/0/2");
    }

    #[tokio::test]
    async fn test_missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            output_dir: dir.path().to_path_buf(),
            template_dir: dir.path().join("nowhere"),
            ..Settings::default()
        };

        let mut session = ScriptedSession::new("switch01", NetworkOs::Ios)
            .reply("show mac address-table", "whatever");
        assert!(run(&mut session, &settings).await.is_err());
    }
}
