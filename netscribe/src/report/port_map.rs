//! Switchport mapping report.
//!
//! Joins the live MAC address table and interface description table
//! against a previously captured ARP CSV (see the `arp` report) to
//! show the MAC, IP and VLAN behind every physical port.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;

use super::{IOS_AND_NXOS, capture, output_file, require_os};
use crate::error::{ReportError, Result};
use crate::output::write_rows;
use crate::parse::mac::{ArpLookup, mac_entries_from_records, mac_table_by_port};
use crate::parse::textfsm::{column, parse_with_template_file, template_path};
use crate::parse::human_cmp;
use crate::session::Session;
use crate::settings::Settings;

/// Run the port-map report against a saved ARP CSV. Returns the
/// written file path.
pub async fn run<S: Session>(
    session: &mut S,
    settings: &Settings,
    arp_csv: &Path,
) -> Result<PathBuf> {
    require_os("Port map report", session.os(), IOS_AND_NXOS)?;

    let raw = capture(session, "show mac address-table").await?;
    let template = template_path(&settings.template_dir, session.os(), "show-mac-addr-table");
    let records = parse_with_template_file(&raw, &template)?;
    let mac_table = mac_table_by_port(&mac_entries_from_records(&records)?);

    let raw = capture(session, "show interface description").await?;
    let template = template_path(
        &settings.template_dir,
        session.os(),
        "show-interface-description",
    );
    let records = parse_with_template_file(&raw, &template)?;
    // Template Values: INTERFACE, DESCRIPTION.
    let mut descriptions = Vec::with_capacity(records.len());
    for record in &records {
        descriptions.push((
            column(record, "INTERFACE")?.to_string(),
            column(record, "DESCRIPTION")?.to_string(),
        ));
    }

    let arp_lookup = load_arp_csv(arp_csv)?;

    let rows = build_port_map(&descriptions, &mac_table, &arp_lookup);

    let path = output_file(settings, session.hostname(), "PortMap", ".csv")?;
    write_rows(&path, &rows)?;
    info!("wrote port map ({} ports) to {}", rows.len() - 1, path.display());
    Ok(path)
}

/// Load the MAC-keyed lookup from an ARP report CSV.
///
/// Column contract (from the `arp` report): IP address first, MAC
/// third, interface fifth; the header row is skipped.
pub fn load_arp_csv(path: &Path) -> Result<ArpLookup> {
    let arp_err = |message: String| ReportError::ArpCsv {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| arp_err(e.to_string()))?;

    let mut triples = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| arp_err(e.to_string()))?;
        if record.len() < 5 {
            return Err(arp_err(format!(
                "expected at least 5 columns, found {}",
                record.len()
            ))
            .into());
        }
        triples.push((
            record[0].to_string(),
            record[2].to_string(),
            record[4].to_string(),
        ));
    }

    Ok(ArpLookup::from_entries(
        triples.iter().map(|(ip, mac, intf)| {
            (ip.as_str(), mac.as_str(), intf.as_str())
        }),
    ))
}

/// Join descriptions, MAC table and ARP lookup into the report rows
/// (header first, ports human-sorted, VLAN SVIs excluded).
pub fn build_port_map(
    descriptions: &[(String, String)],
    mac_table: &HashMap<String, (String, String)>,
    arp_lookup: &ArpLookup,
) -> Vec<Vec<String>> {
    let mut body = Vec::new();

    for (interface, description) in descriptions {
        // Exclude VLAN interfaces.
        if interface.to_lowercase().starts_with('v') {
            continue;
        }

        let (mac, mut vlan) = match mac_table.get(interface) {
            Some((mac, vlan)) => (Some(mac.clone()), Some(vlan.clone())),
            None => (None, None),
        };

        let mut ip = None;
        if let Some(mac) = &mac {
            if let Some((found_ip, arp_vlan)) = arp_lookup.get(mac) {
                ip = Some(found_ip.clone());
                if vlan.is_none() {
                    vlan = arp_vlan.clone();
                }
            }
        }

        body.push(vec![
            interface.clone(),
            mac.unwrap_or_default(),
            ip.unwrap_or_default(),
            vlan.unwrap_or_default(),
            description.clone(),
        ]);
    }

    body.sort_by(|a, b| human_cmp(&a[0], &b[0]));

    let mut rows = vec![
        ["Interface", "MAC", "IP Address", "VLAN", "Description"]
            .map(String::from)
            .to_vec(),
    ];
    rows.extend(body);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac_table() -> HashMap<String, (String, String)> {
        let mut table = HashMap::new();
        table.insert(
            "Gi1/0/1".to_string(),
            ("aabb.cc00.0100".to_string(), "10".to_string()),
        );
        table.insert(
            "Gi1/0/10".to_string(),
            ("aabb.cc00.0200".to_string(), "20".to_string()),
        );
        table
    }

    fn arp_lookup() -> ArpLookup {
        ArpLookup::from_entries([
            ("10.0.10.5", "aabb.cc00.0100", "Vlan10"),
            ("10.0.20.9", "aabb.cc00.0200", "Vlan20"),
        ])
    }

    fn descriptions() -> Vec<(String, String)> {
        vec![
            ("Gi1/0/10".to_string(), "printer".to_string()),
            ("Gi1/0/1".to_string(), "desk 101".to_string()),
            ("Gi1/0/2".to_string(), "".to_string()),
            ("Vlan10".to_string(), "users SVI".to_string()),
        ]
    }

    #[test]
    fn test_join_and_sort() {
        let rows = build_port_map(&descriptions(), &mac_table(), &arp_lookup());

        assert_eq!(rows[0][0], "Interface");
        // Human sort: Gi1/0/1, Gi1/0/2, Gi1/0/10; the SVI is gone.
        assert_eq!(rows[1][0], "Gi1/0/1");
        assert_eq!(rows[2][0], "Gi1/0/2");
        assert_eq!(rows[3][0], "Gi1/0/10");
        assert_eq!(rows.len(), 4);

        // Full join on a populated port.
        assert_eq!(
            rows[1],
            vec!["Gi1/0/1", "aabb.cc00.0100", "10.0.10.5", "10", "desk 101"]
        );
        // Port with no MAC learned: empty MAC/IP/VLAN, description kept.
        assert_eq!(rows[2], vec!["Gi1/0/2", "", "", "", ""]);
    }

    #[test]
    fn test_load_arp_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arp.csv");
        std::fs::write(
            &path,
            "Address,Age,MAC Address,Type,Interface\n\
             10.0.10.5,12,aabb.cc00.0100,ARPA,Vlan10\n\
             10.0.10.9,0,Incomplete,ARPA,Vlan10\n",
        )
        .unwrap();

        let lookup = load_arp_csv(&path).unwrap();
        assert_eq!(lookup.len(), 1);
        assert_eq!(
            lookup.get("aabb.cc00.0100"),
            Some(&("10.0.10.5".to_string(), Some("10".to_string())))
        );
    }

    #[test]
    fn test_load_arp_csv_too_few_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arp.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();
        assert!(load_arp_csv(&path).is_err());
    }
}
