//! MAC address table and ARP record handling.
//!
//! The MAC and ARP tables themselves come out of TextFSM templates;
//! this module binds those records to typed entries and builds the
//! MAC-keyed lookup used by the port-map join.

use std::collections::HashMap;

use super::textfsm::{Record, column};
use crate::error::Result;

/// One MAC address table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacEntry {
    pub vlan: String,
    pub mac: String,
    pub port: String,
}

/// Expected template Values: `VLAN`, `MAC`, `PORT`.
pub fn mac_entries_from_records(records: &[Record]) -> Result<Vec<MacEntry>> {
    records
        .iter()
        .map(|record| {
            Ok(MacEntry {
                vlan: column(record, "VLAN")?.to_string(),
                mac: column(record, "MAC")?.to_string(),
                port: column(record, "PORT")?.to_string(),
            })
        })
        .collect()
}

/// Index MAC entries by port. Later entries win, matching the
/// single-host-per-access-port assumption of the port map.
pub fn mac_table_by_port(entries: &[MacEntry]) -> HashMap<String, (String, String)> {
    let mut table = HashMap::new();
    for entry in entries {
        table.insert(entry.port.clone(), (entry.mac.clone(), entry.vlan.clone()));
    }
    table
}

/// MAC-keyed ARP lookup: MAC address to (IP, VLAN learned from the SVI).
#[derive(Debug, Default)]
pub struct ArpLookup {
    map: HashMap<String, (String, Option<String>)>,
}

impl ArpLookup {
    /// Build a lookup from (ip, mac, interface) triples.
    ///
    /// `Incomplete` entries are skipped; a `VlanNNN` interface yields
    /// the VLAN id.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let mut map = HashMap::new();
        for (ip, mac, interface) in entries {
            if mac.eq_ignore_ascii_case("incomplete") {
                continue;
            }
            let vlan = interface.strip_prefix("Vlan").map(str::to_string);
            map.insert(mac.to_string(), (ip.to_string(), vlan));
        }
        Self { map }
    }

    /// Look up a MAC address.
    pub fn get(&self, mac: &str) -> Option<&(String, Option<String>)> {
        self.map.get(mac)
    }

    /// Number of usable ARP entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the lookup holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
