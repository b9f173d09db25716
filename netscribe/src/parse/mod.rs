//! Parsers turning semi-structured CLI output into tabular records.
//!
//! Template-driven parsing (TextFSM) handles the table-shaped
//! commands; CDP detail and `show vlan brief` get dedicated parsers
//! because their output is block- and fixed-width-shaped
//! respectively.

pub mod cdp;
pub mod interfaces;
pub mod mac;
pub mod routes;
pub mod textfsm;
pub mod vlans;

pub use cdp::{CdpNeighbor, extract_system_name, parse_cdp_detail};
pub use interfaces::{human_cmp, human_sort_key, long_int_name, short_int_name};
pub use mac::{ArpLookup, MacEntry, mac_entries_from_records, mac_table_by_port};
pub use routes::{
    Ipv4Network, RouteEntry, fill_empty_interfaces, normalize_protocol, routes_from_records,
};
pub use textfsm::{Record, parse_with_template_file, parse_with_template_str, records_to_rows};
pub use vlans::{fixed_columns_to_rows, vlan_summary};
