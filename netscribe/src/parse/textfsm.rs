//! TextFSM template loading and parsing.
//!
//! Templates are external, declarative collaborators: they live in the
//! settings-provided template directory and are selected per network
//! OS. The parser output is a list of string-keyed records; each
//! report documents the Value names it expects from its template.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use textfsm_rust::Template;

use crate::error::{ParseError, Result};
use crate::platform::NetworkOs;

/// One parsed row: TextFSM Value name to captured text.
pub type Record = HashMap<String, String>;

/// Parse command output against an in-memory TextFSM template.
pub fn parse_with_template_str(output: &str, template: &str) -> Result<Vec<Record>> {
    let template = Template::parse_str(template).map_err(|e| ParseError::Template {
        message: e.to_string(),
    })?;

    let mut parser = template.parser();
    let records = parser
        .parse_text_to_dicts(output)
        .map_err(|e| ParseError::Template {
            message: e.to_string(),
        })?;

    Ok(records)
}

/// Parse command output against a TextFSM template file.
pub fn parse_with_template_file(output: &str, path: &Path) -> Result<Vec<Record>> {
    let template = fs::read_to_string(path).map_err(|e| ParseError::TemplateIo {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_with_template_str(output, &template)
}

/// Build the per-OS template path for a command family.
///
/// `show-mac-addr-table` on NX-OS resolves to
/// `<template_dir>/show-mac-addr-table-nxos`.
pub fn template_path(template_dir: &Path, os: NetworkOs, base: &str) -> PathBuf {
    let suffix = match os {
        NetworkOs::NxOs => "nxos",
        NetworkOs::Asa => "asa",
        _ => "ios",
    };
    template_dir.join(format!("{}-{}", base, suffix))
}

/// Fetch a required column from a record.
pub fn column<'a>(record: &'a Record, name: &str) -> Result<&'a str> {
    record
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| {
            ParseError::MissingColumn {
                column: name.to_string(),
            }
            .into()
        })
}

/// Project records onto an ordered column list, for CSV output.
pub fn records_to_rows(records: &[Record], columns: &[&str]) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut row = Vec::with_capacity(columns.len());
        for name in columns {
            row.push(column(record, name)?.to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VLAN_TEMPLATE: &str = "\
Value VLAN (\\d+)
Value NAME (\\S+)

Start
  ^${VLAN}\\s+${NAME} -> Record
";

    #[test]
    fn test_parse_with_template_str() {
        let output = "10   users\n20   servers\n";
        let records = parse_with_template_str(output, VLAN_TEMPLATE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["VLAN"], "10");
        assert_eq!(records[0]["NAME"], "users");
        assert_eq!(records[1]["VLAN"], "20");
    }

    #[test]
    fn test_records_to_rows_projection() {
        let output = "10   users\n";
        let records = parse_with_template_str(output, VLAN_TEMPLATE).unwrap();
        let rows = records_to_rows(&records, &["NAME", "VLAN"]).unwrap();
        assert_eq!(rows, vec![vec!["users".to_string(), "10".to_string()]]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let output = "10   users\n";
        let records = parse_with_template_str(output, VLAN_TEMPLATE).unwrap();
        assert!(records_to_rows(&records, &["MTU"]).is_err());
    }

    #[test]
    fn test_template_path_per_os() {
        let dir = Path::new("/opt/templates");
        assert_eq!(
            template_path(dir, NetworkOs::Ios, "show-ip-arp"),
            Path::new("/opt/templates/show-ip-arp-ios")
        );
        assert_eq!(
            template_path(dir, NetworkOs::IosXe, "show-ip-arp"),
            Path::new("/opt/templates/show-ip-arp-ios")
        );
        assert_eq!(
            template_path(dir, NetworkOs::NxOs, "show-ip-arp"),
            Path::new("/opt/templates/show-ip-arp-nxos")
        );
    }
}
