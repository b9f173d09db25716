//! Parser for `show cdp neighbors detail` output.
//!
//! CDP detail output is a sequence of per-neighbor blocks separated by
//! a dashed line. No TextFSM template is used here: the fields are
//! stable enough across IOS and NX-OS that a handful of anchored
//! regexes covers both.

use once_cell::sync::Lazy;
use regex::Regex;

static DEVICE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mi)^Device ID:\s*(.+?)\s*$").unwrap());
// "IP address:" on IOS, "IPv4 Address:" on NX-OS.
static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mi)^\s*IP\w* address:\s*(\S+)").unwrap());
static PLATFORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mi)^Platform:\s*([^,]+),").unwrap());
static CAPABILITIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^.*Capabilities:\s*(.+?)\s*$").unwrap());
static LOCAL_INTF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mi)^Interface:\s*([^,]+),").unwrap());
static REMOTE_INTF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)Port ID\s*\(outgoing port\):\s*(.+?)\s*$").unwrap());

static CISCO_SERIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}[A-Z0-9]{8}$").unwrap());
static IP_FORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").unwrap());

/// One CDP neighbor entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdpNeighbor {
    /// Raw device id as advertised.
    pub device_id: String,
    /// Device id with serial-number decoration removed.
    pub system_name: String,
    /// First advertised management/entry address.
    pub ip_address: Option<String>,
    /// Remote platform string.
    pub platform: String,
    /// Advertised capabilities.
    pub capabilities: String,
    /// Local interface the neighbor was heard on.
    pub local_interface: String,
    /// Remote port id.
    pub remote_interface: String,
}

/// Parse `show cdp neighbors detail` output into neighbor entries.
pub fn parse_cdp_detail(raw: &str) -> Vec<CdpNeighbor> {
    let Some(separator) = raw.lines().find(|line| line.contains("-------")) else {
        return Vec::new();
    };

    let mut neighbors = Vec::new();
    for chunk in raw.split(separator) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }

        let device_id = match capture(&DEVICE_ID, chunk) {
            Some(id) => id,
            None => continue,
        };

        neighbors.push(CdpNeighbor {
            system_name: extract_system_name(&device_id, &[]),
            device_id,
            ip_address: capture(&IP_ADDRESS, chunk),
            platform: capture(&PLATFORM, chunk).unwrap_or_default(),
            capabilities: capture(&CAPABILITIES, chunk).unwrap_or_default(),
            local_interface: capture(&LOCAL_INTF, chunk).unwrap_or_default(),
            remote_interface: capture(&REMOTE_INTF, chunk).unwrap_or_default(),
        });
    }
    neighbors
}

fn capture(regex: &Regex, chunk: &str) -> Option<String> {
    regex
        .captures(chunk)
        .map(|c| c[1].trim().trim_end_matches(',').to_string())
}

/// Extract the system name from a CDP device id.
///
/// Some systems advertise `HOSTNAME(SERIAL)`, older ones
/// `SERIAL(HOSTNAME)`. The serial component is identified by the
/// Cisco serial format and discarded. Strings from `strip_list` (a
/// domain suffix, typically) are removed from FQDN device ids; device
/// ids that are plain IP addresses pass through untouched.
pub fn extract_system_name(device_id: &str, strip_list: &[&str]) -> String {
    let mut system_name = device_id.to_string();

    if let Some((left, right)) = device_id.split_once('(') {
        let right = right.trim_end_matches(')');
        if CISCO_SERIAL.is_match(right) {
            system_name = left.to_string();
        } else if CISCO_SERIAL.is_match(left) {
            system_name = right.to_string();
        }
    }

    if system_name.contains('.') && !IP_FORM.is_match(&system_name) {
        for item in strip_list {
            if system_name.contains(item) {
                system_name = system_name.replace(item, "");
            }
        }
    }

    system_name
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
-------------------------
Device ID: dist-sw01.example.com(SSI16470L5E)
Entry address(es):
  IP address: 10.10.10.2
Platform: cisco WS-C4500X-32,  Capabilities: Router Switch IGMP
Interface: TenGigabitEthernet1/0/1,  Port ID (outgoing port): TenGigabitEthernet1/31
Holdtime : 154 sec

Version :
Cisco IOS Software, IOS-XE Software, Catalyst 4500 L3 Switch Software

advertisement version: 2
-------------------------
Device ID: access-ap07
Entry address(es):
  IP address: 10.10.20.7
Platform: cisco AIR-CAP3702I-B-K9,  Capabilities: Trans-Bridge Source-Route-Bridge
Interface: GigabitEthernet1/0/12,  Port ID (outgoing port): GigabitEthernet0
Holdtime : 143 sec
";

    #[test]
    fn test_parse_two_neighbors() {
        let neighbors = parse_cdp_detail(SAMPLE);
        assert_eq!(neighbors.len(), 2);

        let first = &neighbors[0];
        assert_eq!(first.device_id, "dist-sw01.example.com(SSI16470L5E)");
        assert_eq!(first.system_name, "dist-sw01.example.com");
        assert_eq!(first.ip_address.as_deref(), Some("10.10.10.2"));
        assert_eq!(first.platform, "cisco WS-C4500X-32");
        assert_eq!(first.capabilities, "Router Switch IGMP");
        assert_eq!(first.local_interface, "TenGigabitEthernet1/0/1");
        assert_eq!(first.remote_interface, "TenGigabitEthernet1/31");

        let second = &neighbors[1];
        assert_eq!(second.system_name, "access-ap07");
        assert_eq!(second.remote_interface, "GigabitEthernet0");
    }

    #[test]
    fn test_no_separator_yields_nothing() {
        assert!(parse_cdp_detail("Device ID: lonely").is_empty());
    }

    #[test]
    fn test_nxos_ipv4_address_field() {
        let raw = "\
-------------------------
Device ID: n5k-core(FOC1845R0LD)
Interface: Ethernet1/1,  Port ID (outgoing port): Ethernet2/12
Platform: N5K-C5672UP,  Capabilities: Router Switch
  IPv4 Address: 192.168.5.1
";
        let neighbors = parse_cdp_detail(raw);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].ip_address.as_deref(), Some("192.168.5.1"));
        assert_eq!(neighbors[0].system_name, "n5k-core");
    }

    #[test]
    fn test_extract_system_name_serial_first() {
        assert_eq!(extract_system_name("SSI16470L5E(dist-sw02)", &[]), "dist-sw02");
    }

    #[test]
    fn test_extract_system_name_plain() {
        assert_eq!(extract_system_name("core-rtr1", &[]), "core-rtr1");
    }

    #[test]
    fn test_extract_system_name_strips_domain() {
        assert_eq!(
            extract_system_name("sw1.corp.example.com", &[".corp.example.com"]),
            "sw1"
        );
    }

    #[test]
    fn test_extract_system_name_ip_passthrough() {
        assert_eq!(extract_system_name("10.1.2.3", &[".example.com"]), "10.1.2.3");
    }
}
