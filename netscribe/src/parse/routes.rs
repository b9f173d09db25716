//! Route table model for `show ip route` output.

use std::fmt;
use std::net::Ipv4Addr;

use super::textfsm::{Record, column};
use crate::error::{ParseError, Result};

/// An IPv4 prefix with containment checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Network {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Network {
    /// Create a network, masking the address down to the prefix.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self> {
        if prefix > 32 {
            return Err(ParseError::InvalidField {
                what: "prefix length",
                value: prefix.to_string(),
            }
            .into());
        }
        let masked = Ipv4Addr::from(u32::from(addr) & Self::mask_bits(prefix));
        Ok(Self {
            addr: masked,
            prefix,
        })
    }

    /// Parse a network from the TextFSM `NETWORK`/`MASK` pair. The
    /// mask may be a prefix length ("24") or dotted ("255.255.255.0").
    pub fn from_parts(network: &str, mask: &str) -> Result<Self> {
        let addr: Ipv4Addr = network.parse().map_err(|_| ParseError::InvalidField {
            what: "network address",
            value: network.to_string(),
        })?;

        let prefix = if mask.contains('.') {
            let mask_addr: Ipv4Addr = mask.parse().map_err(|_| ParseError::InvalidField {
                what: "network mask",
                value: mask.to_string(),
            })?;
            u32::from(mask_addr).leading_ones() as u8
        } else {
            mask.parse().map_err(|_| ParseError::InvalidField {
                what: "prefix length",
                value: mask.to_string(),
            })?
        };

        Self::new(addr, prefix)
    }

    /// Whether the address falls inside this prefix.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & Self::mask_bits(self.prefix) == u32::from(self.addr)
    }

    fn mask_bits(prefix: u8) -> u32 {
        if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix))
        }
    }
}

impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

/// One route table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub network: Ipv4Network,
    /// Canonical protocol name (see [`normalize_protocol`]).
    pub protocol: String,
    pub nexthop: Option<Ipv4Addr>,
    pub interface: Option<String>,
    /// Next-hop VRF, NX-OS only (`%vrf-name` after the nexthop).
    pub vrf: Option<String>,
}

/// Map a route-table protocol code to a canonical name.
pub fn normalize_protocol(raw: &str) -> String {
    let first = raw.chars().next().unwrap_or(' ');
    if first == 'S' || raw.contains("static") {
        "static".to_string()
    } else if first == 'C' || raw.contains("direct") {
        "connected".to_string()
    } else if first == 'L' || raw.contains("local") {
        "local".to_string()
    } else if first == 'D' {
        "eigrp".to_string()
    } else if first == 'O' {
        "ospf".to_string()
    } else if first == 'B' {
        "bgp".to_string()
    } else if first == 'i' {
        "isis".to_string()
    } else if first == 'R' {
        "rip".to_string()
    } else {
        raw.to_string()
    }
}

/// Build route entries from TextFSM records.
///
/// Expected template Values: `NETWORK`, `MASK`, `PROTOCOL`,
/// `NEXTHOP_IP`, `NEXTHOP_IF` and (NX-OS) `NEXTHOP_VRF`. Empty
/// captures become `None`.
pub fn routes_from_records(records: &[Record]) -> Result<Vec<RouteEntry>> {
    let mut routes = Vec::with_capacity(records.len());
    for record in records {
        let network =
            Ipv4Network::from_parts(column(record, "NETWORK")?, column(record, "MASK")?)?;

        let nexthop = match column(record, "NEXTHOP_IP")? {
            "" => None,
            ip => Some(ip.parse().map_err(|_| ParseError::InvalidField {
                what: "nexthop address",
                value: ip.to_string(),
            })?),
        };

        let interface = match column(record, "NEXTHOP_IF")? {
            "" => None,
            name => Some(name.to_string()),
        };

        // NEXTHOP_VRF only exists in the NX-OS template.
        let vrf = record
            .get("NEXTHOP_VRF")
            .filter(|v| !v.is_empty())
            .cloned();

        routes.push(RouteEntry {
            network,
            protocol: normalize_protocol(column(record, "PROTOCOL")?),
            nexthop,
            interface,
            vrf,
        });
    }
    Ok(routes)
}

/// Fill in missing egress interfaces by looking the next-hop up
/// through connected networks, chasing static routes recursively.
///
/// IOS prints recursive routes (typically BGP) without an interface;
/// the interface is whatever connected network covers the next-hop,
/// possibly via one or more static hops.
pub fn fill_empty_interfaces(routes: &mut [RouteEntry]) {
    let connected: Vec<(Ipv4Network, String)> = routes
        .iter()
        .filter(|r| r.protocol == "connected")
        .filter_map(|r| r.interface.clone().map(|i| (r.network, i)))
        .collect();

    let statics: Vec<(Ipv4Network, Ipv4Addr)> = routes
        .iter()
        .filter(|r| r.protocol == "static")
        .filter_map(|r| r.nexthop.map(|nh| (r.network, nh)))
        .collect();

    fn lookup(
        nexthop: Ipv4Addr,
        connected: &[(Ipv4Network, String)],
        statics: &[(Ipv4Network, Ipv4Addr)],
        depth: u8,
    ) -> Option<String> {
        // Static chains are short; the depth guard only breaks loops.
        if depth == 0 {
            return None;
        }
        for (network, interface) in connected {
            if network.contains(nexthop) {
                return Some(interface.clone());
            }
        }
        for (network, static_nexthop) in statics {
            if network.contains(nexthop) {
                return lookup(*static_nexthop, connected, statics, depth - 1);
            }
        }
        None
    }

    for route in routes.iter_mut() {
        if route.interface.is_none() {
            if let Some(nexthop) = route.nexthop {
                route.interface = lookup(nexthop, &connected, &statics, 16);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(
        network: &str,
        prefix: u8,
        protocol: &str,
        nexthop: Option<&str>,
        interface: Option<&str>,
    ) -> RouteEntry {
        RouteEntry {
            network: Ipv4Network::new(network.parse().unwrap(), prefix).unwrap(),
            protocol: protocol.to_string(),
            nexthop: nexthop.map(|n| n.parse().unwrap()),
            interface: interface.map(str::to_string),
            vrf: None,
        }
    }

    #[test]
    fn test_network_contains() {
        let net = Ipv4Network::from_parts("10.1.0.0", "16").unwrap();
        assert!(net.contains("10.1.200.3".parse().unwrap()));
        assert!(!net.contains("10.2.0.1".parse().unwrap()));
    }

    #[test]
    fn test_dotted_mask() {
        let net = Ipv4Network::from_parts("192.168.4.0", "255.255.252.0").unwrap();
        assert_eq!(net.to_string(), "192.168.4.0/22");
        assert!(net.contains("192.168.7.255".parse().unwrap()));
    }

    #[test]
    fn test_host_address_masked_to_prefix() {
        let net = Ipv4Network::new("10.5.5.5".parse().unwrap(), 24).unwrap();
        assert_eq!(net.to_string(), "10.5.5.0/24");
    }

    #[test]
    fn test_normalize_protocol() {
        assert_eq!(normalize_protocol("S*"), "static");
        assert_eq!(normalize_protocol("C"), "connected");
        assert_eq!(normalize_protocol("L"), "local");
        assert_eq!(normalize_protocol("D EX"), "eigrp");
        assert_eq!(normalize_protocol("O IA"), "ospf");
        assert_eq!(normalize_protocol("B"), "bgp");
        assert_eq!(normalize_protocol("i L1"), "isis");
        assert_eq!(normalize_protocol("R"), "rip");
        assert_eq!(normalize_protocol("direct"), "connected");
        assert_eq!(normalize_protocol("hsrp"), "hsrp");
    }

    #[test]
    fn test_fill_interfaces_from_connected() {
        let mut routes = vec![
            route("10.0.0.0", 24, "connected", None, Some("Vlan10")),
            route("172.16.0.0", 16, "bgp", Some("10.0.0.1"), None),
        ];
        fill_empty_interfaces(&mut routes);
        assert_eq!(routes[1].interface.as_deref(), Some("Vlan10"));
    }

    #[test]
    fn test_fill_interfaces_through_static() {
        let mut routes = vec![
            route("10.0.0.0", 24, "connected", None, Some("Gi0/1")),
            route("192.168.50.0", 24, "static", Some("10.0.0.254"), Some("Gi0/1")),
            route("172.20.0.0", 16, "bgp", Some("192.168.50.7"), None),
        ];
        fill_empty_interfaces(&mut routes);
        assert_eq!(routes[2].interface.as_deref(), Some("Gi0/1"));
    }

    #[test]
    fn test_fill_interfaces_static_loop_terminates() {
        let mut routes = vec![
            route("10.1.0.0", 16, "static", Some("10.2.0.1"), None),
            route("10.2.0.0", 16, "static", Some("10.1.0.1"), None),
            route("172.31.0.0", 16, "bgp", Some("10.1.0.9"), None),
        ];
        fill_empty_interfaces(&mut routes);
        assert_eq!(routes[2].interface, None);
    }

    #[test]
    fn test_routes_from_records() {
        let mut record = Record::new();
        record.insert("NETWORK".into(), "10.4.0.0".into());
        record.insert("MASK".into(), "24".into());
        record.insert("PROTOCOL".into(), "O".into());
        record.insert("NEXTHOP_IP".into(), "10.0.0.2".into());
        record.insert("NEXTHOP_IF".into(), "".into());

        let routes = routes_from_records(&[record]).unwrap();
        assert_eq!(routes[0].protocol, "ospf");
        assert_eq!(routes[0].nexthop, Some("10.0.0.2".parse().unwrap()));
        assert_eq!(routes[0].interface, None);
        assert_eq!(routes[0].vrf, None);
    }
}
