//! Next-hop summary report.
//!
//! Parses `show ip route` and writes three stacked CSV sections:
//! per-nexthop route counts by protocol, connected networks per
//! interface, and the full nexthop/network/protocol detail.

use std::collections::HashMap;
use std::path::PathBuf;

use log::info;

use super::{IOS_AND_NXOS, capture, output_file, require_os};
use crate::error::Result;
use crate::output::write_rows_flexible;
use crate::parse::routes::{RouteEntry, fill_empty_interfaces, routes_from_records};
use crate::parse::textfsm::{parse_with_template_file, template_path};
use crate::parse::human_cmp;
use crate::session::Session;
use crate::settings::Settings;

/// Protocols that do not name a next-hop router: connected and local
/// networks plus first-hop redundancy entries.
const LOCAL_PROTOS: [&str; 5] = ["connected", "local", "hsrp", "vrrp", "glbp"];

/// Run the next-hop summary, optionally for a named VRF. Returns the
/// written file path.
pub async fn run<S: Session>(
    session: &mut S,
    settings: &Settings,
    vrf: Option<&str>,
) -> Result<PathBuf> {
    require_os("Next-hop summary", session.os(), IOS_AND_NXOS)?;

    let command = match vrf {
        Some(vrf) => format!("show ip route vrf {}", vrf),
        None => "show ip route".to_string(),
    };
    let raw = capture(session, &command).await?;

    let template = template_path(&settings.template_dir, session.os(), "show-ip-route");
    let records = parse_with_template_file(&raw, &template)?;
    let mut routes = routes_from_records(&records)?;
    fill_empty_interfaces(&mut routes);

    let rows = nexthop_summary(&routes);

    // The VRF name lands in the filename so per-VRF runs do not
    // overwrite each other.
    let hostname = match vrf {
        Some(vrf) => format!("{}-VRF-{}", session.hostname(), vrf),
        None => session.hostname().to_string(),
    };
    let path = output_file(settings, &hostname, "NextHopSummary", ".csv")?;
    write_rows_flexible(&path, &rows)?;
    info!("wrote next-hop summary for {} routes to {}", routes.len(), path.display());
    Ok(path)
}

/// Reduce a route table to the three summary sections.
pub fn nexthop_summary(routes: &[RouteEntry]) -> Vec<Vec<String>> {
    // Dynamic protocols present in this table, human-sorted, define
    // the per-protocol count columns.
    let mut proto_list: Vec<String> = Vec::new();
    for route in routes {
        if !LOCAL_PROTOS.contains(&route.protocol.as_str())
            && !proto_list.contains(&route.protocol)
        {
            proto_list.push(route.protocol.clone());
        }
    }
    proto_list.sort_by(|a, b| human_cmp(a, b));

    struct Summary {
        interface: String,
        total: usize,
        counts: HashMap<String, usize>,
    }

    let mut summary: HashMap<String, Summary> = HashMap::new();
    let mut connected: HashMap<String, Vec<String>> = HashMap::new();
    let mut detailed: HashMap<String, Vec<(String, String)>> = HashMap::new();

    for route in routes {
        if LOCAL_PROTOS.contains(&route.protocol.as_str()) {
            if route.protocol == "connected" {
                if let Some(interface) = &route.interface {
                    connected
                        .entry(interface.clone())
                        .or_default()
                        .push(route.network.to_string());
                }
            }
            continue;
        }

        // Routes pointing at Null0 are policy discards; everything
        // else without a next-hop IP has nothing to summarize.
        let nexthop = match (route.nexthop, &route.interface) {
            (Some(nexthop), _) => match &route.vrf {
                Some(vrf) => format!("{}%{}", nexthop, vrf),
                None => nexthop.to_string(),
            },
            (None, Some(interface)) if interface.eq_ignore_ascii_case("null0") => {
                "discard".to_string()
            }
            _ => continue,
        };

        let entry = summary.entry(nexthop.clone()).or_insert_with(|| Summary {
            interface: route.interface.clone().unwrap_or_default(),
            total: 0,
            counts: HashMap::new(),
        });
        *entry.counts.entry(route.protocol.clone()).or_insert(0) += 1;
        entry.total += 1;

        detailed
            .entry(nexthop)
            .or_default()
            .push((route.network.to_string(), route.protocol.clone()));
    }

    let mut rows = Vec::new();

    // Section 1: per-nexthop counts by protocol.
    let mut header = vec![
        "Nexthop".to_string(),
        "Interface".to_string(),
        "Total".to_string(),
    ];
    header.extend(proto_list.iter().cloned());
    rows.push(header);

    let mut nexthops: Vec<&String> = summary.keys().collect();
    nexthops.sort_by(|a, b| human_cmp(a, b));
    for nexthop in &nexthops {
        let entry = &summary[*nexthop];
        let mut row = vec![
            (*nexthop).clone(),
            entry.interface.clone(),
            entry.total.to_string(),
        ];
        for proto in &proto_list {
            row.push(entry.counts.get(proto).copied().unwrap_or(0).to_string());
        }
        rows.push(row);
    }
    rows.push(Vec::new());

    // Section 2: connected networks per interface.
    rows.push(Vec::new());
    rows.push(vec!["Connected:".to_string()]);
    rows.push(vec!["Interface".to_string(), "Network(s)".to_string()]);
    let mut interfaces: Vec<&String> = connected.keys().collect();
    interfaces.sort_by(|a, b| human_cmp(a, b));
    for interface in &interfaces {
        let mut row = vec![(*interface).clone()];
        row.extend(connected[*interface].iter().cloned());
        rows.push(row);
    }
    rows.push(Vec::new());

    // Section 3: full route detail per nexthop.
    rows.push(Vec::new());
    rows.push(vec!["Route Details".to_string()]);
    rows.push(vec![
        "Nexthop".to_string(),
        "Network".to_string(),
        "Protocol".to_string(),
    ]);
    let mut nexthops: Vec<&String> = detailed.keys().collect();
    nexthops.sort_by(|a, b| human_cmp(a, b));
    for nexthop in &nexthops {
        for (network, protocol) in &detailed[*nexthop] {
            rows.push(vec![(*nexthop).clone(), network.clone(), protocol.clone()]);
        }
        rows.push(Vec::new());
    }

    rows
}
