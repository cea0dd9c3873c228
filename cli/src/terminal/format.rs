use colored::*;

use bamctl_common::dns::model::ReverseMapping;
use bamctl_common::dns::record::RecordView;
use bamctl_common::network::model::Network;

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn record_header() -> String {
    format!("{:>8}  {:<6}  {:>6}  {:<50}  DATA", "ID", "TYPE", "TTL", "NAME")
}

pub fn record_row(record: &RecordView) -> String {
    format!(
        "{:>8}  {:<6}  {:>6}  {:<50}  {}",
        record.id,
        record.kind.as_str(),
        or_dash(record.ttl),
        record.name,
        record.data.as_deref().unwrap_or_default()
    )
}

pub fn reverse_header() -> String {
    format!("{:<39}  {:<60}  {:>6}  {:>10}", "IP", "PTR-NAME", "TTL", "ID")
}

pub fn reverse_row(mapping: &ReverseMapping) -> String {
    format!(
        "{:<39}  {:<60}  {:>6}  {:>10}",
        mapping.address.to_string(),
        mapping.target,
        or_dash(mapping.ttl),
        mapping.record_id.map(|id| id.to_string()).unwrap_or_default()
    )
}

/// Key/value lines describing a network; empty attributes are left out.
pub fn network_details(network: &Network) -> Vec<(String, ColoredString)> {
    let mut details: Vec<(String, ColoredString)> = vec![
        ("ID".to_string(), network.id.to_string().bright_white()),
        ("Type".to_string(), network.kind.normal()),
    ];

    let optional = [
        ("Name", &network.name),
        ("Gateway", &network.gateway),
        ("View", &network.default_view),
        ("Location", &network.location),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            details.push((key.to_string(), value.normal()));
        }
    }

    if network.usage.is_some() {
        let usage: String = format!(
            "{} assigned, {} unassigned, {} total",
            or_dash(network.usage_counter("assigned")),
            or_dash(network.usage_counter("unassigned")),
            or_dash(network.usage_counter("total"))
        );
        details.push(("Usage".to_string(), usage.normal()));
    }

    details
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
