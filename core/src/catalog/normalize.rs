//! # Record Normalization
//!
//! The catalog stores A/AAAA data as host records with attached address
//! objects and everything else as generic (or alias) records with a declared
//! sub-type. This module folds both shapes into [`RecordView`] and applies
//! updates to the raw JSON of either shape, so nothing above the catalog
//! boundary has to know about the split.

use std::net::IpAddr;

use bamctl_common::dns::record::{RecordKind, RecordUpdate, RecordView};
use bamctl_common::error::{BamError, Result};
use bamctl_common::network::range::AddressFamily;
use serde_json::{Value, json};

use super::resources::{
    ALIAS_RECORD, HOST_RECORD, RawResource, RecordAddress, ResourceRecord, address_type, parse_ip,
};

/// Whether `kind` passes a listing filter. An empty filter passes everything.
pub fn wants(filter: &[RecordKind], kind: RecordKind) -> bool {
    filter.is_empty() || filter.contains(&kind)
}

/// Acceptance rule for name lookups.
///
/// Host records are matched without their addresses and always surface as A,
/// so a stored A stands for either address family.
pub fn kind_accepted(filter: &[RecordKind], kind: RecordKind) -> bool {
    if kind == RecordKind::A {
        return wants(filter, RecordKind::A) || filter.contains(&RecordKind::Aaaa);
    }
    wants(filter, kind)
}

/// Sub-type of a non-host record.
///
/// The declared `recordType` wins; otherwise the resource type is mapped
/// (`AliasRecord` is a CNAME, `MXRecord` an MX). `None` when the result is
/// not a supported kind.
pub fn declared_kind(record_type: Option<&str>, resource_type: &str) -> Option<RecordKind> {
    declared_type(record_type, resource_type)?.parse().ok()
}

/// Upper-cased sub-type label of a non-host record, supported or not.
pub fn declared_type(record_type: Option<&str>, resource_type: &str) -> Option<String> {
    if let Some(declared) = record_type.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(declared.to_ascii_uppercase());
    }
    if resource_type == ALIAS_RECORD {
        return Some(RecordKind::Cname.as_str().to_string());
    }
    let upper: String = resource_type.to_ascii_uppercase();
    upper
        .strip_suffix("RECORD")
        .filter(|label| !label.is_empty())
        .map(str::to_string)
}

/// Owner name as the catalog reports it.
pub fn owner_name(record: &ResourceRecord) -> String {
    record
        .absolute_name
        .clone()
        .or_else(|| record.name.clone())
        .unwrap_or_default()
}

/// Address kind of an attached address, by declared type then by parsing.
fn address_kind(address: &RecordAddress) -> Option<RecordKind> {
    match address.kind.as_deref() {
        Some("IPv4Address") => Some(RecordKind::A),
        Some("IPv6Address") => Some(RecordKind::Aaaa),
        _ => address
            .address
            .as_deref()
            .and_then(|raw| raw.parse::<IpAddr>().ok())
            .map(|addr| RecordKind::for_addr(&addr)),
    }
}

/// One view per attached address whose kind passes `filter`.
pub fn host_views(record: &ResourceRecord, addresses: &[RecordAddress], filter: &[RecordKind]) -> Vec<RecordView> {
    let name: String = owner_name(record);

    addresses
        .iter()
        .filter_map(|address| {
            let ip: &str = address.address.as_deref().filter(|ip| !ip.is_empty())?;
            let kind: RecordKind = address_kind(address)?;
            wants(filter, kind).then(|| RecordView {
                id: record.id,
                kind,
                name: name.clone(),
                ttl: record.ttl,
                data: Some(ip.to_string()),
            })
        })
        .collect()
}

/// Host record seen without its addresses: a single A view with no data.
pub fn bare_host_view(record: &ResourceRecord, filter: &[RecordKind]) -> Option<RecordView> {
    let relevant: bool = wants(filter, RecordKind::A) || filter.contains(&RecordKind::Aaaa);
    relevant.then(|| RecordView {
        id: record.id,
        kind: RecordKind::A,
        name: owner_name(record),
        ttl: record.ttl,
        data: None,
    })
}

/// View of a generic or alias record; `None` for unsupported or filtered kinds.
pub fn generic_view(record: &ResourceRecord, filter: &[RecordKind]) -> Option<RecordView> {
    let kind: RecordKind = declared_kind(record.record_type.as_deref(), &record.resource_type)?;
    wants(filter, kind).then(|| RecordView {
        id: record.id,
        kind,
        name: owner_name(record),
        ttl: record.ttl,
        data: record.rdata.clone(),
    })
}

/// Name a reverse-capable record points back to.
///
/// PTR records yield their rdata first; host records only count when flagged
/// for reverse and yield their own name first.
pub fn reverse_target(record: &ResourceRecord) -> Option<String> {
    let pick = |candidates: [&Option<String>; 3]| -> Option<String> {
        candidates
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .cloned()
    };

    let is_ptr: bool = record
        .record_type
        .as_deref()
        .is_some_and(|t| t.eq_ignore_ascii_case("PTR"));

    if is_ptr {
        return pick([&record.rdata, &record.absolute_name, &record.name]);
    }
    if record.is_host() && record.reverse_record == Some(true) {
        return pick([&record.absolute_name, &record.name, &record.rdata]);
    }
    None
}

/// Applies `update` to a record fetched for read-modify-write.
///
/// Returns the kind the record carries afterwards, or `None` when its
/// sub-type (PTR, SRV, ...) is outside the supported kinds. New data on a
/// generic record needs a sub-type; without one this fails before touching
/// anything.
pub fn apply_update(raw: &mut RawResource, id: i64, update: &RecordUpdate) -> Result<Option<RecordKind>> {
    let resource_type: String = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let kind: Option<RecordKind> = if resource_type == HOST_RECORD {
        let new_addr: Option<IpAddr> = update.data.as_deref().map(parse_ip).transpose()?;
        let kind: RecordKind = match &new_addr {
            Some(addr) => RecordKind::for_addr(addr),
            None => stored_address_kind(raw).unwrap_or(RecordKind::A),
        };

        if let Some(addr) = new_addr {
            raw.insert(
                "addresses".to_string(),
                json!([{ "type": address_type(AddressFamily::of(&addr)), "address": addr.to_string() }]),
            );
        }
        if let Some(with_reverse) = update.with_reverse {
            raw.insert("reverseRecord".to_string(), Value::Bool(with_reverse));
        }
        Some(kind)
    } else {
        let stored: Option<&str> = raw.get("recordType").and_then(Value::as_str);

        match &update.data {
            Some(data) => {
                let record_type: String = update
                    .kind_hint
                    .map(|hint| hint.as_str().to_string())
                    .or_else(|| declared_type(stored, &resource_type))
                    .ok_or_else(|| {
                        BamError::validation(format!(
                            "Cannot determine the record type for record {id} (type '{resource_type}')"
                        ))
                    })?;

                let kind: Option<RecordKind> = record_type.parse().ok();
                raw.insert("recordType".to_string(), Value::String(record_type));
                raw.insert("rdata".to_string(), Value::String(data.clone()));
                kind
            }
            None => update.kind_hint.or_else(|| declared_kind(stored, &resource_type)),
        }
    };

    raw.remove("_links");
    raw.remove("_embedded");
    if let Some(ttl) = update.ttl {
        raw.insert("ttl".to_string(), json!(ttl));
    }

    Ok(kind)
}

fn stored_address_kind(raw: &RawResource) -> Option<RecordKind> {
    let first: &Value = raw.get("addresses")?.as_array()?.first()?;
    let address: RecordAddress = serde_json::from_value(first.clone()).ok()?;
    address_kind(&address)
}

/// Projects a raw record after an update.
pub fn view_from_raw(raw: &RawResource, id: i64, kind: RecordKind) -> RecordView {
    let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);

    let ttl: Option<u32> = match raw.get("ttl") {
        Some(Value::Number(number)) => number.as_u64().and_then(|ttl| u32::try_from(ttl).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };

    let data: Option<String> = if kind.is_address() {
        raw.get("addresses")
            .and_then(Value::as_array)
            .and_then(|addresses| addresses.first())
            .and_then(|first| first.get("address"))
            .and_then(Value::as_str)
            .map(str::to_string)
    } else {
        text("rdata")
    };

    RecordView {
        id: raw.get("id").and_then(Value::as_i64).unwrap_or(id),
        kind,
        name: text("absoluteName").or_else(|| text("name")).unwrap_or_default(),
        ttl,
        data,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
