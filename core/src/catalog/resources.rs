//! Wire shapes of the REST v2 resources bamctl reads and writes.
//!
//! These mirror the JSON the catalog returns. They never leave the core crate
//! unconverted: networks become [`Network`], zones become [`Zone`] and records
//! go through [`crate::catalog::normalize`].

use std::net::IpAddr;

use bamctl_common::dns::model::Zone;
use bamctl_common::dns::name::OwnerName;
use bamctl_common::dns::record::RecordKind;
use bamctl_common::error::{BamError, Result};
use bamctl_common::network::model::Network;
use bamctl_common::network::range::{self, AddressFamily, AddressRange};
use bamctl_common::utils::select::Identified;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Full JSON representation of a resource, used for read-modify-write.
pub type RawResource = Map<String, Value>;

pub const HOST_RECORD: &str = "HostRecord";
pub const ALIAS_RECORD: &str = "AliasRecord";

#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct View {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResource {
    pub id: i64,
    pub name: Option<String>,
    pub absolute_name: Option<String>,
}

impl ZoneResource {
    pub fn into_zone(self, view_id: i64, requested: &str) -> Zone {
        let absolute_name: String = self
            .absolute_name
            .or(self.name)
            .unwrap_or_else(|| requested.to_string());

        Zone {
            id: self.id,
            absolute_name: absolute_name.trim_end_matches('.').to_string(),
            view_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockResource {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    pub up: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResource {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub range: Option<String>,
    pub name: Option<String>,
    pub gateway: Option<String>,
    pub default_view: Option<Value>,
    pub location: Option<Value>,
    pub usage: Option<Value>,
    pub user_defined_fields: Option<Value>,
    #[serde(rename = "_links")]
    pub links: Option<Links>,
}

impl NetworkResource {
    /// Block id taken from the `up` link (`.../blocks/<id>`).
    pub fn parent_block_id(&self) -> Option<i64> {
        let href: &str = self.links.as_ref()?.up.as_ref()?.href.as_deref()?;
        href.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }

    /// Projects the resource, using `requested` when the range is missing or unreadable.
    pub fn to_network(&self, requested: &AddressRange) -> Network {
        let range: AddressRange = self
            .range
            .as_deref()
            .and_then(|raw| range::canonicalize(raw).ok())
            .unwrap_or(*requested);

        Network {
            id: self.id,
            kind: self.kind.clone().unwrap_or_default(),
            range,
            name: self.name.clone(),
            gateway: self.gateway.clone(),
            default_view: self.default_view.as_ref().and_then(reference_name),
            location: self.location.as_ref().and_then(reference_name),
            usage: self.usage.as_ref().and_then(Value::as_object).cloned(),
            custom_fields: self.user_defined_fields.as_ref().and_then(Value::as_object).cloned(),
        }
    }
}

/// Embedded references come as `{id, name, ...}`; some deployments send a bare name.
fn reference_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("name")?.as_str().map(str::to_string),
        Value::String(name) => Some(name.clone()),
        _ => None,
    }
}

/// A stand-alone address object.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressResource {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub address: Option<String>,
    pub name: Option<String>,
}

/// Address sub-object attached to a host record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAddress {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub address: Option<String>,
}

impl RecordAddress {
    pub fn for_addr(addr: &IpAddr) -> Self {
        Self {
            kind: Some(address_type(AddressFamily::of(addr)).to_string()),
            address: Some(addr.to_string()),
        }
    }
}

/// Any resource record: host, generic, alias, ...
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    pub name: Option<String>,
    pub absolute_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_ttl")]
    pub ttl: Option<u32>,
    pub record_type: Option<String>,
    pub rdata: Option<String>,
    pub reverse_record: Option<bool>,
}

impl ResourceRecord {
    pub fn is_host(&self) -> bool {
        self.resource_type == HOST_RECORD
    }
}

/// TTLs arrive as numbers or numeric strings; anything else reads as absent.
fn lenient_ttl<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_u64().and_then(|ttl| u32::try_from(ttl).ok()),
        Some(Value::String(text)) => text.trim().parse::<u32>().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub range: String,
}

impl NetworkDraft {
    pub fn for_range(range: &AddressRange) -> Self {
        let kind: &str = match range.family() {
            AddressFamily::V4 => "IPv4Network",
            AddressFamily::V6 => "IPv6Network",
        };
        Self {
            kind: kind.to_string(),
            range: range.to_string(),
        }
    }
}

/// Body of a record create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum RecordDraft {
    #[serde(rename = "HostRecord", rename_all = "camelCase")]
    Host {
        name: String,
        absolute_name: String,
        ttl: u32,
        reverse_record: bool,
        addresses: Vec<RecordAddress>,
    },
    #[serde(rename = "GenericRecord", rename_all = "camelCase")]
    Generic {
        name: String,
        absolute_name: String,
        ttl: u32,
        record_type: String,
        rdata: String,
    },
}

impl RecordDraft {
    /// A/AAAA become host records carrying one address; everything else is generic.
    pub fn new(kind: RecordKind, owner: &OwnerName, data: &str, ttl: u32, with_reverse: bool) -> Result<Self> {
        let name: String = if owner.label.is_empty() {
            owner.fqdn.clone()
        } else {
            owner.label.clone()
        };
        let absolute_name: String = owner.fqdn.clone();

        if kind.is_address() {
            let addr: IpAddr = parse_ip(data)?;
            return Ok(Self::Host {
                name,
                absolute_name,
                ttl,
                reverse_record: with_reverse,
                addresses: vec![RecordAddress::for_addr(&addr)],
            });
        }

        Ok(Self::Generic {
            name,
            absolute_name,
            ttl,
            record_type: kind.as_str().to_string(),
            rdata: data.to_string(),
        })
    }
}

pub fn address_type(family: AddressFamily) -> &'static str {
    match family {
        AddressFamily::V4 => "IPv4Address",
        AddressFamily::V6 => "IPv6Address",
    }
}

pub fn parse_ip(data: &str) -> Result<IpAddr> {
    data.trim()
        .parse::<IpAddr>()
        .map_err(|e| BamError::validation(format!("Invalid IP address '{data}': {e}")))
}

impl Identified for Configuration {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for View {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for ZoneResource {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for BlockResource {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for NetworkResource {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for AddressResource {
    fn id(&self) -> i64 {
        self.id
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
