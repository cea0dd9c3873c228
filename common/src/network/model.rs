use serde_json::{Map, Value};

use crate::network::range::AddressRange;

/// An IP network as held by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub id: i64,
    /// Catalog type tag, e.g. `IPv4Network`.
    pub kind: String,
    pub range: AddressRange,
    pub name: Option<String>,
    pub gateway: Option<String>,
    pub default_view: Option<String>,
    pub location: Option<String>,
    pub usage: Option<Map<String, Value>>,
    pub custom_fields: Option<Map<String, Value>>,
}

impl Network {
    /// Projection carrying only identity, used when details are unavailable.
    pub fn minimal(id: i64, kind: impl Into<String>, range: AddressRange) -> Self {
        Self {
            id,
            kind: kind.into(),
            range,
            name: None,
            gateway: None,
            default_view: None,
            location: None,
            usage: None,
            custom_fields: None,
        }
    }

    /// Reads an integer usage counter such as `assigned` or `total`.
    pub fn usage_counter(&self, key: &str) -> Option<u64> {
        self.usage.as_ref()?.get(key)?.as_u64()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationStatus {
    Created,
    AlreadyExists,
}

/// Outcome of an idempotent network create.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationResult {
    pub status: ReconciliationStatus,
    pub network: Network,
    /// Owning block; always known when created, best effort otherwise.
    pub block_id: Option<i64>,
}

impl ReconciliationResult {
    pub fn created(&self) -> bool {
        self.status == ReconciliationStatus::Created
    }
}
