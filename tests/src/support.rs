#![cfg(test)]
//! In-memory stand-in for the Address Manager.
//!
//! Keeps just enough state to answer the catalog port and logs every call as
//! a short `VERB subject` line so tests can assert on the exchange sequence.

use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bamctl_common::config::Settings;
use bamctl_common::error::{BamError, Result};
use bamctl_common::network::range::{self, AddressRange};
use bamctl_core::BamApi;
use bamctl_core::catalog::Catalog;
use bamctl_core::catalog::resources::{
    AddressResource, BlockResource, Configuration, NetworkDraft, NetworkResource, RawResource,
    RecordAddress, RecordDraft, ResourceRecord, View, ZoneResource,
};
use serde_json::{Value, json};

pub const CONFIGURATION: &str = "default";
pub const VIEW: &str = "external";
pub const ZONE: &str = "example.com";
pub const ZONE_ID: i64 = 500;
pub const VIEW_ID: i64 = 20;

#[derive(Default)]
pub struct State {
    pub calls: Vec<String>,
    pub configurations: Vec<(String, i64)>,
    pub views: Vec<(String, i64)>,
    pub zones: Vec<(i64, String, i64)>,
    pub blocks: Vec<(AddressRange, i64)>,
    /// Range, id, owning block.
    pub networks: Vec<(AddressRange, i64, i64)>,
    pub addresses: Vec<(IpAddr, i64)>,
    /// Records attached to an address id.
    pub address_records: Vec<(i64, Value)>,
    /// Zone id and full record JSON.
    pub records: Vec<(i64, Value)>,
    pub fail_network_detail: bool,
    pub next_id: i64,
}

#[derive(Clone, Default)]
pub struct FakeCatalog {
    state: Arc<Mutex<State>>,
}

impl FakeCatalog {
    /// A catalog holding the default configuration, view and zone.
    pub fn seeded() -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state();
            state.next_id = 1000;
            state.configurations.push((CONFIGURATION.to_string(), 1));
            state.views.push((VIEW.to_string(), VIEW_ID));
            state.zones.push((VIEW_ID, ZONE.to_string(), ZONE_ID));
        }
        fake
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.state().calls.iter().filter(|call| call.starts_with(prefix)).count()
    }

    pub fn add_block(&self, cidr: &str, id: i64) {
        self.state().blocks.push((range::canonicalize(cidr).unwrap(), id));
    }

    pub fn add_network(&self, cidr: &str, id: i64, block_id: i64) {
        self.state().networks.push((range::canonicalize(cidr).unwrap(), id, block_id));
    }

    pub fn add_record(&self, record: Value) {
        self.state().records.push((ZONE_ID, record));
    }

    pub fn add_address(&self, ip: &str, id: i64, attached: Vec<Value>) {
        let mut state = self.state();
        state.addresses.push((ip.parse().unwrap(), id));
        for record in attached {
            state.address_records.push((id, record));
        }
    }

    pub fn record_json(&self, id: i64) -> Option<Value> {
        self.state()
            .records
            .iter()
            .find(|(_, record)| record["id"] == json!(id))
            .map(|(_, record)| record.clone())
    }

    fn log(&self, call: String) {
        self.state().calls.push(call);
    }
}

pub fn settings(blocks: &str) -> Settings {
    Settings {
        host: "bam.test".to_string(),
        user: "api".to_string(),
        password: "secret".to_string(),
        configuration: CONFIGURATION.to_string(),
        blocks: range::parse_list(blocks).unwrap(),
        ..Default::default()
    }
}

pub async fn connect(fake: &FakeCatalog, blocks: &str) -> BamApi {
    BamApi::connect(settings(blocks), Box::new(fake.clone()))
        .await
        .unwrap()
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

fn network_json(range: &AddressRange, id: i64, block_id: i64) -> Value {
    let kind: &str = if range.network().is_ipv4() { "IPv4Network" } else { "IPv6Network" };
    json!({
        "id": id,
        "type": kind,
        "range": range.to_string(),
        "name": format!("net-{id}"),
        "usage": { "assigned": 0, "unassigned": range.usable_host_count() as u64, "total": range.address_count() as u64 },
        "_links": { "up": { "href": format!("/api/v2/blocks/{block_id}") } }
    })
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn login(&self) -> Result<()> {
        self.log("POST sessions".to_string());
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.log("LOGOUT".to_string());
        Ok(())
    }

    async fn configurations(&self, name: &str) -> Result<Vec<Configuration>> {
        self.log(format!("GET configurations {name}"));
        let state = self.state();
        Ok(state
            .configurations
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(n, id)| decode(json!({ "id": id, "name": n })))
            .collect())
    }

    async fn views(&self, _configuration: &str, name: &str) -> Result<Vec<View>> {
        self.log(format!("GET views {name}"));
        let state = self.state();
        Ok(state
            .views
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(n, id)| decode(json!({ "id": id, "name": n })))
            .collect())
    }

    async fn zones(&self, view_id: i64, absolute_name: &str) -> Result<Vec<ZoneResource>> {
        self.log(format!("GET zones {absolute_name}"));
        let state = self.state();
        Ok(state
            .zones
            .iter()
            .filter(|(view, name, _)| *view == view_id && name == absolute_name)
            .map(|(_, name, id)| decode(json!({ "id": id, "name": name, "absoluteName": name })))
            .collect())
    }

    async fn blocks(&self, _configuration: &str, range: &AddressRange) -> Result<Vec<BlockResource>> {
        self.log(format!("GET blocks {range}"));
        let state = self.state();
        Ok(state
            .blocks
            .iter()
            .filter(|(block, _)| block == range)
            .map(|(block, id)| decode(json!({ "id": id, "type": "IPv4Block", "range": block.to_string() })))
            .collect())
    }

    async fn networks(&self, _configuration: &str, range: &AddressRange) -> Result<Vec<NetworkResource>> {
        self.log(format!("GET networks {range}"));
        let state = self.state();
        Ok(state
            .networks
            .iter()
            .filter(|(network, _, _)| network == range)
            .map(|(network, id, block)| {
                decode(json!({
                    "id": id,
                    "type": "IPv4Network",
                    "range": network.to_string(),
                    "_links": { "up": { "href": format!("/api/v2/blocks/{block}") } }
                }))
            })
            .collect())
    }

    async fn network(&self, id: i64) -> Result<NetworkResource> {
        self.log(format!("GET networks/{id}"));
        let state = self.state();
        if state.fail_network_detail {
            return Err(BamError::api(format!("GET networks/{id} failed with 500: boom")));
        }
        state
            .networks
            .iter()
            .find(|(_, network_id, _)| *network_id == id)
            .map(|(range, id, block)| decode(network_json(range, *id, *block)))
            .ok_or_else(|| BamError::not_found(format!("Network {id} not found")))
    }

    async fn create_network(&self, block_id: i64, draft: &NetworkDraft) -> Result<NetworkResource> {
        self.log(format!("POST blocks/{block_id}/networks {}", draft.range));
        let mut state = self.state();
        let range: AddressRange = range::canonicalize(&draft.range)?;
        if state.networks.iter().any(|(network, _, _)| *network == range) {
            return Err(BamError::conflict(format!("Network {range} already exists")));
        }
        state.next_id += 1;
        let id: i64 = state.next_id;
        state.networks.push((range, id, block_id));
        Ok(decode(network_json(&range, id, block_id)))
    }

    async fn delete_network(&self, id: i64) -> Result<()> {
        self.log(format!("DELETE networks/{id}"));
        self.state().networks.retain(|(_, network_id, _)| *network_id != id);
        Ok(())
    }

    async fn addresses(&self, _configuration: &str, addr: IpAddr) -> Result<Vec<AddressResource>> {
        self.log(format!("GET addresses {addr}"));
        let state = self.state();
        Ok(state
            .addresses
            .iter()
            .filter(|(ip, _)| *ip == addr)
            .map(|(ip, id)| decode(json!({ "id": id, "type": "IPv4Address", "address": ip.to_string() })))
            .collect())
    }

    async fn address_records(&self, address_id: i64) -> Result<Vec<ResourceRecord>> {
        self.log(format!("GET addresses/{address_id}/resourceRecords"));
        let state = self.state();
        Ok(state
            .address_records
            .iter()
            .filter(|(owner, _)| *owner == address_id)
            .map(|(_, record)| decode(record.clone()))
            .collect())
    }

    async fn zone_records(&self, zone_id: i64) -> Result<Vec<ResourceRecord>> {
        self.log(format!("GET zones/{zone_id}/resourceRecords"));
        let state = self.state();
        Ok(state
            .records
            .iter()
            .filter(|(zone, _)| *zone == zone_id)
            .map(|(_, record)| {
                let mut summary = record.clone();
                if let Some(map) = summary.as_object_mut() {
                    map.remove("addresses");
                }
                decode(summary)
            })
            .collect())
    }

    async fn record_addresses(&self, record_id: i64) -> Result<Vec<RecordAddress>> {
        self.log(format!("GET resourceRecords/{record_id}/addresses"));
        let state = self.state();
        let addresses: Value = state
            .records
            .iter()
            .find(|(_, record)| record["id"] == json!(record_id))
            .and_then(|(_, record)| record.get("addresses").cloned())
            .unwrap_or_else(|| json!([]));
        Ok(decode(addresses))
    }

    async fn create_record(&self, zone_id: i64, draft: &RecordDraft) -> Result<i64> {
        self.log(format!("POST zones/{zone_id}/resourceRecords"));
        let mut state = self.state();
        state.next_id += 1;
        let id: i64 = state.next_id;
        let mut record: Value = json!(draft);
        record["id"] = json!(id);
        state.records.push((zone_id, record));
        Ok(id)
    }

    async fn record(&self, id: i64) -> Result<RawResource> {
        self.log(format!("GET resourceRecords/{id}"));
        let state = self.state();
        let (_, record) = state
            .records
            .iter()
            .find(|(_, record)| record["id"] == json!(id))
            .ok_or_else(|| BamError::not_found(format!("Record {id} not found")))?;

        let mut raw: RawResource = record.as_object().cloned().unwrap_or_default();
        raw.insert(
            "_links".to_string(),
            json!({ "self": { "href": format!("/api/v2/resourceRecords/{id}") } }),
        );
        Ok(raw)
    }

    async fn replace_record(&self, id: i64, body: &RawResource) -> Result<RawResource> {
        self.log(format!("PUT resourceRecords/{id}"));
        let mut state = self.state();
        let slot = state
            .records
            .iter_mut()
            .find(|(_, record)| record["id"] == json!(id))
            .ok_or_else(|| BamError::not_found(format!("Record {id} not found")))?;
        slot.1 = Value::Object(body.clone());
        Ok(body.clone())
    }

    async fn delete_record(&self, id: i64) -> Result<()> {
        self.log(format!("DELETE resourceRecords/{id}"));
        let mut state = self.state();
        let before: usize = state.records.len();
        state.records.retain(|(_, record)| record["id"] != json!(id));
        if state.records.len() == before {
            return Err(BamError::not_found(format!("Record {id} not found")));
        }
        Ok(())
    }
}
