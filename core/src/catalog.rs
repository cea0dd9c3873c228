//! # Catalog Port
//!
//! The remote Address Manager as seen by the session and its services.
//!
//! Every method maps onto one remote exchange and returns the raw collection
//! the catalog produced. Cardinality rules ("exactly one", "at most one") are
//! applied by the callers, so an adapter never decides what an empty or
//! crowded answer means.

use std::net::IpAddr;

use async_trait::async_trait;
use bamctl_common::error::Result;
use bamctl_common::network::range::AddressRange;

pub mod http;
pub mod normalize;
pub mod resources;

use resources::{
    AddressResource, BlockResource, Configuration, NetworkDraft, NetworkResource, RawResource,
    RecordAddress, RecordDraft, ResourceRecord, View, ZoneResource,
};

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Opens an authenticated session.
    async fn login(&self) -> Result<()>;

    /// Drops the session credential.
    async fn logout(&self) -> Result<()>;

    async fn configurations(&self, name: &str) -> Result<Vec<Configuration>>;

    async fn views(&self, configuration: &str, name: &str) -> Result<Vec<View>>;

    /// Zones of one view matching an absolute name (no trailing dot).
    async fn zones(&self, view_id: i64, absolute_name: &str) -> Result<Vec<ZoneResource>>;

    /// Blocks whose range is exactly `range`.
    async fn blocks(&self, configuration: &str, range: &AddressRange) -> Result<Vec<BlockResource>>;

    /// Networks whose range is exactly `range`.
    async fn networks(&self, configuration: &str, range: &AddressRange) -> Result<Vec<NetworkResource>>;

    /// Full detail of one network.
    async fn network(&self, id: i64) -> Result<NetworkResource>;

    async fn create_network(&self, block_id: i64, draft: &NetworkDraft) -> Result<NetworkResource>;

    async fn delete_network(&self, id: i64) -> Result<()>;

    /// Address objects holding `addr`.
    async fn addresses(&self, configuration: &str, addr: IpAddr) -> Result<Vec<AddressResource>>;

    /// Records attached to an address object.
    async fn address_records(&self, address_id: i64) -> Result<Vec<ResourceRecord>>;

    /// Every record of a zone, in catalog order.
    async fn zone_records(&self, zone_id: i64) -> Result<Vec<ResourceRecord>>;

    /// Addresses attached to a host record.
    async fn record_addresses(&self, record_id: i64) -> Result<Vec<RecordAddress>>;

    /// Creates a record and returns its id.
    async fn create_record(&self, zone_id: i64, draft: &RecordDraft) -> Result<i64>;

    async fn record(&self, id: i64) -> Result<RawResource>;

    /// Replaces a record with `body` and returns what the catalog stored.
    async fn replace_record(&self, id: i64, body: &RawResource) -> Result<RawResource>;

    async fn delete_record(&self, id: i64) -> Result<()>;
}
