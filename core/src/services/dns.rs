use std::net::IpAddr;

use bamctl_common::dns::model::{ReverseMapping, Zone};
use bamctl_common::dns::name::{self, OwnerName};
use bamctl_common::dns::record::{RecordKind, RecordUpdate, RecordView};
use bamctl_common::error::Result;
use bamctl_common::network::target::LookupTarget;
use bamctl_common::utils::select::at_most_one;
use tracing::{debug, info};

use crate::catalog::normalize;
use crate::catalog::resources::{AddressResource, RawResource, RecordDraft, ResourceRecord};
use crate::records;
use crate::session::BamApi;

/// TTL of new records unless told otherwise.
pub const DEFAULT_TTL: u32 = 3600;

/// Zone records and reverse mappings within the session's view.
pub struct DnsService<'a> {
    api: &'a BamApi,
}

impl<'a> DnsService<'a> {
    pub(crate) fn new(api: &'a BamApi) -> Self {
        Self { api }
    }

    /// Every record of `zone` whose kind is in `kinds` (all kinds when empty).
    pub async fn list_zone(&self, zone: &str, kinds: &[RecordKind]) -> Result<Vec<RecordView>> {
        let zone: Zone = self.api.zone(zone).await?;
        records::list_zone_records(self.api.catalog(), &zone, kinds, true).await
    }

    /// The single record named `name`, optionally narrowed to one kind.
    pub async fn find_record(&self, zone: &str, name: &str, kind: Option<RecordKind>) -> Result<RecordView> {
        let zone: Zone = self.api.zone(zone).await?;
        let filter: Vec<RecordKind> = kind.into_iter().collect();
        records::find_single_record(self.api.catalog(), &zone, name, &filter).await
    }

    /// Creates a record and returns its id.
    ///
    /// A/AAAA data must be an IP address. The reverse flag only applies to
    /// address records and is dropped for every other kind.
    pub async fn add_record(
        &self,
        zone: &str,
        name: &str,
        kind: RecordKind,
        data: &str,
        ttl: u32,
        with_reverse: bool,
    ) -> Result<i64> {
        let zone: Zone = self.api.zone(zone).await?;
        let owner: OwnerName = name::normalize_owner(name, &zone.absolute_name)?;
        let with_reverse: bool = with_reverse && kind.is_address();

        let draft: RecordDraft = RecordDraft::new(kind, &owner, data, ttl, with_reverse)?;
        let id: i64 = self.api.catalog().create_record(zone.id, &draft).await?;
        info!("Created {kind} record {} (id={id})", owner.fqdn);
        Ok(id)
    }

    pub async fn delete_record_by_id(&self, id: i64) -> Result<()> {
        self.api.catalog().delete_record(id).await?;
        info!("Deleted record id={id}");
        Ok(())
    }

    /// Deletes the single record named `name` and returns its id.
    pub async fn delete_record(&self, zone: &str, name: &str, kind: Option<RecordKind>) -> Result<i64> {
        let record: RecordView = self.find_record(zone, name, kind).await?;
        self.delete_record_by_id(record.id).await?;
        Ok(record.id)
    }

    /// Read-modify-write of one record.
    ///
    /// The update is applied to every record type. The returned view is
    /// `None` when the record's sub-type is outside the supported kinds.
    pub async fn update_record(&self, id: i64, update: &RecordUpdate) -> Result<Option<RecordView>> {
        let catalog = self.api.catalog();

        let mut body: RawResource = catalog.record(id).await?;
        let kind: Option<RecordKind> = normalize::apply_update(&mut body, id, update)?;
        let stored: RawResource = catalog.replace_record(id, &body).await?;
        info!("Updated record id={id}");

        let source: &RawResource = if stored.is_empty() { &body } else { &stored };
        Ok(kind.map(|kind| normalize::view_from_raw(source, id, kind)))
    }

    /// Pointer names for one address or every usable host of a network.
    ///
    /// Networks larger than `max_hosts` are refused before any lookup.
    pub async fn list_reverse(&self, target: &str, max_hosts: u128) -> Result<Vec<ReverseMapping>> {
        let hosts: Vec<IpAddr> = target.parse::<LookupTarget>()?.expand(max_hosts)?;
        let catalog = self.api.catalog();
        let configuration: &str = self.api.configuration_name();
        debug!("Looking up reverse mappings for {} address(es)", hosts.len());

        let mut mappings: Vec<ReverseMapping> = Vec::new();
        for host in hosts {
            let found: Vec<AddressResource> = catalog.addresses(configuration, host).await?;
            let subject: String = format!("Address {host} in configuration '{configuration}'");
            let Some(address) = at_most_one(found, &subject)? else {
                continue;
            };

            let address_ip: IpAddr = address
                .address
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(host);

            let attached: Vec<ResourceRecord> = catalog.address_records(address.id).await?;
            mappings.extend(attached.iter().filter_map(|record| {
                normalize::reverse_target(record).map(|target| ReverseMapping {
                    address: address_ip,
                    target,
                    record_id: Some(record.id),
                    ttl: record.ttl,
                })
            }));
        }

        Ok(mappings)
    }
}
