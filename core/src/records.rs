//! Zone listings and owner-name lookups over [`RecordView`]s.

use bamctl_common::dns::model::Zone;
use bamctl_common::dns::name::{self, OwnerName};
use bamctl_common::dns::record::{RecordKind, RecordView};
use bamctl_common::error::{BamError, Result};

use crate::catalog::Catalog;
use crate::catalog::normalize;
use crate::catalog::resources::{RecordAddress, ResourceRecord};

/// Lists a zone as record views, in catalog order.
///
/// With `expand_hosts` every host record costs one more call to fetch its
/// addresses and yields one view per address. Without it, a host record is a
/// single A view with no data.
pub async fn list_zone_records(
    catalog: &dyn Catalog,
    zone: &Zone,
    filter: &[RecordKind],
    expand_hosts: bool,
) -> Result<Vec<RecordView>> {
    let records: Vec<ResourceRecord> = catalog.zone_records(zone.id).await?;
    let mut views: Vec<RecordView> = Vec::with_capacity(records.len());

    for record in &records {
        if !record.is_host() {
            views.extend(normalize::generic_view(record, filter));
            continue;
        }

        if expand_hosts {
            let addresses: Vec<RecordAddress> = catalog.record_addresses(record.id).await?;
            views.extend(normalize::host_views(record, &addresses, filter));
        } else {
            views.extend(normalize::bare_host_view(record, filter));
        }
    }

    Ok(views)
}

/// Finds the one record owning `owner` in `zone`.
///
/// Names compare case-insensitively and ignore trailing dots. A host record
/// matches a filter naming A or AAAA.
pub async fn find_single_record(
    catalog: &dyn Catalog,
    zone: &Zone,
    owner: &str,
    filter: &[RecordKind],
) -> Result<RecordView> {
    let target: OwnerName = name::normalize_owner(owner, &zone.absolute_name)?;
    let key: String = name::match_key(&target.fqdn);

    let matches: Vec<RecordView> = list_zone_records(catalog, zone, &[], false)
        .await?
        .into_iter()
        .filter(|view| name::match_key(&view.name) == key)
        .filter(|view| normalize::kind_accepted(filter, view.kind))
        .collect();

    if matches.len() > 1 {
        return Err(BamError::Ambiguous {
            subject: format!("Record '{owner}' in zone '{}'", zone.absolute_name),
            ids: matches.iter().map(|view| view.id).collect(),
        });
    }

    matches.into_iter().next().ok_or_else(|| {
        BamError::not_found(format!(
            "No record found for name '{owner}' in zone '{}'",
            zone.absolute_name
        ))
    })
}

