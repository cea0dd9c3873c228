use bamctl_common::error::{BamError, Result};
use bamctl_common::network::block::select_parent;
use bamctl_common::network::model::{Network, ReconciliationResult, ReconciliationStatus};
use bamctl_common::network::range::{self, AddressRange};
use bamctl_common::utils::select::{at_most_one, exactly_one};
use tracing::{info, warn};

use crate::catalog::resources::{BlockResource, NetworkDraft, NetworkResource};
use crate::session::BamApi;

/// Network reconciliation within the session's configuration.
pub struct NetworkService<'a> {
    api: &'a BamApi,
}

impl<'a> NetworkService<'a> {
    pub(crate) fn new(api: &'a BamApi) -> Self {
        Self { api }
    }

    /// Exact-range lookup.
    async fn lookup(&self, range: &AddressRange) -> Result<Option<NetworkResource>> {
        let found: Vec<NetworkResource> = self
            .api
            .catalog()
            .networks(self.api.configuration_name(), range)
            .await?;
        at_most_one(found, &format!("Network {range}"))
    }

    async fn detail(&self, id: i64, range: &AddressRange) -> Result<Network> {
        let detail: NetworkResource = self.api.catalog().network(id).await?;
        Ok(detail.to_network(range))
    }

    pub async fn get(&self, cidr: &str) -> Result<Option<Network>> {
        let range: AddressRange = range::canonicalize(cidr)?;
        match self.lookup(&range).await? {
            Some(found) => self.detail(found.id, &range).await.map(Some),
            None => Ok(None),
        }
    }

    /// Makes sure a network with exactly this range exists.
    ///
    /// An existing network is reported as `AlreadyExists`, or refused with a
    /// conflict when `exist_ok` is false. Otherwise the network is created
    /// under the most specific configured block that contains it.
    pub async fn create(&self, cidr: &str, exist_ok: bool) -> Result<ReconciliationResult> {
        let range: AddressRange = range::canonicalize(cidr)?;

        if let Some(found) = self.lookup(&range).await? {
            if !exist_ok {
                return Err(BamError::conflict(format!(
                    "Network {range} already exists with ID {}",
                    found.id
                )));
            }

            let network: Network = match self.detail(found.id, &range).await {
                Ok(network) => network,
                Err(e) => {
                    warn!("Could not load details of network {range} (id={}): {e}", found.id);
                    Network::minimal(found.id, found.kind.clone().unwrap_or_default(), range)
                }
            };

            return Ok(ReconciliationResult {
                status: ReconciliationStatus::AlreadyExists,
                network,
                block_id: found.parent_block_id(),
            });
        }

        let candidates: &[AddressRange] = &self.api.settings().blocks;
        if candidates.is_empty() {
            return Err(BamError::validation(
                "Creating a network requires candidate blocks (set BAM_BLOCKS to space-separated CIDRs)",
            ));
        }

        let parent: AddressRange = select_parent(&range, candidates)?;
        let configuration: &str = self.api.configuration_name();
        let blocks: Vec<BlockResource> = self.api.catalog().blocks(configuration, &parent).await?;
        let block: BlockResource = exactly_one(
            blocks,
            &format!("Block {parent} in configuration '{configuration}'"),
        )?;

        let created: NetworkResource = self
            .api
            .catalog()
            .create_network(block.id, &NetworkDraft::for_range(&range))
            .await?;
        info!("Created network {range} (id={}) in block {parent} (id={})", created.id, block.id);

        Ok(ReconciliationResult {
            status: ReconciliationStatus::Created,
            network: created.to_network(&range),
            block_id: Some(block.id),
        })
    }

    /// Deletes the network with exactly this range.
    ///
    /// Returns `false` when there is none and `missing_ok` is set.
    pub async fn delete(&self, cidr: &str, missing_ok: bool) -> Result<bool> {
        let range: AddressRange = range::canonicalize(cidr)?;

        let Some(found) = self.lookup(&range).await? else {
            if missing_ok {
                return Ok(false);
            }
            return Err(BamError::not_found(format!("Network {range} not found")));
        };

        self.api.catalog().delete_network(found.id).await?;
        info!("Deleted network {range} (id={})", found.id);
        Ok(true)
    }
}
