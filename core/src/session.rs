//! # Session Facade
//!
//! [`BamApi`] is one authenticated conversation with the Address Manager,
//! scoped to a single configuration. Network and DNS operations are reached
//! through the borrowed handles returned by [`BamApi::networks`] and
//! [`BamApi::dns`].

use bamctl_common::config::Settings;
use bamctl_common::dns::model::Zone;
use bamctl_common::error::{BamError, Result};
use bamctl_common::utils::select::exactly_one;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::catalog::Catalog;
use crate::catalog::http::BlueCatClient;
use crate::catalog::resources::{Configuration, View, ZoneResource};
use crate::services::{DnsService, NetworkService};

pub struct BamApi {
    settings: Settings,
    catalog: Box<dyn Catalog>,
    configuration: Configuration,
    /// Resolved on first DNS use, then kept for the session.
    view: OnceCell<View>,
}

impl BamApi {
    /// Connects to the host named in `settings` over HTTP.
    pub async fn open(settings: Settings) -> Result<Self> {
        let client: BlueCatClient = BlueCatClient::new(&settings)?;
        Self::connect(settings, Box::new(client)).await
    }

    /// Validates `settings`, logs in and resolves the configuration.
    pub async fn connect(settings: Settings, catalog: Box<dyn Catalog>) -> Result<Self> {
        settings.validate()?;
        catalog.login().await?;

        let subject: String = format!("Configuration '{}'", settings.configuration);
        let configuration: Configuration =
            exactly_one(catalog.configurations(&settings.configuration).await?, &subject)?;
        debug!("Using configuration '{}' (id={})", settings.configuration, configuration.id);

        Ok(Self {
            settings,
            catalog,
            configuration,
            view: OnceCell::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Name every lookup is scoped to, as the catalog spells it.
    pub fn configuration_name(&self) -> &str {
        if self.configuration.name.is_empty() {
            &self.settings.configuration
        } else {
            &self.configuration.name
        }
    }

    pub(crate) fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub(crate) async fn view(&self) -> Result<&View> {
        self.view
            .get_or_try_init(|| async {
                let subject: String = format!("View '{}'", self.settings.view);
                let views: Vec<View> = self
                    .catalog
                    .views(self.configuration_name(), &self.settings.view)
                    .await?;
                let view: View = exactly_one(views, &subject)?;
                debug!("Using view '{}' (id={})", self.settings.view, view.id);
                Ok::<View, BamError>(view)
            })
            .await
    }

    /// Resolves a zone of the session's view by absolute name.
    pub async fn zone(&self, name: &str) -> Result<Zone> {
        let view_id: i64 = self.view().await?.id;
        let absolute_name: &str = name.trim().trim_end_matches('.');

        let zones: Vec<ZoneResource> = self.catalog.zones(view_id, absolute_name).await?;
        let zone: ZoneResource = exactly_one(zones, &format!("Zone '{absolute_name}'"))?;
        Ok(zone.into_zone(view_id, absolute_name))
    }

    pub fn networks(&self) -> NetworkService<'_> {
        NetworkService::new(self)
    }

    pub fn dns(&self) -> DnsService<'_> {
        DnsService::new(self)
    }

    /// Ends the session. Logout failures are not reported.
    pub async fn close(self) {
        if let Err(e) = self.catalog.logout().await {
            debug!("Logout failed: {e}");
        }
    }
}
