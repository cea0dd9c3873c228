use bamctl_common::dns::model::ReverseMapping;
use bamctl_common::dns::record::RecordView;
use bamctl_common::network::range;
use bamctl_common::network::target::DEFAULT_MAX_HOSTS;
use bamctl_core::BamApi;

use crate::commands::ListArgs;
use crate::terminal::print;

pub async fn list(api: &BamApi, args: ListArgs) -> anyhow::Result<()> {
    if let Some(target) = args.cidr {
        let mappings: Vec<ReverseMapping> = api.dns().list_reverse(&target, DEFAULT_MAX_HOSTS).await?;
        if mappings.is_empty() {
            print::no_results(&format!("No reverse records found for {target}"));
            return Ok(());
        }
        print::reverse_mappings(&mappings);
        return Ok(());
    }

    if let Some(cidr) = args.network {
        match api.networks().get(&cidr).await? {
            Some(network) => print::network(&network),
            None => print::no_results(&format!("No network found for {}", range::canonicalize(&cidr)?)),
        }
        return Ok(());
    }

    let Some(zone) = args.zone else {
        anyhow::bail!("list requires one of --zone, --cidr or --network");
    };
    let records: Vec<RecordView> = api.dns().list_zone(&zone, &args.types).await?;
    print::zone_records(&records);
    Ok(())
}
