use bamctl_common::network::model::ReconciliationResult;
use bamctl_core::BamApi;

use crate::commands::AddArgs;
use crate::terminal::print;

pub async fn add(api: &BamApi, args: AddArgs) -> anyhow::Result<()> {
    if let Some(cidr) = args.network {
        let result: ReconciliationResult = api.networks().create(&cidr, true).await?;
        let network = &result.network;

        if result.created() {
            let block: String = result.block_id.map(|id| id.to_string()).unwrap_or_default();
            print::print_status(format!(
                "Created {} {} with ID {} (block ID {block})",
                network.kind, network.range, network.id
            ));
        } else {
            print::print_status(format!(
                "Network {} already exists with ID {}",
                network.range, network.id
            ));
        }
        return Ok(());
    }

    let (Some(zone), Some(name), Some(kind), Some(data)) = (args.zone, args.name, args.kind, args.data) else {
        anyhow::bail!("add --zone requires --name, --type and --data");
    };

    let id: i64 = api
        .dns()
        .add_record(&zone, &name, kind, &data, args.ttl, args.with_reverse)
        .await?;
    print::print_status(format!("Created {kind} {name} with ID {id}"));
    Ok(())
}
