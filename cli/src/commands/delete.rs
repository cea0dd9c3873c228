use bamctl_common::network::range::{self, AddressRange};
use bamctl_core::BamApi;

use crate::commands::DeleteArgs;
use crate::terminal::print;

pub async fn delete(api: &BamApi, args: DeleteArgs) -> anyhow::Result<()> {
    if let Some(cidr) = args.network {
        let canonical: AddressRange = range::canonicalize(&cidr)?;
        if api.networks().delete(&cidr, true).await? {
            print::print_status(format!("Deleted network {canonical}"));
        } else {
            print::no_results(&format!("Network {canonical} not found."));
        }
        return Ok(());
    }

    if let Some(id) = args.id {
        api.dns().delete_record_by_id(id).await?;
        print::print_status(format!("Deleted record ID {id}"));
        return Ok(());
    }

    let (Some(zone), Some(name)) = (args.zone, args.name) else {
        anyhow::bail!("delete by name requires --zone and --name");
    };
    let id: i64 = api.dns().delete_record(&zone, &name, args.kind).await?;
    print::print_status(format!("Deleted record ID {id}"));
    Ok(())
}
