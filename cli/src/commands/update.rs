use bamctl_common::dns::record::{RecordUpdate, RecordView};
use bamctl_core::BamApi;

use crate::commands::UpdateArgs;
use crate::terminal::print;

pub async fn update(api: &BamApi, args: UpdateArgs) -> anyhow::Result<()> {
    let id: i64 = match (args.id, &args.zone, &args.name) {
        (Some(id), _, _) => id,
        (None, Some(zone), Some(name)) => api.dns().find_record(zone, name, args.kind).await?.id,
        _ => anyhow::bail!("update requires --id or --zone and --name"),
    };

    let change = RecordUpdate {
        ttl: args.ttl,
        data: args.data,
        kind_hint: args.kind,
        with_reverse: args.with_reverse,
    };
    if change.is_empty() {
        anyhow::bail!("update requires at least one of --ttl, --data or --with-reverse");
    }

    let updated: Option<RecordView> = api.dns().update_record(id, &change).await?;
    print::print_status(format!("Updated record ID {id}"));
    if let Some(view) = updated {
        print::zone_records(std::slice::from_ref(&view));
    }
    Ok(())
}
