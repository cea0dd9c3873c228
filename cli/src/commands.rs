pub mod add;
pub mod delete;
pub mod list;
pub mod update;

use bamctl_common::config::SettingsOverrides;
use bamctl_common::dns::record::RecordKind;
use bamctl_core::services::DEFAULT_TTL;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bamctl")]
#[command(about = "BlueCat Address Manager REST v2 DNS and network helper.")]
pub struct CommandLine {
    /// BAM base URL or hostname (env: BAM_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,
    /// BAM API username (env: BAM_USER)
    #[arg(long, global = true)]
    pub user: Option<String>,
    /// BAM API password (env: BAM_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,
    /// Configuration name (env: BAM_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// DNS view name (env: BAM_VIEW)
    #[arg(long, global = true)]
    pub view: Option<String>,
    /// Disable TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,
    /// Log every HTTP exchange
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List DNS records, reverse mappings or a network
    #[command(alias = "ls")]
    List(ListArgs),
    /// Create a DNS record or a network
    Add(AddArgs),
    /// Delete a DNS record or a network
    #[command(alias = "rm")]
    Delete(DeleteArgs),
    /// Update an existing DNS record
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selector").required(true).args(["zone", "cidr", "network"])))]
pub struct ListArgs {
    /// DNS zone, e.g. example.com
    #[arg(long)]
    pub zone: Option<String>,
    /// IP address or CIDR to list reverse mappings for
    #[arg(long)]
    pub cidr: Option<String>,
    /// Network CIDR to show (exact range)
    #[arg(long)]
    pub network: Option<String>,
    /// Only list these record types (repeatable)
    #[arg(short = 't', long = "type", conflicts_with_all = ["cidr", "network"])]
    pub types: Vec<RecordKind>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selector").required(true).args(["zone", "network"])))]
pub struct AddArgs {
    /// DNS zone the record is created in
    #[arg(long)]
    pub zone: Option<String>,
    /// Network CIDR to create
    #[arg(long)]
    pub network: Option<String>,
    /// Owner name, absolute or relative to the zone
    #[arg(long, requires = "zone", required_unless_present = "network")]
    pub name: Option<String>,
    #[arg(short = 't', long = "type", requires = "zone", required_unless_present = "network")]
    pub kind: Option<RecordKind>,
    /// Record data: IP address for A/AAAA, target or text otherwise
    #[arg(long, requires = "zone", required_unless_present = "network")]
    pub data: Option<String>,
    #[arg(long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,
    /// For A/AAAA: create the reverse record as well
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true",
        value_parser = parse_bool
    )]
    pub with_reverse: bool,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selector").required(true).args(["id", "network", "zone"])))]
pub struct DeleteArgs {
    /// Record id to delete
    #[arg(long)]
    pub id: Option<i64>,
    /// Network CIDR to delete (exact range)
    #[arg(long)]
    pub network: Option<String>,
    /// DNS zone of the record to delete by name
    #[arg(long, requires = "name")]
    pub zone: Option<String>,
    #[arg(long, requires = "zone")]
    pub name: Option<String>,
    #[arg(short = 't', long = "type", requires = "zone")]
    pub kind: Option<RecordKind>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("selector").required(true).args(["id", "zone"])))]
#[command(group(ArgGroup::new("change").required(true).multiple(true).args(["ttl", "data", "with_reverse"])))]
pub struct UpdateArgs {
    /// Record id to update
    #[arg(long)]
    pub id: Option<i64>,
    /// DNS zone of the record to update by name
    #[arg(long, requires = "name")]
    pub zone: Option<String>,
    #[arg(long, requires = "zone")]
    pub name: Option<String>,
    /// Narrows the name lookup; also the type written to generic records
    #[arg(short = 't', long = "type")]
    pub kind: Option<RecordKind>,
    #[arg(long)]
    pub ttl: Option<u32>,
    #[arg(long)]
    pub data: Option<String>,
    /// For host records: set the reverse flag
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = parse_bool)]
    pub with_reverse: Option<bool>,
}

impl CommandLine {
    /// Flag values that replace environment settings.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            host: self.host.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            configuration: self.config.clone(),
            view: self.view.clone(),
            verify_tls: self.insecure.then_some(false),
            ..Default::default()
        }
    }
}

pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "0" => Ok(false),
        _ => Err(format!("expected boolean value (true/false), got '{value}'")),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
