use colored::*;
use tracing::info;

use bamctl_common::dns::model::ReverseMapping;
use bamctl_common::dns::record::RecordView;
use bamctl_common::network::model::Network;

use crate::terminal::format;

/// Events on this target are terminal output, printed as-is.
pub const PRINT_TARGET: &str = "bamctl::print";

pub const TOTAL_WIDTH: usize = 120;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn separator() {
    print(&format!("{}", "-".repeat(TOTAL_WIDTH).bright_black()));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".bright_black();
    print(&format!("{} {}", prefix, msg.as_ref()));
}

pub fn no_results(msg: &str) {
    print_status(msg.yellow().to_string());
}

pub fn tree_head(name: &str) {
    print(&format!("{} {}", "[0]".bright_black(), name.bright_green().bold()));
}

pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    let key_width: usize = key_value_pair
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or_default();

    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key,
            ".".repeat(key_width.saturating_sub(key.len())).bright_black(),
            ":".bright_black(),
            value
        );
        print(&output);
    }
}

pub fn zone_records(records: &[RecordView]) {
    if records.is_empty() {
        no_results("No records found.");
        return;
    }

    print(&format!("{}", format::record_header().bold()));
    separator();
    for record in records {
        print(&format::record_row(record));
    }
}

pub fn reverse_mappings(mappings: &[ReverseMapping]) {
    if mappings.is_empty() {
        no_results("No reverse records found.");
        return;
    }

    print(&format!("{}", format::reverse_header().bold()));
    separator();
    for mapping in mappings {
        print(&format::reverse_row(mapping));
    }
}

pub fn network(network: &Network) {
    tree_head(&network.range.to_string());
    as_tree_one_level(format::network_details(network));
}
