//! Operations offered by a [`crate::session::BamApi`], grouped by catalog area.

mod dns;
mod networks;

pub use dns::{DEFAULT_TTL, DnsService};
pub use networks::NetworkService;
