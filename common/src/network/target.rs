//! # Reverse Lookup Target
//!
//! Input of a reverse-mapping scan: either one address or a network whose
//! usable hosts are looked up one by one.

use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{BamError, Result};
use crate::network::range::{self, AddressRange};

/// Largest expansion a reverse scan accepts unless told otherwise.
pub const DEFAULT_MAX_HOSTS: u128 = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupTarget {
    /// A single address, looked up as given.
    Host { addr: IpAddr },
    /// Every usable host of a network.
    Range { range: AddressRange },
}

impl FromStr for LookupTarget {
    type Err = BamError;

    /// Anything with a `/` is a network, everything else must be an address.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed: &str = s.trim();

        if trimmed.contains('/') {
            let range: AddressRange = range::canonicalize(trimmed)?;
            return Ok(Self::Range { range });
        }

        trimmed
            .parse::<IpAddr>()
            .map(|addr| Self::Host { addr })
            .map_err(|e| BamError::validation(format!("Invalid IP address or network '{s}': {e}")))
    }
}

impl LookupTarget {
    /// Expands the target into the addresses to look up.
    ///
    /// Refuses before producing anything when a network holds more than
    /// `max_hosts` usable addresses.
    pub fn expand(&self, max_hosts: u128) -> Result<Vec<IpAddr>> {
        match self {
            Self::Host { addr } => Ok(vec![*addr]),
            Self::Range { range } => {
                let host_count: u128 = range.usable_host_count();
                if host_count > max_hosts {
                    return Err(BamError::validation(format!(
                        "Network '{range}' would expand to {host_count} host addresses \
                         (limit {max_hosts}); refusing to scan."
                    )));
                }
                Ok(range.usable_hosts().collect())
            }
        }
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
