//! # Address Range Model
//!
//! Canonical IPv4/IPv6 networks as used by blocks, networks and reverse scans.
//!
//! An [`AddressRange`] is always stored in network form: host bits are masked
//! off when it is built, so two ranges are equal exactly when their string
//! forms are equal.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use pnet::ipnetwork::{self, IpNetwork};

use crate::error::{BamError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::V4 => 32,
            Self::V6 => 128,
        }
    }
}

/// A network address plus prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    network: IpNetwork,
}

impl AddressRange {
    /// Builds the range containing `addr`, masking off host bits.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Self> {
        let raw: IpNetwork = IpNetwork::new(addr, prefix)
            .map_err(|e| BamError::validation(format!("Invalid network {addr}/{prefix}: {e}")))?;
        let network: IpNetwork = IpNetwork::new(raw.network(), prefix)
            .map_err(|e| BamError::validation(format!("Invalid network {addr}/{prefix}: {e}")))?;
        Ok(Self { network })
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.network.ip())
    }

    pub fn network(&self) -> IpAddr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// True when `other` lies entirely inside this range.
    pub fn contains(&self, other: &AddressRange) -> bool {
        self.family() == other.family()
            && self.prefix() <= other.prefix()
            && self.network.contains(other.network())
    }

    /// Total number of addresses, saturating at `u128::MAX` for `::/0`.
    pub fn address_count(&self) -> u128 {
        let host_bits: u32 = u32::from(self.family().bits() - self.prefix());
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// Number of addresses [`Self::usable_hosts`] yields.
    ///
    /// IPv4 networks larger than `/31` lose their network and broadcast
    /// address. IPv6 keeps every address.
    pub fn usable_host_count(&self) -> u128 {
        match self.family() {
            AddressFamily::V4 if self.prefix() < 31 => self.address_count() - 2,
            _ => self.address_count(),
        }
    }

    pub fn usable_hosts(&self) -> impl Iterator<Item = IpAddr> + use<> {
        let family: AddressFamily = self.family();
        let offset: u128 = match family {
            AddressFamily::V4 if self.prefix() < 31 => 1,
            _ => 0,
        };
        let start: u128 = addr_to_u128(self.network()) + offset;
        let count: u128 = self.usable_host_count();

        (0..count).map(move |i| u128_to_addr(family, start + i))
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix())
    }
}

impl FromStr for AddressRange {
    type Err = BamError;

    fn from_str(s: &str) -> Result<Self> {
        canonicalize(s)
    }
}

/// Parses an IPv4/IPv6 network (or bare address) into canonical form.
///
/// Host bits need not be zero. IPv4 networks may give a dotted netmask
/// instead of a prefix length (`10.0.0.0/255.0.0.0`).
pub fn canonicalize(input: &str) -> Result<AddressRange> {
    let trimmed: &str = input.trim();
    let invalid = |reason: String| BamError::validation(format!("Invalid CIDR '{input}': {reason}"));

    let (addr_str, prefix_str) = match trimmed.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (trimmed, None),
    };

    let addr: IpAddr = addr_str
        .parse::<IpAddr>()
        .map_err(|e| invalid(format!("{e} ('{addr_str}')")))?;

    let prefix: u8 = match prefix_str {
        Some(prefix_str) => parse_prefix(&addr, prefix_str).map_err(invalid)?,
        None => AddressFamily::of(&addr).bits(),
    };

    AddressRange::new(addr, prefix).map_err(|e| invalid(e.to_string()))
}

/// Splits on whitespace and canonicalizes every token.
///
/// Stops at the first bad token and names it in the error.
pub fn parse_list(input: &str) -> Result<Vec<AddressRange>> {
    input
        .split_whitespace()
        .map(|token| {
            canonicalize(token).map_err(|e| {
                BamError::validation(format!("Invalid CIDR in block list: '{token}' ({e})"))
            })
        })
        .collect()
}

fn parse_prefix(addr: &IpAddr, prefix_str: &str) -> std::result::Result<u8, String> {
    if let Ok(prefix) = prefix_str.parse::<u8>() {
        return Ok(prefix);
    }

    match (addr, prefix_str.parse::<Ipv4Addr>()) {
        (IpAddr::V4(_), Ok(mask)) => ipnetwork::ipv4_mask_to_prefix(mask).map_err(|e| e.to_string()),
        _ => Err(format!("invalid prefix length '{prefix_str}'")),
    }
}

fn addr_to_u128(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

fn u128_to_addr(family: AddressFamily, value: u128) -> IpAddr {
    match family {
        AddressFamily::V4 => IpAddr::V4(Ipv4Addr::from(value as u32)),
        AddressFamily::V6 => IpAddr::V6(Ipv6Addr::from(value)),
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
