use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{BamError, Result};

/// Record kinds bamctl reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Txt,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Cname,
        RecordKind::Mx,
        RecordKind::Ns,
        RecordKind::Txt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Txt => "TXT",
        }
    }

    /// A and AAAA are stored as host records with attached addresses.
    pub fn is_address(self) -> bool {
        matches!(self, Self::A | Self::Aaaa)
    }

    /// The address kind matching an IP's family.
    pub fn for_addr(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::A,
            IpAddr::V6(_) => Self::Aaaa,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = BamError;

    fn from_str(s: &str) -> Result<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                BamError::validation(format!(
                    "Unsupported record type '{s}' (expected one of A, AAAA, CNAME, MX, NS, TXT)"
                ))
            })
    }
}

/// Uniform view over host and generic records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub id: i64,
    pub kind: RecordKind,
    /// Fully-qualified owner name as stored by the catalog.
    pub name: String,
    pub ttl: Option<u32>,
    /// IP address for A/AAAA, target or text otherwise.
    pub data: Option<String>,
}

/// Changes applied to an existing record; `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub ttl: Option<u32>,
    pub data: Option<String>,
    /// Sub-type to write for generic records.
    pub kind_hint: Option<RecordKind>,
    /// Reverse flag of host records.
    pub with_reverse: Option<bool>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.ttl.is_none() && self.data.is_none() && self.with_reverse.is_none()
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
