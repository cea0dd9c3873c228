use std::net::IpAddr;

/// A DNS zone inside one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: i64,
    /// Fully-qualified zone name without trailing dot.
    pub absolute_name: String,
    pub view_id: i64,
}

/// A pointer resolved for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseMapping {
    pub address: IpAddr,
    /// Name the address points back to.
    pub target: String,
    pub record_id: Option<i64>,
    pub ttl: Option<u32>,
}
