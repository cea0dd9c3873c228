use crate::error::{BamError, Result};

/// An owner name resolved against its zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerName {
    /// Fully-qualified name without trailing dot.
    pub fqdn: String,
    /// Name relative to the zone; empty at the apex.
    pub label: String,
}

/// Resolves `owner` against the zone's absolute name.
///
/// `owner` may be absolute (with or without trailing dot), the zone apex, or a
/// label relative to the zone. Comparison with the zone name is
/// case-sensitive.
pub fn normalize_owner(owner: &str, zone: &str) -> Result<OwnerName> {
    let zone: &str = zone.trim_end_matches('.');
    let name: &str = owner.trim().trim_end_matches('.');

    if name.is_empty() {
        return Err(BamError::validation("Empty owner name is not allowed"));
    }

    if name == zone {
        return Ok(OwnerName {
            fqdn: zone.to_string(),
            label: String::new(),
        });
    }

    if let Some(label) = name.strip_suffix(zone).and_then(|rest| rest.strip_suffix('.'))
        && !zone.is_empty()
    {
        return Ok(OwnerName {
            fqdn: name.to_string(),
            label: label.to_string(),
        });
    }

    let fqdn: String = if zone.is_empty() {
        name.to_string()
    } else {
        format!("{name}.{zone}")
    };

    Ok(OwnerName {
        fqdn,
        label: name.to_string(),
    })
}

/// Comparison key for names: no trailing dot, lower case.
pub fn match_key(name: &str) -> String {
    name.trim_end_matches('.').to_lowercase()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
