use crate::error::{BamError, Result};
use crate::network::range::AddressRange;

/// Picks the configured block that should own `target`.
///
/// Only candidates of the same family that fully contain `target` qualify.
/// The longest prefix (smallest containing block) wins; on equal prefixes the
/// earliest candidate is kept.
pub fn select_parent(target: &AddressRange, candidates: &[AddressRange]) -> Result<AddressRange> {
    candidates
        .iter()
        .filter(|block| block.contains(target))
        .fold(None, |best: Option<&AddressRange>, block| match best {
            Some(current) if current.prefix() >= block.prefix() => Some(current),
            _ => Some(block),
        })
        .copied()
        .ok_or_else(|| {
            BamError::not_found(format!(
                "No configured block contains network {target}. \
                 Set BAM_BLOCKS (space-separated CIDRs) to include a parent block."
            ))
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
