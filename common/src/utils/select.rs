use crate::error::{BamError, Result};

/// Anything the catalog hands out an id for.
pub trait Identified {
    fn id(&self) -> i64;
}

/// Returns the single item, or fails with `NotFound` / `Ambiguous`.
///
/// `subject` names what was searched for and ends up in the error message.
pub fn exactly_one<T: Identified>(items: Vec<T>, subject: &str) -> Result<T> {
    match at_most_one(items, subject)? {
        Some(item) => Ok(item),
        None => Err(BamError::not_found(format!("{subject} not found"))),
    }
}

/// Like [`exactly_one`], but an empty sequence is `Ok(None)`.
pub fn at_most_one<T: Identified>(items: Vec<T>, subject: &str) -> Result<Option<T>> {
    if items.len() > 1 {
        return Err(BamError::Ambiguous {
            subject: subject.to_string(),
            ids: items.iter().map(Identified::id).collect(),
        });
    }
    Ok(items.into_iter().next())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
