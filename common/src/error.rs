//! # Error Taxonomy
//!
//! Every fallible operation in bamctl reports a [`BamError`]. The variants map
//! one-to-one onto [`ErrorKind`], which is what callers branch on.
//!
//! Remote failures are sorted into kinds by [`classify`], a pure function of
//! the HTTP status and the catalog's own error code.

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BamError>;

/// Coarse classification of a [`BamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input, missing required settings, no configured parent block.
    Validation,
    /// No matching remote entity.
    NotFound,
    /// The catalog reports a duplicate.
    Conflict,
    /// More than one candidate where exactly one is required.
    Ambiguous,
    /// The remote call itself could not complete.
    Transport,
    /// Any other non-2xx response or unexpected payload.
    Api,
}

/// Context captured from a failed catalog exchange.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorDetails {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub detail: Option<Value>,
    pub url: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Error)]
pub enum BamError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Box<ErrorDetails>>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<Box<ErrorDetails>>,
    },

    #[error("{message}")]
    Conflict {
        message: String,
        details: Option<Box<ErrorDetails>>,
    },

    #[error("{subject} matched {count} entries (ids={ids:?}); please refine", count = .ids.len())]
    Ambiguous { subject: String, ids: Vec<i64> },

    #[error("{method} {url} failed: {reason}")]
    Transport {
        method: String,
        url: String,
        reason: String,
    },

    #[error("{message}")]
    Api {
        message: String,
        details: Option<Box<ErrorDetails>>,
    },
}

impl BamError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details: None,
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            details: None,
        }
    }

    /// Builds the error for a non-2xx catalog response.
    ///
    /// The variant is chosen by [`classify`] from `details.status` and
    /// `details.code`; a missing status is treated as a generic API failure.
    pub fn remote(message: impl Into<String>, details: ErrorDetails) -> Self {
        let message: String = message.into();
        let kind: ErrorKind = match details.status {
            Some(status) => classify(status, details.code.as_deref()),
            None => ErrorKind::Api,
        };
        let details = Some(Box::new(details));

        match kind {
            ErrorKind::NotFound => Self::NotFound { message, details },
            ErrorKind::Conflict => Self::Conflict { message, details },
            ErrorKind::Validation => Self::Validation { message, details },
            _ => Self::Api { message, details },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Ambiguous { .. } => ErrorKind::Ambiguous,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Api,
        }
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Conflict { details, .. }
            | Self::Api { details, .. } => details.as_deref(),
            Self::Ambiguous { .. } | Self::Transport { .. } => None,
        }
    }
}

/// Maps a response status and optional catalog error code onto an [`ErrorKind`].
///
/// Only ever returns `NotFound`, `Conflict`, `Validation` or `Api`.
pub fn classify(status: u16, code: Option<&str>) -> ErrorKind {
    let code: &str = code.unwrap_or_default();

    if status == 404 || code.contains("NotFound") {
        ErrorKind::NotFound
    } else if status == 409 || code.contains("AlreadyExists") {
        ErrorKind::Conflict
    } else if status == 400 {
        ErrorKind::Validation
    } else {
        ErrorKind::Api
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
