//! # bamctl common
//!
//! Value objects and pure resolution logic shared by the client core and the
//! CLI. Nothing in here talks to the network.
//!
//! * **[`network`]**: address ranges, parent-block selection, reverse scan targets.
//! * **[`dns`]**: owner-name normalization, record kinds and the uniform record view.
//! * **[`error`]**: the error taxonomy and the HTTP status classifier.
//! * **[`config`]**: session settings.
//! * **[`utils`]**: small combinators.

pub mod config;
pub mod dns;
pub mod error;
pub mod network;
pub mod utils;

pub use error::{BamError, ErrorKind, Result};
