//! Client side of the Address Manager REST v2 API.
//!
//! [`session::BamApi`] is the entry point. It talks to the catalog through
//! the [`catalog::Catalog`] port, implemented over HTTP by
//! [`catalog::http::BlueCatClient`].

pub mod catalog;
pub mod records;
pub mod services;
pub mod session;

pub use session::BamApi;
