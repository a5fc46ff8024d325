//! dyndash
//!
//! A small self-hosted dashboard service for domains on the [Dynu] dynamic
//! DNS provider. Registered users store Dynu API credentials, browse and
//! search their hosted domains, bulk-add or delete domains, and manage
//! A/TXT/MX/SPF records — all over a JSON HTTP API with cookie or bearer
//! sessions.
//!
//! The interesting part is the [`generator`]: it builds randomized subdomain
//! names from a word dictionary under a fixed allowlist of main domains,
//! with per-batch uniqueness and DNS-safe normalization of user-supplied
//! names.
//!
//! [Dynu]: https://www.dynu.com
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod generator;
pub mod provider;
pub mod store;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use generator::{Dictionary, Subdomain, SubdomainGenerator};
pub use provider::DynuClient;
pub use store::{FileStore, InMemoryStore};
