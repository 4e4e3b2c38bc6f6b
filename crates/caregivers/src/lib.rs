//! Typed core of the caregivers platform: the client navigation table, the wire catalog
//! shared with the API, and the marketplace service that serves it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod navigation;
pub mod security;
pub mod telemetry;
