//! Jam3a storefront client: the REST API, local persistence, and the services and
//! controllers the CLI drives.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod fallback;
pub mod join;
pub mod observability;
pub mod sequencing;
pub mod session;
pub mod storage;
pub mod wizards;
