//! Domain Services

pub mod auth;
pub mod content;
pub mod deals;
pub mod orders;
pub mod products;

mod wire;
