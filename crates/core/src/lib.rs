//! Jam3a
//!
//! Jam3a is the domain core of a bilingual group-buying storefront: deals that unlock a
//! discounted price once enough participants join, the join and deal-creation flows that
//! drive them, and the cart that sits alongside.

pub mod cart;
pub mod catalog;
pub mod deals;
pub mod fixtures;
pub mod join;
pub mod locale;
pub mod money;
pub mod pricing;
pub mod products;
pub mod users;
pub mod validation;
pub mod view;
pub mod wizard;

pub mod prelude;
