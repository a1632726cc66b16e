//! Lapak
//!
//! Lapak is the cart, checkout and payment core of a storefront selling
//! in-game goods: a persisted shopping cart, category-aware buyer detail
//! validation and a time-boxed QRIS payment session.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod notifications;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
