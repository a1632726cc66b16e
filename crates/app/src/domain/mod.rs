//! Lapak Domain Concerns

pub mod orders;
pub mod products;
pub mod profiles;
pub mod wishlist;
