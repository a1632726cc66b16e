//! Shared application services: the hosted store client, domain services,
//! authentication and checkout settlement.

pub mod auth;
pub mod checkout;
pub mod context;
pub mod domain;
pub mod payment;
pub mod remote;

#[cfg(test)]
mod test;

pub mod uuids;
