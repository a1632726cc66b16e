//! Remote Store
//!
//! Client for the hosted store: a PostgREST table API under `/rest/v1` and
//! an auth API under `/auth/v1`, both keyed by the project's anon key.

mod client;
mod config;
mod errors;
mod query;
mod retry;

pub use client::RemoteClient;
pub use config::RemoteConfig;
pub use errors::RemoteError;
pub use query::Query;
pub use retry::{DEFAULT_INITIAL_BACKOFF, DEFAULT_READ_ATTEMPTS, RetryPolicy};
