//! Remote store configuration.

use url::Url;

use crate::remote::RetryPolicy;

/// Configuration for connecting to the hosted store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub url: Url,

    /// Public anon key sent with every request.
    pub anon_key: String,

    /// Retry policy for reads.
    pub retry: RetryPolicy,
}

impl RemoteConfig {
    /// Configuration with the default read retry policy.
    pub fn new(url: Url, anon_key: impl Into<String>) -> Self {
        Self {
            url,
            anon_key: anon_key.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the read retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
