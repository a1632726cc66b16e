//! Payment
//!
//! A payment session settles one checkout attempt against a static QRIS
//! code. Sessions count down a fixed window and finish as either success or
//! failure.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod code;
pub mod session;

pub use code::PaymentCode;
pub use session::{FailureReason, PaymentSession, PaymentSessionError, PaymentStatus};

/// Storefront order number, e.g. `ORD-1718000000000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an existing order number.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Order number derived from a Unix timestamp in milliseconds.
    pub fn from_unix_millis(millis: i64) -> Self {
        Self(format!("ORD-{millis}"))
    }

    /// Order number as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ids_carry_the_timestamp() {
        assert_eq!(OrderId::from_unix_millis(1_718_000_000_000).as_str(), "ORD-1718000000000");
    }
}
