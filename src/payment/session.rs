//! Payment Session
//!
//! ```text
//!             tick (remaining reaches 0)
//!           ┌───────────────────────────► failed (expired)
//!  pending ─┼── cancel ─────────────────► failed (cancelled)
//!           └── confirm ────────────────► success
//! ```
//!
//! Both outcomes are terminal. The countdown only runs while pending.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::{
    payment::{OrderId, PaymentCode},
    pricing::Price,
};

/// Length of the payment window, in seconds.
pub const PAYMENT_WINDOW_SECONDS: u32 = 900;

/// Settlement status of a payment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    /// Waiting for the buyer to pay.
    Pending,

    /// Payment was confirmed.
    Success,

    /// Payment expired or was cancelled.
    Failed,
}

impl PaymentStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        })
    }
}

/// Why a session failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The payment window ran out.
    Expired,

    /// The buyer abandoned the payment.
    Cancelled,
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureReason::Expired => "time expired",
            FailureReason::Cancelled => "cancelled",
        })
    }
}

/// Errors raised by session transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentSessionError {
    /// The session already reached a terminal status.
    #[error("payment is already {0}")]
    AlreadySettled(PaymentStatus),
}

/// One bounded attempt to settle an amount.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSession {
    order_id: OrderId,
    code: PaymentCode,
    remaining_seconds: u32,
    status: PaymentStatus,
    failure: Option<FailureReason>,
}

impl PaymentSession {
    /// Start a pending session for `amount` with a full payment window.
    pub fn start(amount: Price, order_id: OrderId) -> Self {
        Self::with_code(PaymentCode::new(amount), order_id)
    }

    /// Start a pending session displaying `code`.
    pub fn with_code(code: PaymentCode, order_id: OrderId) -> Self {
        Self {
            order_id,
            code,
            remaining_seconds: PAYMENT_WINDOW_SECONDS,
            status: PaymentStatus::Pending,
            failure: None,
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Expires the session once the window is used up. Ticks after a
    /// terminal status change nothing.
    pub fn tick(&mut self) -> PaymentStatus {
        if self.status == PaymentStatus::Pending {
            self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

            if self.remaining_seconds == 0 {
                self.fail(FailureReason::Expired);
            }
        }

        self.status
    }

    /// Mark the payment as received.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentSessionError::AlreadySettled`] unless pending; the
    /// session is left unchanged.
    pub fn confirm(&mut self) -> Result<(), PaymentSessionError> {
        self.ensure_pending()?;
        self.status = PaymentStatus::Success;

        Ok(())
    }

    /// Abandon the payment.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentSessionError::AlreadySettled`] unless pending; the
    /// session is left unchanged.
    pub fn cancel(&mut self) -> Result<(), PaymentSessionError> {
        self.ensure_pending()?;
        self.fail(FailureReason::Cancelled);

        Ok(())
    }

    /// Current status.
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Whether the session has finished.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Why the session failed, if it did.
    pub fn failure_reason(&self) -> Option<FailureReason> {
        self.failure
    }

    /// Seconds left in the payment window.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Remaining time as `MM:SS`.
    pub fn remaining_display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    /// Amount due.
    pub fn amount(&self) -> &Price {
        self.code.amount()
    }

    /// Order this session settles.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Code shown to the buyer.
    pub fn code(&self) -> &PaymentCode {
        &self.code
    }

    fn ensure_pending(&self) -> Result<(), PaymentSessionError> {
        if self.status.is_terminal() {
            return Err(PaymentSessionError::AlreadySettled(self.status));
        }

        Ok(())
    }

    fn fail(&mut self, reason: FailureReason) {
        self.status = PaymentStatus::Failed;
        self.failure = Some(reason);
    }
}
