//! Checkout Flow
//!
//! Stages of one checkout attempt:
//!
//! ```text
//! cart ──open_form──► form ──submit──► payment ──confirm──► completed
//!  ▲                   │                 │
//!  └────close_form─────┘                 │
//!  └──────────cancel / close (failed)────┘
//! ```
//!
//! Leaving the payment stage without confirming never touches the cart.

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartLine, CartStore},
    checkout::{
        form::{CheckoutDetails, CheckoutForm, FieldErrors},
        rules::Field,
    },
    payment::{
        OrderId, PaymentCode, PaymentSession, PaymentSessionError, PaymentStatus,
        code::STATIC_QRIS_PAYLOAD,
    },
    pricing::{Price, PricingError},
    storage::KeyValueStore,
};

/// Errors raised by checkout transitions.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout needs at least one cart line.
    #[error("cart is empty")]
    EmptyCart,

    /// The action needs the form stage.
    #[error("checkout form is not open")]
    FormNotOpen,

    /// The action needs the payment stage.
    #[error("no payment in progress")]
    NoPayment,

    /// Buyer details failed validation.
    #[error("invalid checkout details: {0}")]
    Invalid(#[from] FieldErrors),

    /// The cart total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The payment session rejected the transition.
    #[error(transparent)]
    Payment(#[from] PaymentSessionError),
}

/// A payment underway for validated buyer details.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAttempt {
    /// Running payment session
    pub session: PaymentSession,

    /// Details submitted with the form
    pub details: CheckoutDetails,
}

/// Outcome of a confirmed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct SettledCheckout {
    /// Order number
    pub order_id: OrderId,

    /// Amount paid
    pub amount: Price,

    /// Buyer details
    pub details: CheckoutDetails,

    /// Cart lines at confirmation time
    pub lines: Vec<CartLine>,
}

/// Current checkout stage.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStage {
    /// Reviewing the cart.
    Cart,

    /// Filling in buyer details.
    Form(CheckoutForm),

    /// Waiting for payment.
    Payment(PaymentAttempt),

    /// Payment confirmed.
    Completed(SettledCheckout),
}

/// Checkout state machine for one shopper.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
    payload: String,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::with_payment_payload(STATIC_QRIS_PAYLOAD)
    }
}

impl CheckoutFlow {
    /// Flow in the cart stage, paying with the merchant's static code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flow in the cart stage, paying with a custom QRIS payload.
    pub fn with_payment_payload(payload: impl Into<String>) -> Self {
        Self {
            stage: CheckoutStage::Cart,
            payload: payload.into(),
        }
    }

    /// Current stage.
    pub fn stage(&self) -> &CheckoutStage {
        &self.stage
    }

    /// The open form, if any.
    pub fn form(&self) -> Option<&CheckoutForm> {
        match &self.stage {
            CheckoutStage::Form(form) => Some(form),
            _ => None,
        }
    }

    /// The running payment, if any.
    pub fn payment(&self) -> Option<&PaymentAttempt> {
        match &self.stage {
            CheckoutStage::Payment(attempt) => Some(attempt),
            _ => None,
        }
    }

    /// Open the checkout form for `cart`.
    ///
    /// Reopening an open form keeps its input.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if `cart` has no lines.
    pub fn open_form(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if !matches!(self.stage, CheckoutStage::Form(_)) {
            self.stage = CheckoutStage::Form(CheckoutForm::new());
        }

        Ok(())
    }

    /// Edit a form field.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::FormNotOpen`] outside the form stage.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> Result<(), CheckoutError> {
        let CheckoutStage::Form(form) = &mut self.stage else {
            return Err(CheckoutError::FormNotOpen);
        };

        form.set(field, value);

        Ok(())
    }

    /// Close the form and return to the cart.
    pub fn close_form(&mut self) {
        if matches!(self.stage, CheckoutStage::Form(_)) {
            self.stage = CheckoutStage::Cart;
        }
    }

    /// Validate the form against `cart` and start a payment for its total.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::FormNotOpen`]: not in the form stage.
    /// - [`CheckoutError::EmptyCart`]: the cart was emptied meanwhile.
    /// - [`CheckoutError::Invalid`]: the form has errors; they stay on the form.
    /// - [`CheckoutError::Pricing`]: the total overflowed.
    pub fn submit(
        &mut self,
        cart: &Cart,
        order_id: OrderId,
    ) -> Result<&PaymentSession, CheckoutError> {
        let CheckoutStage::Form(form) = &mut self.stage else {
            return Err(CheckoutError::FormNotOpen);
        };

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let details = form.submit(cart.lines())?;
        let amount = cart.total()?;

        info!(%order_id, lines = cart.len(), "payment started");

        let session = PaymentSession::with_code(
            PaymentCode::with_payload(self.payload.clone(), amount),
            order_id,
        );

        self.stage = CheckoutStage::Payment(PaymentAttempt { session, details });

        match &self.stage {
            CheckoutStage::Payment(attempt) => Ok(&attempt.session),
            _ => Err(CheckoutError::NoPayment),
        }
    }

    /// Advance the payment countdown by one second.
    ///
    /// Returns `None` outside the payment stage.
    pub fn tick(&mut self) -> Option<PaymentStatus> {
        let CheckoutStage::Payment(attempt) = &mut self.stage else {
            return None;
        };

        let was_pending = !attempt.session.is_terminal();
        let status = attempt.session.tick();

        if was_pending && status == PaymentStatus::Failed {
            info!(order_id = %attempt.session.order_id(), "payment window expired");
        }

        Some(status)
    }

    /// Confirm the running payment and complete the checkout.
    ///
    /// The cart is not modified; clearing it is the caller's job once the
    /// purchase is recorded. See [`CheckoutFlow::confirm_and_clear`].
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NoPayment`]: not in the payment stage.
    /// - [`CheckoutError::Payment`]: the session already finished.
    pub fn confirm(&mut self, cart: &Cart) -> Result<SettledCheckout, CheckoutError> {
        let CheckoutStage::Payment(attempt) = &mut self.stage else {
            return Err(CheckoutError::NoPayment);
        };

        attempt.session.confirm()?;

        let settled = SettledCheckout {
            order_id: attempt.session.order_id().clone(),
            amount: attempt.session.amount().clone(),
            details: attempt.details.clone(),
            lines: cart.lines().to_vec(),
        };

        info!(order_id = %settled.order_id, "payment confirmed");

        self.stage = CheckoutStage::Completed(settled.clone());

        Ok(settled)
    }

    /// Confirm the running payment and empty the store's cart.
    ///
    /// # Errors
    ///
    /// See [`CheckoutFlow::confirm`]; the cart is kept on error.
    pub fn confirm_and_clear<S: KeyValueStore>(
        &mut self,
        store: &mut CartStore<S>,
    ) -> Result<SettledCheckout, CheckoutError> {
        let settled = self.confirm(store.cart())?;

        store.clear_cart();

        Ok(settled)
    }

    /// Cancel the running payment and return to the cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NoPayment`]: not in the payment stage.
    /// - [`CheckoutError::Payment`]: the session already finished.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        let CheckoutStage::Payment(attempt) = &mut self.stage else {
            return Err(CheckoutError::NoPayment);
        };

        attempt.session.cancel()?;

        debug!(order_id = %attempt.session.order_id(), "payment cancelled");

        self.stage = CheckoutStage::Cart;

        Ok(())
    }

    /// Leave the payment or completion view.
    ///
    /// A failed payment returns to the cart. A completed checkout starts
    /// over. A payment still pending is discarded as cancelled.
    pub fn close(&mut self) {
        if let CheckoutStage::Payment(attempt) = &mut self.stage
            && attempt.session.cancel().is_ok()
        {
            debug!(order_id = %attempt.session.order_id(), "pending payment discarded");
        }

        if matches!(
            self.stage,
            CheckoutStage::Payment(_) | CheckoutStage::Completed(_)
        ) {
            self.stage = CheckoutStage::Cart;
        }
    }
}
