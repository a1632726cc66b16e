//! Checkout
//!
//! Turns a cart into a settled purchase: buyer details are collected and
//! validated by the [`form`], then a [`PaymentSession`](crate::payment::PaymentSession)
//! runs until it is confirmed, cancelled or expires. [`flow`] ties the stages
//! together.

pub mod flow;
pub mod form;
pub mod rules;

pub use flow::{CheckoutError, CheckoutFlow, CheckoutStage, PaymentAttempt, SettledCheckout};
pub use form::{CheckoutDetails, CheckoutForm, CheckoutFormData, FieldError, FieldErrors, validate};
pub use rules::{Field, RequiredFields};
