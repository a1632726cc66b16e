//! Lapak prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, CartStore, persistence::CartPersistenceError},
    checkout::{
        CheckoutDetails, CheckoutError, CheckoutFlow, CheckoutForm, CheckoutFormData,
        CheckoutStage, Field, FieldError, FieldErrors, SettledCheckout,
    },
    fixtures::{Fixture, FixtureError},
    notifications::{Notification, NotificationKind, Notifications},
    payment::{
        FailureReason, OrderId, PaymentCode, PaymentSession, PaymentSessionError, PaymentStatus,
    },
    pricing::{Price, PricingError, format_rupiah, rupiah},
    products::{Product, ProductCategory, ProductId},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};
