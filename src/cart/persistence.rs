//! Cart Persistence
//!
//! The cart is stored as a JSON array of `{product, quantity}` objects under
//! [`CART_STORAGE_KEY`]. Stored data is untrusted: anything that fails to
//! parse or breaks the cart invariants loads as an empty cart.

use thiserror::Error;
use tracing::warn;

use crate::{
    cart::{Cart, CartLine},
    storage::{KeyValueStore, StorageError},
};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart-items";

/// Errors raised while saving a cart.
#[derive(Debug, Error)]
pub enum CartPersistenceError {
    /// The cart could not be encoded.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backing store rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Decode a stored cart value.
///
/// Returns `None` if the value is not a well-formed cart.
pub fn decode(value: &str) -> Option<Cart> {
    let lines: Vec<CartLine> = serde_json::from_str(value)
        .inspect_err(|error| warn!(%error, "stored cart is malformed"))
        .ok()?;

    let cart = Cart::from_lines(lines);

    if cart.is_none() {
        warn!("stored cart has duplicate products or empty lines");
    }

    cart
}

/// Encode a cart for storage.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if a line cannot be encoded.
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(cart.lines())
}

/// Load the cart from `store`, failing open to an empty cart.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Cart {
    match store.get(CART_STORAGE_KEY) {
        Ok(Some(value)) => decode(&value).unwrap_or_default(),
        Ok(None) => Cart::new(),
        Err(error) => {
            warn!(%error, "failed to read stored cart");

            Cart::new()
        }
    }
}

/// Save the cart to `store`.
///
/// # Errors
///
/// Returns a [`CartPersistenceError`] if encoding or writing fails.
pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    cart: &Cart,
) -> Result<(), CartPersistenceError> {
    let value = encode(cart)?;

    store.set(CART_STORAGE_KEY, &value)?;

    Ok(())
}
