//! Cart Store
//!
//! Owns the shopper's [`Cart`], writes it through to durable storage after
//! every mutation and raises notifications for the views to display.

use std::time::Instant;

use tracing::{debug, warn};

use crate::{
    cart::{Cart, persistence},
    notifications::{NotificationKind, Notifications},
    products::{Product, ProductId},
    storage::KeyValueStore,
};

/// Cart store backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    cart: Cart,
    storage: S,
    notifications: Notifications,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the store, loading any previously saved cart.
    ///
    /// Missing or malformed stored data yields an empty cart.
    pub fn open(storage: S) -> Self {
        Self::with_notifications(storage, Notifications::new())
    }

    /// Open the store with a caller-supplied notification center.
    pub fn with_notifications(storage: S, notifications: Notifications) -> Self {
        let cart = persistence::load(&storage);

        debug!(lines = cart.len(), "cart loaded");

        Self {
            cart,
            storage,
            notifications,
        }
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of all quantities in the cart.
    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    /// Add one unit of `product` and announce it.
    ///
    /// Returns the resulting quantity of the product's line.
    pub fn add_to_cart(&mut self, product: Product) -> u32 {
        let name = product.name.clone();
        let quantity = self.cart.add(product);

        self.persist();
        self.notifications.push(
            NotificationKind::Success,
            format!("{name} added to cart"),
            Instant::now(),
        );

        quantity
    }

    /// Replace the quantity of a line. Zero removes the line; absent
    /// products are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let changed = self.cart.set_quantity(product_id, quantity);

        if changed {
            self.persist();
        }

        changed
    }

    /// Step a line up by one, stopping at the product's stock.
    ///
    /// Returns the line's quantity, or `None` if the product is absent.
    pub fn increment(&mut self, product_id: &ProductId) -> Option<u32> {
        let line = self.cart.line(product_id)?;

        if line.at_stock_limit() {
            return Some(line.quantity);
        }

        let quantity = line.quantity.saturating_add(1);
        self.update_quantity(product_id, quantity);

        Some(quantity)
    }

    /// Step a line down by one, never below one.
    ///
    /// Returns the line's quantity, or `None` if the product is absent.
    pub fn decrement(&mut self, product_id: &ProductId) -> Option<u32> {
        let current = self.cart.line(product_id)?.quantity;

        if current <= 1 {
            return Some(current);
        }

        self.update_quantity(product_id, current - 1);

        Some(current - 1)
    }

    /// Remove a line. Absent products are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let changed = self.cart.remove(product_id);

        if changed {
            self.persist();
        }

        changed
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Notifications raised by the store.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Notifications raised by the store, mutably.
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        if let Err(error) = persistence::save(&mut self.storage, &self.cart) {
            warn!(%error, "failed to persist cart");

            self.notifications.push(
                NotificationKind::Warning,
                "Cart could not be saved on this device",
                Instant::now(),
            );
        }
    }
}
