//! Cart
//!
//! An ordered set of lines, one per product, each holding a quantity of at
//! least one. Insertion order is preserved for display.

use serde::{Deserialize, Serialize};

use crate::{
    pricing::{Price, PricingError, extend, total_price},
    products::{Product, ProductId},
};

pub mod persistence;
pub mod store;

pub use store::CartStore;

/// One product-and-quantity pairing pending purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot taken when the line was created
    pub product: Product,

    /// Units of the product, never zero
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the line subtotal overflows.
    pub fn subtotal(&self) -> Result<Price, PricingError> {
        extend(&self.product.unit_price()?, self.quantity)
    }

    /// Whether another unit would exceed the product's stock.
    pub fn at_stock_limit(&self) -> bool {
        self.quantity >= self.product.stock
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, rejecting lines that break the cart's
    /// invariants.
    ///
    /// Returns `None` if any product appears twice or any quantity is zero.
    pub fn from_lines(lines: Vec<CartLine>) -> Option<Self> {
        let valid = lines.iter().enumerate().all(|(i, line)| {
            line.quantity > 0
                && lines
                    .iter()
                    .skip(i + 1)
                    .all(|other| other.product.id != line.product.id)
        });

        valid.then_some(Self { lines })
    }

    /// Add one unit of `product`, appending a new line if none exists.
    ///
    /// Returns the resulting quantity of the product's line.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);

            return line.quantity;
        }

        self.lines.push(CartLine {
            product,
            quantity: 1,
        });

        1
    }

    /// Replace the quantity of the line for `product_id`.
    ///
    /// A quantity of zero removes the line. Returns `false` if the product is
    /// not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }

        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line for `product_id`. Returns `false` if it was absent.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| &line.product.id != product_id);

        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `product_id`, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| &line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }

    /// Sum of all quantities, shown on the cart badge.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of the line subtotals.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any line or the sum overflows.
    pub fn subtotal(&self) -> Result<Price, PricingError> {
        total_price(&self.lines)
    }

    /// Amount due. No fees are charged on top of the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any line or the sum overflows.
    pub fn total(&self) -> Result<Price, PricingError> {
        self.subtotal()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use testresult::TestResult;

    use crate::{pricing::rupiah, products::ProductCategory};

    use super::*;

    pub(crate) fn product(id: &str, price: u64, category: ProductCategory) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            image: String::new(),
            category,
            stock: 10,
            popular: None,
            delivery_time: None,
        }
    }

    #[test]
    fn repeated_adds_collapse_into_one_line() {
        let mut cart = Cart::new();
        let ids = ["a", "b", "a", "c", "a", "b"];

        for id in ids {
            cart.add(product(id, 1_000, ProductCategory::Items));
        }

        assert_eq!(cart.len(), 3);

        for (id, expected) in [("a", 3), ("b", 2), ("c", 1)] {
            let quantity = cart.line(&ProductId::new(id)).map(|line| line.quantity);
            assert_eq!(quantity, Some(expected), "quantity of {id}");
        }

        let order: Vec<&str> = cart
            .lines()
            .iter()
            .map(|line| line.product.id.as_str())
            .collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[test]
    fn re_adding_a_removed_product_starts_fresh() {
        let mut cart = Cart::new();
        let id = ProductId::new("a");

        cart.add(product("a", 1_000, ProductCategory::Items));
        cart.add(product("a", 1_000, ProductCategory::Items));
        assert!(cart.remove(&id));

        let quantity = cart.add(product("a", 1_000, ProductCategory::Items));

        assert_eq!(quantity, 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn set_quantity_replaces_without_clamping() {
        let mut cart = Cart::new();
        let id = ProductId::new("a");

        cart.add(product("a", 1_000, ProductCategory::Items));

        assert!(cart.set_quantity(&id, 42));
        assert_eq!(cart.line(&id).map(|line| line.quantity), Some(42));
    }

    #[test]
    fn set_quantity_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        let id = ProductId::new("a");

        cart.add(product("a", 1_000, ProductCategory::Items));

        assert!(cart.set_quantity(&id, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn mutations_of_absent_products_are_no_ops() {
        let mut cart = Cart::new();
        cart.add(product("a", 1_000, ProductCategory::Items));
        let before = cart.clone();

        assert!(!cart.set_quantity(&ProductId::new("zzz"), 5));
        assert!(!cart.remove(&ProductId::new("zzz")));
        assert_eq!(cart, before);
    }

    #[test]
    fn clear_empties_any_cart() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("a", 1_000, ProductCategory::Items));
        cart.add(product("b", 2_000, ProductCategory::Joki));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total()?, rupiah(0)?);

        Ok(())
    }

    #[test]
    fn count_sums_quantities() {
        let mut cart = Cart::new();

        cart.add(product("a", 1_000, ProductCategory::Items));
        cart.add(product("a", 1_000, ProductCategory::Items));
        cart.add(product("b", 1_000, ProductCategory::Items));

        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn from_lines_rejects_duplicates_and_zero_quantities() {
        let line = CartLine {
            product: product("a", 1_000, ProductCategory::Items),
            quantity: 1,
        };

        assert!(Cart::from_lines(vec![line.clone()]).is_some());
        assert!(Cart::from_lines(vec![line.clone(), line.clone()]).is_none());
        assert!(
            Cart::from_lines(vec![CartLine {
                quantity: 0,
                ..line
            }])
            .is_none()
        );
    }

    #[test]
    fn stock_limit_reflects_product_stock() {
        let mut line = CartLine {
            product: product("a", 1_000, ProductCategory::Items),
            quantity: 9,
        };

        assert!(!line.at_stock_limit());

        line.quantity = 10;
        assert!(line.at_stock_limit());
    }
}
