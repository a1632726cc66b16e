//! Pricing
//!
//! Prices travel as whole rupiah and are lifted into [`Money`] in `IDR` for
//! arithmetic and display.

use rusty_money::{
    Formatter, Money, MoneyError, Params, Position,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::cart::CartLine;

/// Money in the store currency.
pub type Price = Money<'static, Currency>;

/// Store currency.
pub const CURRENCY: &Currency = iso::IDR;

/// Errors that can occur while pricing cart contents.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An amount does not fit in the minor-unit representation.
    #[error("amount overflows minor units")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

fn minor_scale() -> Result<i64, PricingError> {
    10_i64
        .checked_pow(CURRENCY.exponent)
        .ok_or(PricingError::Overflow)
}

/// Lifts a whole-rupiah amount into money.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the amount does not fit in minor units.
pub fn rupiah(whole: u64) -> Result<Price, PricingError> {
    let minor = i64::try_from(whole)
        .ok()
        .and_then(|whole| whole.checked_mul(minor_scale().ok()?))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, CURRENCY))
}

/// Zero in the store currency.
pub fn zero() -> Price {
    Money::from_minor(0, CURRENCY)
}

/// Returns the whole-rupiah part of an amount.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the currency scale is unrepresentable.
pub fn whole_rupiah(price: &Price) -> Result<i64, PricingError> {
    Ok(price.to_minor_units() / minor_scale()?)
}

/// Price of `quantity` units at `unit` each.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product overflows.
pub fn extend(unit: &Price, quantity: u32) -> Result<Price, PricingError> {
    let minor = unit
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, CURRENCY))
}

/// Calculates the total price of a list of cart lines.
///
/// An empty list totals zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line subtotal overflowed.
/// - [`PricingError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price(lines: &[CartLine]) -> Result<Price, PricingError> {
    lines.iter().try_fold(zero(), |acc, line| {
        let subtotal = line.subtotal()?;

        Ok(acc.add(subtotal)?)
    })
}

/// Formats an amount the way the storefront displays it, e.g. `Rp 120.000`.
pub fn format_rupiah(price: &Price) -> String {
    Formatter::money(
        price,
        Params {
            digit_separator: '.',
            exponent_separator: ',',
            separator_pattern: &[3, 3, 3, 3],
            positions: &[Position::Sign, Position::Symbol, Position::Space, Position::Amount],
            rounding: Some(0),
            symbol: Some("Rp"),
            ..Params::default()
        },
    )
}
