//! # Pricing Engine
//!
//! Pure functions computing a sale line's total price and discount amount
//! under the trade-dividend conventions used by distributors:
//!
//! - **Percentage dividend**: a proportional reduction of the line subtotal
//!   (`mrp × (1 − p/100) × quantity`).
//! - **Divisor dividend**: the line subtotal divided by a whole number
//!   (`mrp × quantity / d`) — a scheme convention, not a percentage.
//!
//! Both functions are referentially transparent and safe to call on every
//! cart mutation or render.
//!
//! ## Validation Contract
//! The engine does not re-validate policy parameters. Percentages above
//! 100% and divisors below 1 are rejected by [`crate::validation`] before a
//! policy ever reaches a line; the only defensive behavior here is the
//! divide-by-zero fallback mandated for `Divisor`.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Discount Policy
// =============================================================================

/// The discount applied to a single sale line.
///
/// Exactly one variant is active per line; switching variants replaces the
/// whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// No adjustment.
    #[default]
    None,
    /// Proportional reduction in basis points (1000 = 10%).
    /// Valid range 0..=10_000; enforced by validation, not here.
    Percentage(u32),
    /// Whole-number trade-dividend divisor. Valid range >= 1; values in
    /// (0, 1) would increase the price beyond MRP and are unrepresentable
    /// with an integer divisor.
    Divisor(i64),
}

impl DiscountPolicy {
    /// Convenience constructor from a whole percentage (10 = 10%).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountPolicy::Percentage(percent * 100)
    }

    /// True when the policy leaves the gross price untouched.
    pub const fn is_none(&self) -> bool {
        matches!(self, DiscountPolicy::None)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Computes a line's total price from its frozen unit price, quantity and
/// discount policy.
///
/// ## Behavior
/// - `None` → `unit_price × quantity`
/// - `Percentage(bps)` → gross minus the half-up-rounded bps discount
/// - `Divisor(d)`, `d > 0` → half-up `gross / d`
/// - `Divisor(d)`, `d <= 0` → gross (never divide by zero)
///
/// ## Example
/// ```rust
/// use karobar_core::money::Money;
/// use karobar_core::pricing::{line_total, DiscountPolicy};
///
/// let mrp = Money::from_paise(9000); // ₹90.00
/// let total = line_total(mrp, 2, DiscountPolicy::Divisor(3));
/// assert_eq!(total.paise(), 6000); // ₹60.00
/// ```
pub fn line_total(unit_price: Money, quantity: i64, discount: DiscountPolicy) -> Money {
    let gross = unit_price.multiply_quantity(quantity);
    match discount {
        DiscountPolicy::None => gross,
        DiscountPolicy::Percentage(bps) => gross.apply_percentage_discount(bps),
        DiscountPolicy::Divisor(d) if d > 0 => gross.divide_by(d),
        // Zero or negative divisor: fall back to the undiscounted total.
        DiscountPolicy::Divisor(_) => gross,
    }
}

/// Computes the discount amount for reporting: gross minus discounted total.
///
/// Always >= 0 for `Percentage` in range and `Divisor >= 1`.
pub fn discount_amount(unit_price: Money, quantity: i64, discount: DiscountPolicy) -> Money {
    let gross = unit_price.multiply_quantity(quantity);
    gross - line_total(unit_price, quantity, discount)
}

// =============================================================================
// Unit Tests
// =============================================================================
