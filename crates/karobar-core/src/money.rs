//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! Floating point cannot represent retail prices exactly (`0.1 + 0.2 !=
//! 0.3`), and a web POS that computes discounts in floats will eventually
//! print a bill that is off by a paisa. All monetary values in Karobar POS
//! are integer paise; only the UI converts to rupees for display.
//!
//! ## Usage
//! ```rust
//! use karobar_core::money::Money;
//!
//! // Create from paise (preferred)
//! let mrp = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = mrp * 2;                      // ₹21.98
//! let total = mrp + Money::from_paise(500);   // ₹15.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use karobar_core::money::Money;
    ///
    /// let mrp = Money::from_paise(1099); // Represents ₹10.99
    /// assert_eq!(mrp.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts, only the rupee part should be negative:
    /// `from_rupees_paise(-5, 50)` = -₹5.50, not -₹4.50.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99, absolute value).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use karobar_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(299); // ₹2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.paise(), 897); // ₹8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// i128 intermediates prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use karobar_core::money::Money;
    ///
    /// let subtotal = Money::from_paise(10000); // ₹100.00
    /// let discounted = subtotal.apply_percentage_discount(1000); // 10% off
    /// assert_eq!(discounted.paise(), 9000); // ₹90.00
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_paise(self.0 - discount_amount as i64)
    }

    /// Divides money by a whole-number divisor with half-up rounding.
    ///
    /// Used for the "trade dividend divisor" convention: the line subtotal
    /// divided by the divisor is what the customer pays.
    ///
    /// Requires `divisor > 0`; the pricing engine guards the zero/negative
    /// case before calling.
    ///
    /// ## Example
    /// ```rust
    /// use karobar_core::money::Money;
    ///
    /// let gross = Money::from_paise(18000); // ₹180.00
    /// assert_eq!(gross.divide_by(3).paise(), 6000); // ₹60.00
    /// ```
    pub fn divide_by(&self, divisor: i64) -> Money {
        debug_assert!(divisor > 0, "divide_by requires a positive divisor");
        let divided = (self.0 as i128 + divisor as i128 / 2) / divisor as i128;
        Money::from_paise(divided as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and receipt text. Use frontend formatting for
/// actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rs {}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation for totalling line values.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees_paise() {
        let money = Money::from_rupees_paise(10, 99);
        assert_eq!(money.paise(), 1099);

        let negative = Money::from_rupees_paise(-5, 50);
        assert_eq!(negative.paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "Rs 10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "Rs 5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-Rs 5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "Rs 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_paise(10000); // ₹100.00
        let discounted = subtotal.apply_percentage_discount(1000); // 10%
        assert_eq!(discounted.paise(), 9000); // ₹90.00
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        // ₹0.99 at 33.33% -> discount 330.0267 bps of 99 = 33.0 -> 33 paise off
        let amount = Money::from_paise(99);
        let discounted = amount.apply_percentage_discount(3333);
        assert_eq!(discounted.paise(), 66);
    }

    #[test]
    fn test_divide_by() {
        assert_eq!(Money::from_paise(18000).divide_by(3).paise(), 6000);
        // half-up: 100 / 3 = 33.33 -> 33; 100 / 8 = 12.5 -> 13
        assert_eq!(Money::from_paise(100).divide_by(3).paise(), 33);
        assert_eq!(Money::from_paise(100).divide_by(8).paise(), 13);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_paise(100);
        assert!(positive.is_positive());

        let negative = Money::from_paise(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.paise(), 897);
    }
}
