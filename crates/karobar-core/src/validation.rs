//! # Validation Module
//!
//! Business rule validation for Karobar POS.
//!
//! ## Validation Strategy
//! Validation runs before business logic and reports typed errors that the
//! session layer surfaces on its uniform notification channel. The pricing
//! engine itself never re-validates — out-of-range discount parameters must
//! be rejected here, before a policy reaches a line.
//!
//! ## Usage
//! ```rust
//! use karobar_core::validation::{validate_quantity, validate_discount};
//! use karobar_core::pricing::DiscountPolicy;
//!
//! validate_quantity(5).unwrap();
//! validate_discount(DiscountPolicy::from_percent(10)).unwrap();
//! assert!(validate_discount(DiscountPolicy::Divisor(0)).is_err());
//! ```

use crate::cart::SaleDraft;
use crate::error::ValidationError;
use crate::pricing::DiscountPolicy;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Full percentage range in basis points.
const MAX_DISCOUNT_BPS: u32 = 10_000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the customer name required before a sale can be processed.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates discount policy parameters before they reach a line.
///
/// ## Rules
/// - Percentage must be within 0-100% (0..=10000 bps)
/// - Divisor must be >= 1; a divisor below 1 would raise the price above
///   MRP and is a configuration error, never silently accepted
pub fn validate_discount(discount: DiscountPolicy) -> ValidationResult<()> {
    match discount {
        DiscountPolicy::None => Ok(()),
        DiscountPolicy::Percentage(bps) if bps > MAX_DISCOUNT_BPS => {
            Err(ValidationError::InvalidDiscount {
                reason: format!("percentage {}bps exceeds 100%", bps),
            })
        }
        DiscountPolicy::Percentage(_) => Ok(()),
        DiscountPolicy::Divisor(d) if d < 1 => Err(ValidationError::InvalidDiscount {
            reason: format!("divisor {} must be at least 1", d),
        }),
        DiscountPolicy::Divisor(_) => Ok(()),
    }
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Preconditions for processing a draft into a completed sale.
///
/// The customer-name check runs before anything that could touch stock, so
/// a nameless draft never causes a gateway call.
pub fn validate_draft_for_process(draft: &SaleDraft) -> ValidationResult<()> {
    if draft.is_empty() {
        return Err(ValidationError::EmptyDraft);
    }
    validate_customer_name(&draft.customer_name)?;
    Ok(())
}

/// Precondition for holding a draft: there must be something to hold.
pub fn validate_draft_for_hold(draft: &SaleDraft) -> ValidationResult<()> {
    if draft.is_empty() {
        return Err(ValidationError::EmptyDraft);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InventoryItemRef;

    fn test_item() -> InventoryItemRef {
        InventoryItemRef {
            id: 1,
            item_code: "ITM-0001".to_string(),
            item_name: "Item 1".to_string(),
            base_unit: "pcs".to_string(),
            mrp_paise: 1000,
        }
    }

    #[test]
    fn test_customer_name() {
        assert!(validate_customer_name("Asha Traders").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_discount_parameters() {
        assert!(validate_discount(DiscountPolicy::None).is_ok());
        assert!(validate_discount(DiscountPolicy::Percentage(0)).is_ok());
        assert!(validate_discount(DiscountPolicy::Percentage(10_000)).is_ok());
        assert!(validate_discount(DiscountPolicy::Percentage(10_001)).is_err());
        assert!(validate_discount(DiscountPolicy::Divisor(1)).is_ok());
        assert!(validate_discount(DiscountPolicy::Divisor(12)).is_ok());
        assert!(validate_discount(DiscountPolicy::Divisor(0)).is_err());
        assert!(validate_discount(DiscountPolicy::Divisor(-1)).is_err());
    }

    #[test]
    fn test_draft_for_process() {
        let mut draft = SaleDraft::default();
        assert!(matches!(
            validate_draft_for_process(&draft),
            Err(ValidationError::EmptyDraft)
        ));

        draft
            .add_line(&test_item(), 1, DiscountPolicy::None)
            .unwrap();
        assert!(matches!(
            validate_draft_for_process(&draft),
            Err(ValidationError::Required { .. })
        ));

        draft.customer_name = "Asha Traders".to_string();
        assert!(validate_draft_for_process(&draft).is_ok());
    }

    #[test]
    fn test_draft_for_hold() {
        let mut draft = SaleDraft::default();
        assert!(validate_draft_for_hold(&draft).is_err());

        // No customer name needed to hold.
        draft
            .add_line(&test_item(), 1, DiscountPolicy::None)
            .unwrap();
        assert!(validate_draft_for_hold(&draft).is_ok());
    }
}
