//! # Sale Draft (Cart)
//!
//! The in-progress, not-yet-finalized sale being assembled.
//!
//! ## Invariants
//! - Every line's `line_total_paise` equals the pricing engine applied to
//!   that line's current `(unit_price, quantity, discount)` after any
//!   sequence of mutations — no line ever carries a stale total.
//! - Quantities are always >= 1; ceilings come from
//!   [`crate::MAX_DRAFT_LINES`] and [`crate::MAX_LINE_QUANTITY`].
//! - Totals (`subtotal`, `total_discount`, `grand_total`) are derived from
//!   the lines on every read, never stored.
//!
//! ## Not Checked Here
//! Stock. The draft may hold more of an item than the shop has; stock is
//! enforced only by the stock gateway at process time. Any availability
//! number shown while building the cart is advisory.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::DiscountPolicy;
use crate::types::{InventoryItemRef, PaymentMethod, SaleLineItem};
use crate::validation;
use crate::MAX_DRAFT_LINES;

/// The active sale draft. Exactly one is active per session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,

    /// Ordered lines; order is preserved through to stock mutation.
    pub lines: Vec<SaleLineItem>,

    pub payment_method: PaymentMethod,
    pub notes: String,
}

impl SaleDraft {
    /// Creates a fully empty draft (same as `Default`).
    pub fn new() -> Self {
        SaleDraft::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Appends a new line, priced immediately.
    ///
    /// Duplicate items become separate lines; the terminal treats each
    /// add as its own entry so per-line dividends stay independent.
    pub fn add_line(
        &mut self,
        item: &InventoryItemRef,
        quantity: i64,
        discount: DiscountPolicy,
    ) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;
        validation::validate_discount(discount)?;

        if self.lines.len() >= MAX_DRAFT_LINES {
            return Err(CoreError::DraftTooLarge {
                max: MAX_DRAFT_LINES,
            });
        }

        self.lines
            .push(SaleLineItem::new(item.clone(), quantity, discount));
        Ok(())
    }

    /// Changes a line's quantity, repricing with its existing discount.
    ///
    /// Rejects quantities below 1.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CoreError::LineIndexOutOfBounds { index, len })?;

        line.quantity = quantity;
        line.reprice();
        Ok(())
    }

    /// Replaces a line's discount variant atomically and reprices.
    ///
    /// The tagged policy carries exactly one variant, so no stale value
    /// from the previous variant can remain.
    pub fn update_discount(&mut self, index: usize, discount: DiscountPolicy) -> CoreResult<()> {
        validation::validate_discount(discount)?;
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CoreError::LineIndexOutOfBounds { index, len })?;

        line.discount = discount;
        line.reprice();
        Ok(())
    }

    /// Deletes one line; later indices shift down.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<SaleLineItem> {
        let len = self.lines.len();
        if index >= len {
            return Err(CoreError::LineIndexOutOfBounds { index, len });
        }
        Ok(self.lines.remove(index))
    }

    /// Empties the lines, keeping customer and payment fields untouched.
    ///
    /// Distinct from [`SaleDraft::reset`], which restores the entire
    /// default state.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Restores the fully empty default draft.
    pub fn reset(&mut self) {
        *self = SaleDraft::default();
    }

    // =========================================================================
    // Derived Totals
    // =========================================================================

    /// Σ(unit price × quantity), before any dividend.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(SaleLineItem::gross).sum()
    }

    /// subtotal − Σ(discounted line totals).
    pub fn total_discount(&self) -> Money {
        self.lines.iter().map(SaleLineItem::discount_amount).sum()
    }

    /// Tax is stubbed at zero for now.
    pub fn total_tax(&self) -> Money {
        Money::zero()
    }

    /// subtotal − discount + tax.
    pub fn grand_total(&self) -> Money {
        self.subtotal() - self.total_discount() + self.total_tax()
    }

    /// Number of lines in the draft.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Draft totals summary for transfer to a UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_paise: i64,
    pub total_discount_paise: i64,
    pub total_tax_paise: i64,
    pub grand_total_paise: i64,
}

impl From<&SaleDraft> for DraftTotals {
    fn from(draft: &SaleDraft) -> Self {
        DraftTotals {
            line_count: draft.line_count(),
            total_quantity: draft.total_quantity(),
            subtotal_paise: draft.subtotal().paise(),
            total_discount_paise: draft.total_discount().paise(),
            total_tax_paise: draft.total_tax().paise(),
            grand_total_paise: draft.grand_total().paise(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing;

    fn test_item(id: i64, mrp_paise: i64) -> InventoryItemRef {
        InventoryItemRef {
            id,
            item_code: format!("ITM-{:04}", id),
            item_name: format!("Item {}", id),
            base_unit: "pcs".to_string(),
            mrp_paise,
        }
    }

    /// `line_total` must equal the pricing engine applied to the line's
    /// current fields after any sequence of mutations.
    fn assert_no_stale_totals(draft: &SaleDraft) {
        for line in &draft.lines {
            let expected =
                pricing::line_total(line.unit_price(), line.quantity, line.discount).paise();
            assert_eq!(line.line_total_paise, expected, "stale line total");
        }
    }

    #[test]
    fn test_add_line_appends_and_prices() {
        let mut draft = SaleDraft::new();
        draft
            .add_line(&test_item(1, 999), 2, DiscountPolicy::None)
            .unwrap();
        draft
            .add_line(&test_item(1, 999), 3, DiscountPolicy::from_percent(10))
            .unwrap();

        // Same item twice stays two lines with independent dividends.
        assert_eq!(draft.line_count(), 2);
        assert_eq!(draft.total_quantity(), 5);
        assert_no_stale_totals(&draft);
    }

    #[test]
    fn test_add_line_rejects_zero_quantity() {
        let mut draft = SaleDraft::new();
        let err = draft
            .add_line(&test_item(1, 999), 0, DiscountPolicy::None)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_update_quantity_reprices_with_existing_discount() {
        let mut draft = SaleDraft::new();
        draft
            .add_line(&test_item(1, 10_000), 3, DiscountPolicy::from_percent(10))
            .unwrap();
        assert_eq!(draft.lines[0].line_total_paise, 27_000);

        draft.update_quantity(0, 5).unwrap();
        assert_eq!(draft.lines[0].line_total_paise, 45_000);
        assert_eq!(draft.lines[0].discount, DiscountPolicy::Percentage(1000));
        assert_no_stale_totals(&draft);
    }

    #[test]
    fn test_update_quantity_rejects_below_one() {
        let mut draft = SaleDraft::new();
        draft
            .add_line(&test_item(1, 500), 2, DiscountPolicy::None)
            .unwrap();
        assert!(draft.update_quantity(0, 0).is_err());
        assert_eq!(draft.lines[0].quantity, 2);
    }

    #[test]
    fn test_update_discount_replaces_variant_atomically() {
        let mut draft = SaleDraft::new();
        draft
            .add_line(&test_item(1, 9_000), 2, DiscountPolicy::from_percent(50))
            .unwrap();

        draft.update_discount(0, DiscountPolicy::Divisor(3)).unwrap();
        assert_eq!(draft.lines[0].discount, DiscountPolicy::Divisor(3));
        assert_eq!(draft.lines[0].line_total_paise, 6_000);

        draft.update_discount(0, DiscountPolicy::None).unwrap();
        assert_eq!(draft.lines[0].line_total_paise, 18_000);
        assert_no_stale_totals(&draft);
    }

    #[test]
    fn test_remove_line_shifts_indices() {
        let mut draft = SaleDraft::new();
        draft
            .add_line(&test_item(1, 100), 1, DiscountPolicy::None)
            .unwrap();
        draft
            .add_line(&test_item(2, 200), 1, DiscountPolicy::None)
            .unwrap();
        draft
            .add_line(&test_item(3, 300), 1, DiscountPolicy::None)
            .unwrap();

        let removed = draft.remove_line(1).unwrap();
        assert_eq!(removed.item.id, 2);
        assert_eq!(draft.line_count(), 2);
        assert_eq!(draft.lines[1].item.id, 3);

        assert!(draft.remove_line(5).is_err());
    }

    #[test]
    fn test_clear_keeps_customer_fields() {
        let mut draft = SaleDraft::new();
        draft.customer_name = "Asha Traders".to_string();
        draft.payment_method = PaymentMethod::Upi;
        draft
            .add_line(&test_item(1, 100), 1, DiscountPolicy::None)
            .unwrap();

        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.customer_name, "Asha Traders");
        assert_eq!(draft.payment_method, PaymentMethod::Upi);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut draft = SaleDraft::new();
        draft.customer_name = "Asha Traders".to_string();
        draft
            .add_line(&test_item(1, 100), 1, DiscountPolicy::None)
            .unwrap();

        draft.reset();
        assert_eq!(draft, SaleDraft::default());
    }

    #[test]
    fn test_totals_identity() {
        let mut draft = SaleDraft::new();
        draft
            .add_line(&test_item(1, 10_000), 3, DiscountPolicy::from_percent(10))
            .unwrap();
        draft
            .add_line(&test_item(2, 9_000), 2, DiscountPolicy::Divisor(3))
            .unwrap();
        draft
            .add_line(&test_item(3, 450), 4, DiscountPolicy::None)
            .unwrap();

        // subtotal - totalDiscount == Σ(lineTotal)
        let line_sum: i64 = draft.lines.iter().map(|l| l.line_total_paise).sum();
        assert_eq!(
            (draft.subtotal() - draft.total_discount()).paise(),
            line_sum
        );
        // tax stubbed at zero
        assert_eq!(draft.grand_total().paise(), line_sum);
    }

    #[test]
    fn test_mutation_sequence_never_leaves_stale_totals() {
        let mut draft = SaleDraft::new();
        draft
            .add_line(&test_item(1, 1_234), 2, DiscountPolicy::None)
            .unwrap();
        draft
            .add_line(&test_item(2, 5_678), 1, DiscountPolicy::from_percent(25))
            .unwrap();
        draft.update_quantity(0, 7).unwrap();
        draft.update_discount(0, DiscountPolicy::Divisor(2)).unwrap();
        draft.update_quantity(1, 3).unwrap();
        draft.remove_line(0).unwrap();
        draft
            .add_line(&test_item(3, 999), 9, DiscountPolicy::Divisor(4))
            .unwrap();

        assert_no_stale_totals(&draft);
    }

    #[test]
    fn test_draft_ceiling() {
        let mut draft = SaleDraft::new();
        for i in 0..MAX_DRAFT_LINES {
            draft
                .add_line(&test_item(i as i64, 100), 1, DiscountPolicy::None)
                .unwrap();
        }
        let err = draft
            .add_line(&test_item(9_999, 100), 1, DiscountPolicy::None)
            .unwrap_err();
        assert!(matches!(err, CoreError::DraftTooLarge { .. }));
    }
}
