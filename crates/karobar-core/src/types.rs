//! # Domain Types
//!
//! Core domain types used throughout Karobar POS.
//!
//! ## Snapshot Pattern
//! A sale line embeds an [`InventoryItemRef`] — a frozen copy of the catalog
//! item at the moment it was added. If the catalog price changes later, the
//! line is unaffected until the item is re-added. The same pattern carries
//! into [`CompletedSale`], whose line snapshots are immutable history.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::SaleDraft;
use crate::error::CoreError;
use crate::money::Money;
use crate::pricing::{self, DiscountPolicy};
use crate::DEFAULT_HELD_CUSTOMER;

// =============================================================================
// Inventory Item Reference
// =============================================================================

/// Immutable snapshot reference to a catalog item at add-to-cart time.
///
/// Owned by the line that embeds it; never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemRef {
    /// Catalog identifier.
    pub id: i64,

    /// Business item code (human-readable).
    pub item_code: String,

    /// Display name shown to the cashier and on the bill.
    pub item_name: String,

    /// Unit label ("pcs", "kg", "box").
    pub base_unit: String,

    /// Maximum retail price in paise at snapshot time (frozen).
    pub mrp_paise: i64,
}

impl InventoryItemRef {
    /// Returns the MRP as a Money type.
    #[inline]
    pub fn mrp(&self) -> Money {
        Money::from_paise(self.mrp_paise)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settles the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl PaymentMethod {
    /// Receipt label.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

// =============================================================================
// Sale Line Item
// =============================================================================

/// One catalog item plus quantity and discount within a draft.
///
/// `line_total_paise` is always a pure function of the other fields — it is
/// recomputed by the cart on every mutation and never independently assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    /// Frozen catalog snapshot.
    pub item: InventoryItemRef,

    /// Quantity sold, always >= 1.
    pub quantity: i64,

    /// Unit price in paise at time of adding (frozen MRP).
    pub unit_price_paise: i64,

    /// The trade dividend applied to this line.
    pub discount: DiscountPolicy,

    /// Discounted line total in paise. Derived, never hand-assigned.
    pub line_total_paise: i64,
}

impl SaleLineItem {
    /// Builds a line from a catalog snapshot, pricing it immediately.
    pub fn new(item: InventoryItemRef, quantity: i64, discount: DiscountPolicy) -> Self {
        let unit_price_paise = item.mrp_paise;
        let line_total_paise =
            pricing::line_total(Money::from_paise(unit_price_paise), quantity, discount).paise();
        SaleLineItem {
            item,
            quantity,
            unit_price_paise,
            discount,
            line_total_paise,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the discounted line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }

    /// Gross line value before any discount.
    #[inline]
    pub fn gross(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Discount amount on this line (gross minus discounted total).
    #[inline]
    pub fn discount_amount(&self) -> Money {
        self.gross() - self.line_total()
    }

    /// Recomputes `line_total_paise` from the current fields.
    ///
    /// Called by the cart after every quantity or discount change so no
    /// line ever carries a stale total.
    pub(crate) fn reprice(&mut self) {
        self.line_total_paise =
            pricing::line_total(self.unit_price(), self.quantity, self.discount).paise();
    }
}

// =============================================================================
// Completed Sale
// =============================================================================

/// An immutable finalized transaction record with totals.
///
/// Created once per successful process transition; never mutated; may be
/// printed or exported any number of times afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable receipt number (date-derived).
    pub receipt_number: String,

    /// When the sale was finalized.
    pub timestamp: DateTime<Utc>,

    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,

    /// Line snapshots at finalize time.
    pub lines: Vec<SaleLineItem>,

    /// Σ(unit price × quantity) in paise.
    pub subtotal_paise: i64,

    /// subtotal − Σ(line total) in paise.
    pub total_discount_paise: i64,

    /// Always 0 for now; tax computation is stubbed.
    pub total_tax_paise: i64,

    /// subtotal − discount + tax, in paise.
    pub grand_total_paise: i64,

    pub payment_method: PaymentMethod,
    pub notes: String,
}

impl CompletedSale {
    /// Builds the immutable sale record from a draft.
    ///
    /// Totals are computed here, once, from the draft's lines; the record
    /// never recomputes them afterwards.
    pub fn from_draft(draft: &SaleDraft, id: String, receipt_number: String) -> Self {
        let subtotal = draft.subtotal();
        let total_discount = draft.total_discount();
        let total_tax = draft.total_tax();
        let grand_total = subtotal - total_discount + total_tax;

        CompletedSale {
            id,
            receipt_number,
            timestamp: Utc::now(),
            customer_name: draft.customer_name.clone(),
            customer_phone: draft.customer_phone.clone(),
            customer_address: draft.customer_address.clone(),
            lines: draft.lines.clone(),
            subtotal_paise: subtotal.paise(),
            total_discount_paise: total_discount.paise(),
            total_tax_paise: total_tax.paise(),
            grand_total_paise: grand_total.paise(),
            payment_method: draft.payment_method,
            notes: draft.notes.clone(),
        }
    }

    /// Grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_paise(self.grand_total_paise)
    }

    /// Serializes the sale for export/archival.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reconstructs a sale from exported JSON, rejecting structurally
    /// invalid payloads (no lines, blank id).
    pub fn from_json(json: &str) -> Result<CompletedSale, CoreError> {
        let sale: CompletedSale = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSaleData(e.to_string()))?;
        if sale.id.trim().is_empty() {
            return Err(CoreError::InvalidSaleData("missing sale id".to_string()));
        }
        if sale.lines.is_empty() {
            return Err(CoreError::InvalidSaleData("sale has no lines".to_string()));
        }
        Ok(sale)
    }
}

// =============================================================================
// Held Bill
// =============================================================================

/// A draft voluntarily suspended and persisted for later resumption.
///
/// Multiple held bills may coexist, keyed by unique timestamp-derived id.
/// The store adapter is authoritative; any in-memory list is a cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeldBill {
    /// Unique id, derived from the hold timestamp.
    pub id: String,

    /// When the bill was held.
    pub held_at: DateTime<Utc>,

    /// Customer name for the held-bill list (falls back to a placeholder
    /// when the draft has none yet).
    pub customer_name: String,

    /// The suspended draft, restored verbatim on resume.
    pub snapshot: SaleDraft,
}

impl HeldBill {
    /// Suspends a draft into a held bill with a fresh timestamp-derived id.
    ///
    /// The id carries a sequence suffix so two holds landing in the same
    /// millisecond stay distinct (the store upserts by id, so a collision
    /// would silently replace the first bill).
    pub fn from_draft(draft: &SaleDraft) -> Self {
        static HOLD_SEQ: AtomicU64 = AtomicU64::new(0);

        let held_at = Utc::now();
        let seq = HOLD_SEQ.fetch_add(1, Ordering::Relaxed);
        let customer_name = if draft.customer_name.trim().is_empty() {
            DEFAULT_HELD_CUSTOMER.to_string()
        } else {
            draft.customer_name.clone()
        };
        HeldBill {
            id: format!("held-{}-{}", held_at.timestamp_millis(), seq),
            held_at,
            customer_name,
            snapshot: draft.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: i64, mrp_paise: i64) -> InventoryItemRef {
        InventoryItemRef {
            id,
            item_code: format!("ITM-{:04}", id),
            item_name: format!("Item {}", id),
            base_unit: "pcs".to_string(),
            mrp_paise,
        }
    }

    #[test]
    fn test_line_item_prices_on_construction() {
        let line = SaleLineItem::new(test_item(1, 10_000), 3, DiscountPolicy::from_percent(10));
        assert_eq!(line.line_total_paise, 27_000);
        assert_eq!(line.discount_amount().paise(), 3_000);
    }

    #[test]
    fn test_payment_method_serde_matches_wire_values() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), r#""UPI""#);
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            r#""Bank Transfer""#
        );
        let back: PaymentMethod = serde_json::from_str(r#""Cash""#).unwrap();
        assert_eq!(back, PaymentMethod::Cash);
    }

    #[test]
    fn test_held_bill_placeholder_customer() {
        let draft = SaleDraft::default();
        let bill = HeldBill::from_draft(&draft);
        assert_eq!(bill.customer_name, "Customer");
        assert!(bill.id.starts_with("held-"));
    }

    #[test]
    fn test_held_bill_ids_unique_within_a_millisecond() {
        let draft = SaleDraft::default();
        // Back-to-back holds share a timestamp more often than not; the
        // sequence suffix must keep every id distinct regardless.
        let ids: Vec<String> = (0..50)
            .map(|_| HeldBill::from_draft(&draft).id)
            .collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_completed_sale_totals_identity() {
        let mut draft = SaleDraft::default();
        draft.customer_name = "Asha Traders".to_string();
        draft
            .add_line(&test_item(1, 10_000), 3, DiscountPolicy::from_percent(10))
            .unwrap();
        draft
            .add_line(&test_item(2, 9_000), 2, DiscountPolicy::Divisor(3))
            .unwrap();

        let sale = CompletedSale::from_draft(&draft, "s-1".to_string(), "R-1".to_string());

        // subtotal - discount == Σ(line totals)
        let line_sum: i64 = sale.lines.iter().map(|l| l.line_total_paise).sum();
        assert_eq!(sale.subtotal_paise - sale.total_discount_paise, line_sum);
        assert_eq!(sale.total_tax_paise, 0);
        assert_eq!(
            sale.grand_total_paise,
            sale.subtotal_paise - sale.total_discount_paise
        );
    }

    #[test]
    fn test_sale_json_round_trip() {
        let mut draft = SaleDraft::default();
        draft.customer_name = "Asha Traders".to_string();
        draft
            .add_line(&test_item(1, 500), 2, DiscountPolicy::None)
            .unwrap();
        let sale = CompletedSale::from_draft(&draft, "s-2".to_string(), "R-2".to_string());

        let json = sale.to_json().unwrap();
        let back = CompletedSale::from_json(&json).unwrap();
        assert_eq!(back, sale);
    }

    #[test]
    fn test_sale_import_rejects_empty_lines() {
        let mut draft = SaleDraft::default();
        draft.customer_name = "X".to_string();
        draft
            .add_line(&test_item(1, 500), 1, DiscountPolicy::None)
            .unwrap();
        let mut sale = CompletedSale::from_draft(&draft, "s-3".to_string(), "R-3".to_string());
        sale.lines.clear();

        let json = sale.to_json().unwrap();
        assert!(matches!(
            CompletedSale::from_json(&json),
            Err(CoreError::InvalidSaleData(_))
        ));
    }
}
