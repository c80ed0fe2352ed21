//! # Sale Session
//!
//! One active sale draft plus the held-bill shelf, driven through three
//! lifecycle operations: process, hold, resume. All mutation of external
//! state goes through the [`StockGateway`] and [`HeldBillStore`] ports.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use karobar_core::{
    receipt, validation, CompletedSale, HeldBill, SaleDraft,
};

use crate::error::{SessionError, SessionResult};
use crate::ports::{HeldBillStore, StockGateway};

/// Result of a successful checkout: the finalized sale plus its
/// rendered receipt text.
#[derive(Debug, Clone)]
pub struct ProcessedSale {
    pub sale: CompletedSale,
    pub receipt_text: String,
}

/// The active sale plus a cache of held bills.
///
/// The held-bill cache mirrors the store; the store is authoritative.
/// `refresh_held` reloads the cache wholesale, the lifecycle operations
/// keep it in step incrementally.
pub struct SaleSession {
    draft: SaleDraft,
    held: Vec<HeldBill>,
    gateway: Arc<dyn StockGateway>,
    store: Arc<dyn HeldBillStore>,
    store_name: String,
}

impl SaleSession {
    pub fn new(
        gateway: Arc<dyn StockGateway>,
        store: Arc<dyn HeldBillStore>,
        store_name: impl Into<String>,
    ) -> Self {
        Self {
            draft: SaleDraft::default(),
            held: Vec::new(),
            gateway,
            store,
            store_name: store_name.into(),
        }
    }

    /// The active draft, for cart edits.
    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SaleDraft {
        &mut self.draft
    }

    /// Held bills in cache order (insertion order).
    pub fn held_bills(&self) -> &[HeldBill] {
        &self.held
    }

    /// Held bills newest-first, for pick lists.
    pub fn held_recent_first(&self) -> Vec<&HeldBill> {
        let mut bills: Vec<&HeldBill> = self.held.iter().collect();
        bills.sort_by(|a, b| b.held_at.cmp(&a.held_at));
        bills
    }

    /// The most recently held bill, if any. A projection over the cache,
    /// never separately stored.
    pub fn most_recent_held(&self) -> Option<&HeldBill> {
        self.held.iter().max_by_key(|b| b.held_at)
    }

    /// Reloads the held-bill cache from the store.
    pub async fn refresh_held(&mut self) -> SessionResult<()> {
        self.held = self.store.list_all().await?;
        debug!(count = self.held.len(), "Refreshed held bills");
        Ok(())
    }

    /// Finalizes the active sale.
    ///
    /// Validates the draft up front (no gateway call happens for an empty
    /// cart or a missing customer name), then deducts stock line by line in
    /// cart order. A failed deduction aborts immediately: earlier lines stay
    /// deducted and the draft stays intact so the operator can retry after
    /// fixing the cart.
    ///
    /// On success the draft resets to empty and the completed sale comes
    /// back with its rendered receipt.
    pub async fn process(&mut self) -> SessionResult<ProcessedSale> {
        validation::validate_draft_for_process(&self.draft)?;

        for line in &self.draft.lines {
            let updated = self
                .gateway
                .sell(line.item.id, line.quantity)
                .await
                .map_err(|e| {
                    warn!(item_id = line.item.id, error = %e, "Stock deduction failed");
                    e
                })?;
            debug!(
                item_id = updated.id,
                quantity = line.quantity,
                "Stock deducted"
            );
        }

        let id = Uuid::new_v4().to_string();
        let receipt_number = generate_receipt_number();
        let sale = CompletedSale::from_draft(&self.draft, id, receipt_number);
        let receipt_text = receipt::render(&sale, &self.store_name);

        info!(
            id = %sale.id,
            receipt_number = %sale.receipt_number,
            grand_total = sale.grand_total_paise,
            lines = sale.lines.len(),
            "Sale processed"
        );

        self.draft.reset();
        Ok(ProcessedSale { sale, receipt_text })
    }

    /// Suspends the active sale onto the shelf.
    ///
    /// An empty cart cannot be held. The bill is persisted first; only a
    /// successful save clears the draft and updates the cache, so a store
    /// failure leaves the sale exactly where it was.
    pub async fn hold(&mut self) -> SessionResult<HeldBill> {
        validation::validate_draft_for_hold(&self.draft)?;

        let bill = HeldBill::from_draft(&self.draft);
        self.store.save(&bill).await?;

        info!(id = %bill.id, lines = bill.snapshot.line_count(), "Sale held");
        self.held.push(bill.clone());
        self.draft.reset();
        Ok(bill)
    }

    /// Restores a held bill into the active draft.
    ///
    /// The current draft is replaced outright, including when it has lines;
    /// callers wanting to preserve in-progress work hold it first. The bill
    /// leaves the cache immediately; the store delete follows and is allowed
    /// to fail (the orphaned row is re-listed on the next refresh, and
    /// resuming it again is harmless).
    pub async fn resume(&mut self, id: &str) -> SessionResult<()> {
        let pos = self
            .held
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| SessionError::HeldBillNotFound(id.to_string()))?;

        let bill = self.held.remove(pos);
        self.draft = bill.snapshot;
        info!(id = %id, lines = self.draft.line_count(), "Held bill resumed");

        if let Err(e) = self.store.delete_by_id(id).await {
            warn!(id = %id, error = %e, "Failed to delete resumed bill from store");
        }
        Ok(())
    }

    /// Discards a held bill without touching the active draft.
    ///
    /// Store delete happens first; the cache drops the bill only once the
    /// store confirms, so a failed delete leaves the bill visible.
    pub async fn delete_held(&mut self, id: &str) -> SessionResult<()> {
        if !self.held.iter().any(|b| b.id == id) {
            return Err(SessionError::HeldBillNotFound(id.to_string()));
        }

        self.store.delete_by_id(id).await?;
        self.held.retain(|b| b.id != id);
        info!(id = %id, "Held bill deleted");
        Ok(())
    }
}

/// `YYMMDD-HHMMSS-NNNN`, e.g. `260829-143522-0481`.
fn generate_receipt_number() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let random: u16 = (nanos % 10000) as u16;
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_number_shape() {
        let n = generate_receipt_number();
        let parts: Vec<&str> = n.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 6);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 4);
    }
}
