//! # Collaborator Ports
//!
//! Interfaces the sale lifecycle consumes. Exact transport is the
//! implementation's business: karobar-db provides the SQLite adapters
//! ([`crate::adapters`]), tests provide in-memory mocks.

use async_trait::async_trait;
use thiserror::Error;

use karobar_core::{HeldBill, InventoryItemRef};

// =============================================================================
// Stock-Mutation Gateway
// =============================================================================

/// Stock mutation failures, per call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The item is not in the catalog (deleted, or a stale cart snapshot).
    #[error("Item not found: {0}")]
    NotFound(i64),

    /// Not enough stock to cover the requested quantity.
    #[error("Insufficient stock for item {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: i64,
        available: i64,
        requested: i64,
    },

    /// The backing store itself failed.
    #[error("Stock gateway failure: {0}")]
    Backend(String),
}

/// Adjusts an inventory item's available quantity.
///
/// Each `sell` call is atomic: it either deducts the full quantity or
/// nothing (fail closed, no partial decrement). The lifecycle calls it once
/// per line, sequentially, in cart order.
#[async_trait]
pub trait StockGateway: Send + Sync {
    /// Deducts `quantity` units of `item_id`, returning the updated
    /// catalog snapshot.
    async fn sell(&self, item_id: i64, quantity: i64) -> Result<InventoryItemRef, GatewayError>;
}

// =============================================================================
// Held-Bill Store
// =============================================================================

/// Held-bill persistence failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store failed; the operation did not take effect.
    #[error("Held-bill store failure: {0}")]
    Backend(String),
}

/// Persistence boundary for suspended sales.
///
/// The store is authoritative; any in-memory list is a cache. `delete_by_id`
/// must tolerate ids that no longer exist (success), so two clients racing
/// to resume the same bill stay harmless.
#[async_trait]
pub trait HeldBillStore: Send + Sync {
    async fn save(&self, bill: &HeldBill) -> Result<(), StoreError>;

    /// Returns all held bills in storage (insertion) order.
    async fn list_all(&self) -> Result<Vec<HeldBill>, StoreError>;

    /// Idempotent delete: absent ids are success.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

// =============================================================================
// Catalog Lookup
// =============================================================================

/// Read-only catalog search feeding [`InventoryItemRef`]s into the cart.
/// The lifecycle does not own catalog state.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<InventoryItemRef>, GatewayError>;
}
