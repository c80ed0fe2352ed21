//! # SQLite Port Adapters
//!
//! Wires the lifecycle ports to the karobar-db repositories. The one
//! decision that lives here is error translation: repository errors fold
//! into the coarse-grained port errors the session reports to operators.

use async_trait::async_trait;
use tracing::warn;

use karobar_core::{HeldBill, InventoryItemRef};
use karobar_db::{DbError, HeldBillRepository, InventoryRepository};

use crate::ports::{CatalogLookup, GatewayError, HeldBillStore, StockGateway, StoreError};

#[async_trait]
impl StockGateway for InventoryRepository {
    async fn sell(&self, item_id: i64, quantity: i64) -> Result<InventoryItemRef, GatewayError> {
        let deducted = self
            .deduct_stock(item_id, quantity)
            .await
            .map_err(|e| GatewayError::Backend(e.to_string()))?;

        if deducted {
            let item = self
                .get_by_id(item_id)
                .await
                .map_err(|e| GatewayError::Backend(e.to_string()))?
                .ok_or(GatewayError::NotFound(item_id))?;
            return Ok(item.to_ref());
        }

        // The conditional UPDATE matched no row: the item is gone or
        // short on stock. Re-read to tell the two apart.
        match self.get_by_id(item_id).await {
            Ok(Some(item)) => Err(GatewayError::InsufficientStock {
                item_id,
                available: item.available_stock,
                requested: quantity,
            }),
            Ok(None) => Err(GatewayError::NotFound(item_id)),
            Err(e) => Err(GatewayError::Backend(e.to_string())),
        }
    }
}

#[async_trait]
impl CatalogLookup for InventoryRepository {
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<InventoryItemRef>, GatewayError> {
        let items = InventoryRepository::search(self, query, limit)
            .await
            .map_err(|e| GatewayError::Backend(e.to_string()))?;
        Ok(items.iter().map(|i| i.to_ref()).collect())
    }
}

#[async_trait]
impl HeldBillStore for HeldBillRepository {
    async fn save(&self, bill: &HeldBill) -> Result<(), StoreError> {
        HeldBillRepository::save(self, bill)
            .await
            .map_err(store_error)
    }

    async fn list_all(&self) -> Result<Vec<HeldBill>, StoreError> {
        HeldBillRepository::list_all(self).await.map_err(store_error)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        HeldBillRepository::delete_by_id(self, id)
            .await
            .map_err(store_error)
    }
}

fn store_error(e: DbError) -> StoreError {
    warn!(error = %e, "Held-bill store operation failed");
    StoreError::Backend(e.to_string())
}
