//! # Inventory Repository
//!
//! Catalog lookup and stock mutation for the sales workflow.
//!
//! ## Fail-Closed Stock Deduction
//! ```text
//! UPDATE inventory_items
//! SET available_stock = available_stock - ?qty
//! WHERE id = ?id AND available_stock >= ?qty
//! ```
//! The quantity guard and the decrement are one statement, so a sell can
//! never partially apply: either the full quantity comes off the shelf or
//! nothing does. Zero rows affected means the caller distinguishes
//! not-found from insufficient stock with a follow-up read.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use karobar_core::InventoryItemRef;

/// A catalog item as stored, including live stock.
///
/// The sales slice only snapshots a subset ([`InventoryItemRef`]); the full
/// row keeps what the terminal shows while picking items.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InventoryItem {
    pub id: i64,
    pub item_code: String,
    pub item_name: String,
    pub division: String,
    pub brand: String,
    pub base_unit: String,
    pub mrp_paise: i64,
    pub available_stock: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Freezes the sale-relevant fields into a cart snapshot.
    pub fn to_ref(&self) -> InventoryItemRef {
        InventoryItemRef {
            id: self.id,
            item_code: self.item_code.clone(),
            item_name: self.item_name.clone(),
            base_unit: self.base_unit.clone(),
            mrp_paise: self.mrp_paise,
        }
    }
}

/// A new catalog item to insert (seed tool and tests).
#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub item_code: String,
    pub item_name: String,
    pub division: String,
    pub brand: String,
    pub base_unit: String,
    pub mrp_paise: i64,
    pub available_stock: i64,
}

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Searches active items by code or name (case-insensitive substring).
    pub async fn search(&self, query: &str, limit: i64) -> DbResult<Vec<InventoryItem>> {
        let pattern = format!("%{}%", query.trim());

        let items: Vec<InventoryItem> = sqlx::query_as(
            r#"
            SELECT id, item_code, item_name, division, brand, base_unit,
                   mrp_paise, available_stock, status, created_at, updated_at
            FROM inventory_items
            WHERE status = 'active'
              AND (item_code LIKE ?1 OR item_name LIKE ?1)
            ORDER BY item_name
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<InventoryItem>> {
        let item: Option<InventoryItem> = sqlx::query_as(
            r#"
            SELECT id, item_code, item_name, division, brand, base_unit,
                   mrp_paise, available_stock, status, created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new catalog item, returning it with its generated id.
    pub async fn insert(&self, item: &NewInventoryItem) -> DbResult<InventoryItem> {
        debug!(code = %item.item_code, "Inserting inventory item");
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO inventory_items (
                item_code, item_name, division, brand, base_unit,
                mrp_paise, available_stock, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'active', ?8, ?8)
            RETURNING id
            "#,
        )
        .bind(&item.item_code)
        .bind(&item.item_name)
        .bind(&item.division)
        .bind(&item.brand)
        .bind(&item.base_unit)
        .bind(item.mrp_paise)
        .bind(item.available_stock)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("InventoryItem", id.to_string()))
    }

    /// Deducts stock for a sale, fail closed.
    ///
    /// Returns `true` if the full quantity was deducted, `false` if the
    /// conditional update matched no row (item missing or not enough
    /// stock). No partial decrement is possible.
    pub async fn deduct_stock(&self, id: i64, quantity: i64) -> DbResult<bool> {
        debug!(id = %id, quantity = %quantity, "Deducting stock");
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET available_stock = available_stock - ?2,
                updated_at = ?3
            WHERE id = ?1 AND available_stock >= ?2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Adds stock (goods inward / correction).
    pub async fn add_stock(&self, id: i64, quantity: i64) -> DbResult<InventoryItem> {
        debug!(id = %id, quantity = %quantity, "Adding stock");
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET available_stock = available_stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InventoryItem", id.to_string()));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("InventoryItem", id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_repo() -> InventoryRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().inventory()
    }

    fn new_item(code: &str, name: &str, stock: i64) -> NewInventoryItem {
        NewInventoryItem {
            item_code: code.to_string(),
            item_name: name.to_string(),
            division: "FMCG".to_string(),
            brand: "Surya".to_string(),
            base_unit: "pcs".to_string(),
            mrp_paise: 9_900,
            available_stock: stock,
        }
    }

    #[tokio::test]
    async fn test_insert_and_search() {
        let repo = test_repo().await;
        repo.insert(&new_item("ATTA-5", "Surya Atta 5kg", 10))
            .await
            .unwrap();
        repo.insert(&new_item("RICE-1", "Basmati Rice 1kg", 5))
            .await
            .unwrap();

        let hits = repo.search("atta", 20).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item_code, "ATTA-5");

        let by_code = repo.search("RICE", 20).await.unwrap();
        assert_eq!(by_code.len(), 1);
    }

    #[tokio::test]
    async fn test_deduct_stock_happy_path() {
        let repo = test_repo().await;
        let item = repo
            .insert(&new_item("ATTA-5", "Surya Atta 5kg", 10))
            .await
            .unwrap();

        assert!(repo.deduct_stock(item.id, 4).await.unwrap());
        let after = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.available_stock, 6);
    }

    #[tokio::test]
    async fn test_deduct_stock_fails_closed() {
        let repo = test_repo().await;
        let item = repo
            .insert(&new_item("ATTA-5", "Surya Atta 5kg", 3))
            .await
            .unwrap();

        // Not enough stock: nothing is deducted, not even partially.
        assert!(!repo.deduct_stock(item.id, 5).await.unwrap());
        let after = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.available_stock, 3);

        // Missing item is also a clean false.
        assert!(!repo.deduct_stock(9_999, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_stock() {
        let repo = test_repo().await;
        let item = repo
            .insert(&new_item("ATTA-5", "Surya Atta 5kg", 3))
            .await
            .unwrap();

        let after = repo.add_stock(item.id, 7).await.unwrap();
        assert_eq!(after.available_stock, 10);

        assert!(repo.add_stock(9_999, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_item_code_rejected() {
        let repo = test_repo().await;
        repo.insert(&new_item("ATTA-5", "Surya Atta 5kg", 3))
            .await
            .unwrap();
        let err = repo
            .insert(&new_item("ATTA-5", "Other", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
