//! # Held-Bill Repository
//!
//! The authoritative store for suspended sale drafts.
//!
//! ## Contract
//! - `save` upserts by bill id (re-holding the same id replaces it)
//! - `list_all` returns storage (insertion) order; display ordering is the
//!   caller's projection
//! - `delete_by_id` is idempotent: deleting an id that no longer exists is
//!   success. Two terminals may race to resume the same bill; the second
//!   delete must come back harmless.
//!
//! The draft snapshot is persisted as a JSON column and restored verbatim
//! on resume.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use karobar_core::{HeldBill, SaleDraft};

/// Row shape for `held_bills`; the snapshot stays serialized until mapped.
#[derive(Debug, sqlx::FromRow)]
struct HeldBillRow {
    id: String,
    held_at: DateTime<Utc>,
    customer_name: String,
    snapshot: String,
}

impl HeldBillRow {
    fn into_bill(self) -> DbResult<HeldBill> {
        let snapshot: SaleDraft = serde_json::from_str(&self.snapshot)?;
        Ok(HeldBill {
            id: self.id,
            held_at: self.held_at,
            customer_name: self.customer_name,
            snapshot,
        })
    }
}

/// Repository for held-bill database operations.
#[derive(Debug, Clone)]
pub struct HeldBillRepository {
    pool: SqlitePool,
}

impl HeldBillRepository {
    /// Creates a new HeldBillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HeldBillRepository { pool }
    }

    /// Persists a held bill (upsert by id).
    pub async fn save(&self, bill: &HeldBill) -> DbResult<()> {
        debug!(id = %bill.id, customer = %bill.customer_name, "Saving held bill");

        let snapshot = serde_json::to_string(&bill.snapshot)?;

        sqlx::query(
            r#"
            INSERT INTO held_bills (id, held_at, customer_name, snapshot)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET
                held_at = excluded.held_at,
                customer_name = excluded.customer_name,
                snapshot = excluded.snapshot
            "#,
        )
        .bind(&bill.id)
        .bind(bill.held_at)
        .bind(&bill.customer_name)
        .bind(snapshot)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns all held bills in storage (insertion) order.
    pub async fn list_all(&self) -> DbResult<Vec<HeldBill>> {
        let rows: Vec<HeldBillRow> = sqlx::query_as(
            r#"
            SELECT id, held_at, customer_name, snapshot
            FROM held_bills
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(HeldBillRow::into_bill).collect()
    }

    /// Deletes a held bill by id.
    ///
    /// Idempotent: an id that no longer exists deletes zero rows and is
    /// still success.
    pub async fn delete_by_id(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting held bill");

        sqlx::query("DELETE FROM held_bills WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
