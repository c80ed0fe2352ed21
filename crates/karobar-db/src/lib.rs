//! # karobar-db: Database Layer for Karobar POS
//!
//! SQLite persistence behind the sales workflow:
//!
//! - [`repository::held_bill::HeldBillRepository`] - the authoritative store
//!   for suspended sale drafts
//! - [`repository::inventory::InventoryRepository`] - catalog lookup and the
//!   fail-closed stock deduction backing the stock gateway
//!
//! ## Architecture
//! ```text
//! karobar-session ──► karobar-db (this crate) ──► SQLite (WAL)
//!        │                   │
//!        └── karobar-core ◄──┘   (pure types only)
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::held_bill::HeldBillRepository;
pub use repository::inventory::InventoryRepository;
