//! # karobar-session: Sale Lifecycle for Karobar POS
//!
//! The state machine that drives a sale:
//!
//! ```text
//! Building ──process──► Completed (stock deducted, record + receipt emitted)
//!    │  ▲
//!  hold resume(id)
//!    ▼  │
//!   Held ──delete(id)──► (gone)
//! ```
//!
//! Process/hold/resume/delete are transient busy states: observable through
//! [`handle::SessionHandle`]'s per-operation flags for a UI loading
//! indicator, never stored in the data model.
//!
//! ## Modules
//! - [`ports`] - collaborator interfaces (stock gateway, held-bill store,
//!   catalog lookup)
//! - [`session`] - the explicit per-session state object and lifecycle
//!   operations
//! - [`handle`] - shared, re-entrancy-guarded handle for a UI
//! - [`adapters`] - karobar-db implementations of the ports
//! - [`error`] - the uniform user-facing error channel

pub mod adapters;
pub mod error;
pub mod handle;
pub mod ports;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use handle::SessionHandle;
pub use ports::{CatalogLookup, GatewayError, HeldBillStore, StockGateway, StoreError};
pub use session::{ProcessedSale, SaleSession};
