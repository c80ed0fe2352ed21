//! # karobar-core: Pure Business Logic for Karobar POS
//!
//! This crate is the heart of Karobar POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Trade-dividend pricing engine (percentage / divisor)
//! - [`types`] - Domain types (InventoryItemRef, CompletedSale, HeldBill, ...)
//! - [`cart`] - The in-progress sale draft and its mutations
//! - [`receipt`] - Plain-text receipt rendering
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use karobar_core::money::Money;
//! use karobar_core::pricing::{line_total, DiscountPolicy};
//!
//! // Create money from paise (never from floats!)
//! let mrp = Money::from_paise(10_000); // ₹100.00
//!
//! // A 10% trade dividend on three units
//! let total = line_total(mrp, 3, DiscountPolicy::Percentage(1000));
//! assert_eq!(total.paise(), 27_000); // ₹270.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use karobar_core::Money` instead of
// `use karobar_core::money::Money`

pub use cart::{DraftTotals, SaleDraft};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::DiscountPolicy;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single sale draft
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_DRAFT_LINES: usize = 100;

/// Maximum quantity of a single line in a draft
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Customer name recorded on a held bill when the draft has none yet.
pub const DEFAULT_HELD_CUSTOMER: &str = "Customer";
