//! # Error Types
//!
//! Domain-specific error types for karobar-core.
//!
//! ## Error Hierarchy
//! ```text
//! karobar-core errors (this file)
//! ├── CoreError        - General domain errors
//! └── ValidationError  - Input validation failures
//!
//! karobar-db errors (separate crate)
//! └── DbError          - Database operation failures
//!
//! karobar-session errors (separate crate)
//! └── SessionError     - What the UI notification channel sees
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item code, index, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Draft has exceeded the maximum allowed lines.
    #[error("Sale cannot have more than {max} lines")]
    DraftTooLarge { max: usize },

    /// A line index does not exist in the draft.
    ///
    /// ## When This Occurs
    /// - Stale UI state after a concurrent remove
    /// - Off-by-one in a caller
    #[error("No sale line at index {index} (draft has {len} lines)")]
    LineIndexOutOfBounds { index: usize, len: usize },

    /// Imported sale data is structurally invalid.
    #[error("Invalid sale data: {0}")]
    InvalidSaleData(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The draft has no lines for an operation that needs them.
    ///
    /// ## When This Occurs
    /// - Process on an empty cart
    /// - Hold with nothing to hold
    #[error("There are no items in the sale")]
    EmptyDraft,

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be at least one.
    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    /// Discount parameters would misprice the line.
    ///
    /// Flagged as a configuration error rather than silently accepted:
    /// a divisor below 1 would increase the price beyond MRP.
    #[error("Invalid discount: {reason}")]
    InvalidDiscount { reason: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
