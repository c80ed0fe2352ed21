//! # Session Error Types

use thiserror::Error;

use crate::ports::{GatewayError, StoreError};
use karobar_core::ValidationError;

/// Failure surface for sale-lifecycle operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The draft failed pre-flight checks; no collaborator was called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A stock mutation failed partway through processing. Lines already
    /// deducted stay deducted; the draft is preserved for retry.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The held-bill store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Resume or delete targeted a held bill that is no longer cached.
    #[error("Held bill not found: {0}")]
    HeldBillNotFound(String),

    /// Another invocation of the same operation is still in flight.
    #[error("Operation already in progress: {op}")]
    Busy { op: &'static str },
}

pub type SessionResult<T> = Result<T, SessionError>;
