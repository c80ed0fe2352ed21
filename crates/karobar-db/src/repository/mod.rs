//! # Repository Module
//!
//! Repository implementations for database operations.
//!
//! ## Pattern
//! Each repository owns a clone of the connection pool and exposes typed
//! async operations. Repositories are cheap to create (pool clone is an
//! Arc bump) and are handed out by [`crate::Database`].

pub mod held_bill;
pub mod inventory;
