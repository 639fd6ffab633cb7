//! Domain model for inventory records.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `ItemId`.
//! - Deletion is a hard delete of exactly one row; there is no tombstone
//!   state.

pub mod item;
