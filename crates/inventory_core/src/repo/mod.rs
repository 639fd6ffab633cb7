//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//! - Publish live query streams on every effective table mutation.
//!
//! # Invariants
//! - A mutation that changes zero rows publishes nothing.
//! - List streams always carry rows ordered by name ascending.

pub mod item_repo;
pub mod subscription;
