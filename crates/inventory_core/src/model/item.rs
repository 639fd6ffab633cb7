//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical inventory record persisted in the `items` table.
//!
//! # Invariants
//! - `id` uniquely identifies a row; the store assigns it on insert.
//! - `id == 0` means "not yet persisted"; the store never hands out 0.

use serde::{Deserialize, Serialize};

/// Stable row identifier for inventory records.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// `0` marks a record that has not been assigned a key yet.
pub type ItemId = i64;

/// Canonical inventory record.
///
/// `price` is stored as a plain non-negative decimal; currency formatting is
/// a presentation concern and stays out of core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned primary key. `0` until the first insert.
    pub id: ItemId,
    /// Display name. Input validation keeps this non-blank.
    pub name: String,
    /// Unit price. Unparseable form input is coerced to `0.0` upstream.
    pub price: f64,
    /// Stock count. Unparseable form input is coerced to `0` upstream.
    pub quantity: i64,
}

impl Item {
    /// Creates a new record with an unassigned key.
    ///
    /// # Invariants
    /// - `id` starts as `0`; the store assigns the real key on insert.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Returns whether this record has been assigned a store key.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}
