//! Item use-case service.
//!
//! # Responsibility
//! - Re-expose repository operations under stable use-case names.
//! - Keep form state holders depending on the `ItemRepository` seam rather
//!   than a concrete store.
//!
//! # Invariants
//! - Pure delegation; the service adds no behavior of its own.

use crate::model::item::{Item, ItemId};
use crate::repo::item_repo::{ItemRepository, RepoResult};
use crate::repo::subscription::Subscription;

/// Use-case service wrapper for item CRUD and live streams.
pub struct ItemService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts one record through repository persistence.
    pub fn insert_item(&self, item: &Item) -> RepoResult<ItemId> {
        self.repo.insert_item(item)
    }

    /// Full-row replace of an existing record by key.
    pub fn update_item(&self, item: &Item) -> RepoResult<()> {
        self.repo.update_item(item)
    }

    /// Removes the record matching the given record's key.
    pub fn delete_item(&self, item: &Item) -> RepoResult<()> {
        self.repo.delete_item(item)
    }

    /// One-shot read of a single record.
    pub fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        self.repo.get_item(id)
    }

    /// One-shot read of all records ordered by name ascending.
    pub fn list_items(&self) -> RepoResult<Vec<Item>> {
        self.repo.list_items()
    }

    /// Live stream of one record by key.
    pub fn item_stream(&self, id: ItemId) -> RepoResult<Subscription<Option<Item>>> {
        self.repo.watch_item(id)
    }

    /// Live stream of the full ordered record set.
    pub fn all_items_stream(&self) -> RepoResult<Subscription<Vec<Item>>> {
        self.repo.watch_items()
    }
}
