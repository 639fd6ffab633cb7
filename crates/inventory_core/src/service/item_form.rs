//! Entry/edit form state holders.
//!
//! # Responsibility
//! - Hold raw form field strings plus a derived validity flag.
//! - Gate store writes on validity; invalid input never reaches the store.
//!
//! # Invariants
//! - Validity is recomputed on every field change and means exactly "all
//!   three fields are non-blank". Numeric parseability is not checked.
//! - Unparseable price/quantity strings are coerced to zero on save, not
//!   rejected.
//! - Save and update are silent no-ops while the form is invalid.

use crate::model::item::{Item, ItemId};
use crate::repo::item_repo::{ItemRepository, RepoResult};
use crate::service::item_service::ItemService;
use serde::{Deserialize, Serialize};

/// Raw form input for one item, kept as the user typed it.
///
/// Keeping `price`/`quantity` as strings lets the form reflect exactly what
/// was entered; conversion to a storable record happens only on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    /// Key of the record being edited; `0` for a new entry.
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ItemDetails {
    /// Returns whether every field carries non-blank input.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.price.trim().is_empty()
            && !self.quantity.trim().is_empty()
    }

    /// Converts form input to a storable record.
    ///
    /// Unparseable numeric strings become `0` / `0.0` by contract.
    pub fn to_item(&self) -> Item {
        Item {
            id: self.id,
            name: self.name.clone(),
            price: self.price.trim().parse().unwrap_or(0.0),
            quantity: self.quantity.trim().parse().unwrap_or(0),
        }
    }

    /// Renders a stored record back into editable field strings.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
        }
    }
}

/// Current form state: field values plus the derived validity flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUiState {
    pub details: ItemDetails,
    pub is_entry_valid: bool,
}

impl ItemUiState {
    fn from_details(details: ItemDetails) -> Self {
        Self {
            is_entry_valid: details.is_complete(),
            details,
        }
    }
}

/// State holder for the "add item" screen.
pub struct ItemEntryForm<R: ItemRepository> {
    service: ItemService<R>,
    state: ItemUiState,
}

impl<R: ItemRepository> ItemEntryForm<R> {
    /// Creates an empty entry form backed by the given service.
    pub fn new(service: ItemService<R>) -> Self {
        Self {
            service,
            state: ItemUiState::default(),
        }
    }

    /// Current `(fields, validity)` pair.
    pub fn state(&self) -> &ItemUiState {
        &self.state
    }

    /// Replaces the field values and re-derives validity.
    pub fn update_details(&mut self, details: ItemDetails) {
        self.state = ItemUiState::from_details(details);
    }

    /// Persists the form as a new record.
    ///
    /// Returns `Ok(None)` without touching the store when the form is
    /// invalid; otherwise the assigned key.
    pub fn save(&self) -> RepoResult<Option<ItemId>> {
        if !self.state.is_entry_valid {
            return Ok(None);
        }
        let id = self.service.insert_item(&self.state.details.to_item())?;
        Ok(Some(id))
    }
}

/// State holder for the "edit item" screen.
///
/// Unlike the entry form it is bound to one record key and can populate its
/// fields from the store before editing starts.
pub struct ItemEditForm<R: ItemRepository> {
    service: ItemService<R>,
    item_id: ItemId,
    state: ItemUiState,
}

impl<R: ItemRepository> ItemEditForm<R> {
    /// Creates an edit form bound to the record with the given key.
    pub fn new(service: ItemService<R>, item_id: ItemId) -> Self {
        Self {
            service,
            item_id,
            state: ItemUiState::default(),
        }
    }

    /// Key of the record this form edits.
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Current `(fields, validity)` pair.
    pub fn state(&self) -> &ItemUiState {
        &self.state
    }

    /// Populates the fields once from the first emission of the record's
    /// live stream. An absent row leaves the form state untouched.
    pub fn load(&mut self) -> RepoResult<()> {
        let stream = self.service.item_stream(self.item_id)?;
        // The initial value is queued at subscribe time; the stream itself
        // is dropped right after, this is a one-shot read.
        if let Some(Some(item)) = stream.try_recv() {
            self.state = ItemUiState {
                details: ItemDetails::from_item(&item),
                is_entry_valid: true,
            };
        }
        Ok(())
    }

    /// Replaces the field values and re-derives validity.
    ///
    /// The form's bound key wins over whatever key the details carry.
    pub fn update_details(&mut self, mut details: ItemDetails) {
        details.id = self.item_id;
        self.state = ItemUiState::from_details(details);
    }

    /// Writes the edited fields back as a full-row replace.
    ///
    /// Returns `Ok(false)` without touching the store when the form is
    /// invalid.
    pub fn update_item(&self) -> RepoResult<bool> {
        if !self.state.is_entry_valid {
            return Ok(false);
        }
        self.service.update_item(&self.state.details.to_item())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::ItemDetails;

    #[test]
    fn completeness_ignores_numeric_parseability() {
        let details = ItemDetails {
            id: 0,
            name: "A".to_string(),
            price: "xyz".to_string(),
            quantity: "1".to_string(),
        };
        assert!(details.is_complete());
    }

    #[test]
    fn blank_fields_are_incomplete() {
        let mut details = ItemDetails {
            id: 0,
            name: "Pen".to_string(),
            price: "1.50".to_string(),
            quantity: "  ".to_string(),
        };
        assert!(!details.is_complete());

        details.quantity = "10".to_string();
        assert!(details.is_complete());
    }

    #[test]
    fn unparseable_numbers_coerce_to_zero() {
        let details = ItemDetails {
            id: 0,
            name: "A".to_string(),
            price: "xyz".to_string(),
            quantity: "ten".to_string(),
        };
        let item = details.to_item();
        assert_eq!(item.price, 0.0);
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn roundtrip_through_field_strings() {
        let details = ItemDetails {
            id: 3,
            name: "Pen".to_string(),
            price: "1.5".to_string(),
            quantity: "10".to_string(),
        };
        let item = details.to_item();
        assert_eq!(ItemDetails::from_item(&item), details);
    }
}
