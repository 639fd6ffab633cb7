use inventory_core::db::open_db_in_memory;
use inventory_core::{
    Item, ItemDetails, ItemEditForm, ItemEntryForm, ItemRepository, ItemService,
    SqliteItemRepository,
};

fn new_repo() -> SqliteItemRepository {
    SqliteItemRepository::new(open_db_in_memory().unwrap())
}

fn details(name: &str, price: &str, quantity: &str) -> ItemDetails {
    ItemDetails {
        id: 0,
        name: name.to_string(),
        price: price.to_string(),
        quantity: quantity.to_string(),
    }
}

#[test]
fn entry_form_tracks_validity_per_field_change() {
    let repo = new_repo();
    let mut form = ItemEntryForm::new(ItemService::new(repo));

    assert!(!form.state().is_entry_valid);

    form.update_details(details("Pen", "", "10"));
    assert!(!form.state().is_entry_valid);

    form.update_details(details("Pen", "1.50", "10"));
    assert!(form.state().is_entry_valid);

    // Non-numeric input is still "valid"; only blankness matters.
    form.update_details(details("A", "xyz", "1"));
    assert!(form.state().is_entry_valid);
}

#[test]
fn save_with_blank_field_performs_no_store_mutation() {
    let repo = new_repo();
    let mut form = ItemEntryForm::new(ItemService::new(repo.clone()));

    form.update_details(details("Pen", "1.50", " "));
    let saved = form.save().unwrap();
    assert_eq!(saved, None);
    assert!(repo.list_items().unwrap().is_empty());
}

#[test]
fn save_persists_coerced_row_and_row_stream_sees_it() {
    let repo = new_repo();
    let mut form = ItemEntryForm::new(ItemService::new(repo.clone()));

    form.update_details(details("Pen", "1.50", "10"));
    let id = form.save().unwrap().expect("valid form must save");
    assert_eq!(id, 1);

    let stored = repo.get_item(id).unwrap().unwrap();
    assert_eq!(
        stored,
        Item {
            id: 1,
            name: "Pen".to_string(),
            price: 1.5,
            quantity: 10,
        }
    );

    let stream = repo.watch_item(id).unwrap();
    assert_eq!(stream.try_recv().unwrap(), Some(stored));
}

#[test]
fn save_coerces_unparseable_numbers_to_zero() {
    let repo = new_repo();
    let mut form = ItemEntryForm::new(ItemService::new(repo.clone()));

    form.update_details(details("A", "xyz", "ten"));
    let id = form.save().unwrap().expect("non-numeric input is valid");

    let stored = repo.get_item(id).unwrap().unwrap();
    assert_eq!(stored.price, 0.0);
    assert_eq!(stored.quantity, 0);
}

#[test]
fn edit_form_loads_fields_from_first_emission() {
    let repo = new_repo();
    let id = repo.insert_item(&Item::new("Pen", 1.5, 10)).unwrap();

    let mut form = ItemEditForm::new(ItemService::new(repo), id);
    form.load().unwrap();

    let state = form.state();
    assert!(state.is_entry_valid);
    assert_eq!(state.details.name, "Pen");
    assert_eq!(state.details.price, "1.5");
    assert_eq!(state.details.quantity, "10");
    assert_eq!(state.details.id, id);
}

#[test]
fn edit_form_load_ignores_absent_row() {
    let repo = new_repo();
    let mut form = ItemEditForm::new(ItemService::new(repo), 99);

    form.load().unwrap();
    assert!(!form.state().is_entry_valid);
    assert_eq!(form.state().details, ItemDetails::default());
}

#[test]
fn edit_form_update_replaces_the_row_when_valid() {
    let repo = new_repo();
    let id = repo.insert_item(&Item::new("Pen", 1.5, 10)).unwrap();

    let mut form = ItemEditForm::new(ItemService::new(repo.clone()), id);
    form.load().unwrap();

    form.update_details(details("Gel Pen", "2.25", "4"));
    assert!(form.update_item().unwrap());

    let stored = repo.get_item(id).unwrap().unwrap();
    assert_eq!(stored.name, "Gel Pen");
    assert_eq!(stored.price, 2.25);
    assert_eq!(stored.quantity, 4);
}

#[test]
fn edit_form_update_is_a_noop_when_invalid() {
    let repo = new_repo();
    let id = repo.insert_item(&Item::new("Pen", 1.5, 10)).unwrap();

    let mut form = ItemEditForm::new(ItemService::new(repo.clone()), id);
    form.load().unwrap();

    form.update_details(details("", "2.25", "4"));
    assert!(!form.update_item().unwrap());

    let stored = repo.get_item(id).unwrap().unwrap();
    assert_eq!(stored.name, "Pen");
}

#[test]
fn edit_form_pins_details_to_its_bound_key() {
    let repo = new_repo();
    let id = repo.insert_item(&Item::new("Pen", 1.5, 10)).unwrap();

    let mut form = ItemEditForm::new(ItemService::new(repo.clone()), id);
    let mut stray = details("Gel Pen", "2.25", "4");
    stray.id = 777;
    form.update_details(stray);
    assert_eq!(form.state().details.id, id);

    assert!(form.update_item().unwrap());
    assert_eq!(repo.get_item(id).unwrap().unwrap().name, "Gel Pen");
    assert!(repo.get_item(777).unwrap().is_none());
}
