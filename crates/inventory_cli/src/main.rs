//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `inventory_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use inventory_core::db::open_db_in_memory;
use inventory_core::{Item, ItemRepository, SqliteItemRepository};

fn main() {
    // Tiny probe to validate core crate wiring without any UI runtime.
    println!("inventory_core ping={}", inventory_core::ping());
    println!("inventory_core version={}", inventory_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("inventory_core db bootstrap failed: {err}");
            std::process::exit(1);
        }
    };

    let repo = SqliteItemRepository::new(conn);
    let probe = Item::new("Pen", 1.5, 10);
    match repo.insert_item(&probe).and_then(|_| repo.list_items()) {
        Ok(items) => println!("inventory_core smoke rows={}", items.len()),
        Err(err) => {
            eprintln!("inventory_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}
