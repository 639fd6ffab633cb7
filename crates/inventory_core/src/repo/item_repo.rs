//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `items` table.
//! - Serve live query streams (single row and full ordered list).
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Inserting a row whose key already exists is a silent no-op; the stored
//!   row is left untouched and no stream emission happens.
//! - All mutating calls hold the connection lock for the whole write, so
//!   conflicting writes serialize at the table level.
//! - Row streams re-emit only when the watched row's value actually changed;
//!   list streams re-emit after every effective table mutation.

use crate::db::DbError;
use crate::model::item::{Item, ItemId};
use crate::repo::subscription::Subscription;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

const ITEM_SELECT_SQL: &str = "SELECT id, name, price, quantity FROM items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A store lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "item store lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for item CRUD operations and live streams.
///
/// This is the seam the UI-facing layers depend on; nothing above it knows
/// the storage technology.
pub trait ItemRepository {
    /// Inserts one record, returning the key it is stored under.
    ///
    /// A record with `id <= 0` gets a store-assigned key. A record carrying
    /// an existing key is ignored and the existing key returned unchanged.
    fn insert_item(&self, item: &Item) -> RepoResult<ItemId>;

    /// Full-row replace of the record matching `item.id`.
    ///
    /// Matching no row is a no-op, not an error.
    fn update_item(&self, item: &Item) -> RepoResult<()>;

    /// Removes the record matching `item.id`. Matching no row is a no-op.
    fn delete_item(&self, item: &Item) -> RepoResult<()>;

    /// One-shot read of a single record.
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;

    /// One-shot read of all records, ordered by name ascending.
    fn list_items(&self) -> RepoResult<Vec<Item>>;

    /// Live stream of one row: current value (or absence) immediately, then
    /// a new value whenever that row's stored value changes.
    fn watch_item(&self, id: ItemId) -> RepoResult<Subscription<Option<Item>>>;

    /// Live stream of the full ordered row set: current set immediately,
    /// then the new set after every effective table mutation.
    fn watch_items(&self) -> RepoResult<Subscription<Vec<Item>>>;
}

enum PendingEmit {
    All(Vec<Item>),
    ByKey(Option<Item>),
}

enum Watcher {
    All {
        tx: Sender<Vec<Item>>,
    },
    ByKey {
        id: ItemId,
        last: Option<Item>,
        tx: Sender<Option<Item>>,
    },
}

/// SQLite-backed item repository.
///
/// Owns the connection behind a lock so every handle shares one writer, and
/// keeps the subscriber registry the write path publishes to. Cloning is
/// cheap; clones share the same store state.
#[derive(Clone)]
pub struct SqliteItemRepository {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    conn: Mutex<Connection>,
    watchers: Mutex<Vec<Watcher>>,
}

impl SqliteItemRepository {
    /// Wraps an already-bootstrapped connection (see `db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                conn: Mutex::new(conn),
                watchers: Mutex::new(Vec::new()),
            }),
        }
    }

    fn conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.inner.conn.lock().map_err(|_| RepoError::Poisoned)
    }

    fn watchers(&self) -> RepoResult<MutexGuard<'_, Vec<Watcher>>> {
        self.inner.watchers.lock().map_err(|_| RepoError::Poisoned)
    }

    /// Re-runs every live watcher's query and pushes changed results.
    ///
    /// Called after each effective mutation, once the connection lock from
    /// the write itself has been released. Dead subscribers (dropped
    /// handles) are pruned here.
    fn publish(&self) -> RepoResult<()> {
        let conn = self.conn()?;
        let mut watchers = self.watchers()?;

        // Values are computed up front so a query fault propagates without
        // leaving the registry half-drained.
        let mut all_rows: Option<Vec<Item>> = None;
        let mut pending = Vec::with_capacity(watchers.len());
        for watcher in watchers.iter() {
            match watcher {
                Watcher::All { .. } => {
                    let rows = match &all_rows {
                        Some(rows) => rows.clone(),
                        None => {
                            let rows = query_all(&conn)?;
                            all_rows = Some(rows.clone());
                            rows
                        }
                    };
                    pending.push(PendingEmit::All(rows));
                }
                Watcher::ByKey { id, .. } => {
                    pending.push(PendingEmit::ByKey(query_one(&conn, *id)?));
                }
            }
        }

        let mut emits = pending.into_iter();
        watchers.retain_mut(|watcher| match (watcher, emits.next()) {
            (Watcher::All { tx }, Some(PendingEmit::All(rows))) => tx.send(rows).is_ok(),
            (Watcher::ByKey { last, tx, .. }, Some(PendingEmit::ByKey(value))) => {
                if value == *last {
                    return true;
                }
                if tx.send(value.clone()).is_err() {
                    return false;
                }
                *last = value;
                true
            }
            // Registry and pending list are built in lockstep; an arity or
            // shape mismatch cannot happen, keep the watcher if it does.
            _ => true,
        });

        Ok(())
    }
}

impl ItemRepository for SqliteItemRepository {
    fn insert_item(&self, item: &Item) -> RepoResult<ItemId> {
        let id = {
            let conn = self.conn()?;
            if item.id <= 0 {
                conn.execute(
                    "INSERT INTO items (name, price, quantity) VALUES (?1, ?2, ?3);",
                    params![item.name.as_str(), item.price, item.quantity],
                )?;
                conn.last_insert_rowid()
            } else {
                let changed = conn.execute(
                    "INSERT OR IGNORE INTO items (id, name, price, quantity)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![item.id, item.name.as_str(), item.price, item.quantity],
                )?;
                if changed == 0 {
                    // Key collision: keep the stored row, tell no one.
                    return Ok(item.id);
                }
                item.id
            }
        };

        self.publish()?;
        Ok(id)
    }

    fn update_item(&self, item: &Item) -> RepoResult<()> {
        let changed = {
            let conn = self.conn()?;
            conn.execute(
                "UPDATE items SET name = ?1, price = ?2, quantity = ?3 WHERE id = ?4;",
                params![item.name.as_str(), item.price, item.quantity, item.id],
            )?
        };

        if changed > 0 {
            self.publish()?;
        }
        Ok(())
    }

    fn delete_item(&self, item: &Item) -> RepoResult<()> {
        let changed = {
            let conn = self.conn()?;
            conn.execute("DELETE FROM items WHERE id = ?1;", [item.id])?
        };

        if changed > 0 {
            self.publish()?;
        }
        Ok(())
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let conn = self.conn()?;
        query_one(&conn, id)
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let conn = self.conn()?;
        query_all(&conn)
    }

    fn watch_item(&self, id: ItemId) -> RepoResult<Subscription<Option<Item>>> {
        let conn = self.conn()?;
        let mut watchers = self.watchers()?;

        let initial = query_one(&conn, id)?;
        let (tx, rx) = mpsc::channel();
        // The receiver is alive in this scope, so the send cannot fail.
        let _ = tx.send(initial.clone());
        watchers.push(Watcher::ByKey {
            id,
            last: initial,
            tx,
        });

        Ok(Subscription::new(rx))
    }

    fn watch_items(&self) -> RepoResult<Subscription<Vec<Item>>> {
        let conn = self.conn()?;
        let mut watchers = self.watchers()?;

        let initial = query_all(&conn)?;
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(initial);
        watchers.push(Watcher::All { tx });

        Ok(Subscription::new(rx))
    }
}

fn query_one(conn: &Connection, id: ItemId) -> RepoResult<Option<Item>> {
    let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(item_from_row(row)?));
    }
    Ok(None)
}

fn query_all(conn: &Connection) -> RepoResult<Vec<Item>> {
    // Name ties are broken by key so re-emissions stay deterministic.
    let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(item_from_row(row)?);
    }
    Ok(items)
}

fn item_from_row(row: &Row<'_>) -> RepoResult<Item> {
    Ok(Item {
        id: row.get("id")?,
        name: row.get("name")?,
        price: row.get("price")?,
        quantity: row.get("quantity")?,
    })
}
