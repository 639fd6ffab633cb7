//! Cancellable pull handles for live query streams.
//!
//! # Responsibility
//! - Carry values pushed by the store to one subscriber.
//! - Tie cancellation to handle drop so teardown is deterministic.
//!
//! # Invariants
//! - The first value (the query result at subscribe time) is already queued
//!   when the handle is handed out.
//! - A stream never terminates on its own; it ends only when the subscriber
//!   drops the handle or the store itself is dropped.

use std::sync::mpsc::Receiver;

/// One subscriber's end of a live query stream.
///
/// Values are pushed by the store while it applies mutations and buffered
/// here until the subscriber pulls them. Dropping the handle cancels the
/// subscription; the store prunes the dead sender on its next publish.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: Receiver<T>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(rx: Receiver<T>) -> Self {
        Self { rx }
    }

    /// Blocks until the next value arrives.
    ///
    /// Returns `None` only when the publishing store has been dropped.
    pub fn recv(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Returns the next buffered value without blocking.
    ///
    /// `None` means no value is currently queued (or the store is gone).
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Drains every currently buffered value, yielding the most recent.
    ///
    /// Useful for callers that only care about the latest state after a
    /// burst of mutations.
    pub fn latest(&self) -> Option<T> {
        self.rx.try_iter().last()
    }
}
