//! Core trait for the ledger collaborator seam
//!
//! The ledger itself (the mapping from expense id to entry) is owned by an
//! external service. This module defines the trait abstraction the engine
//! works against, so the surrounding application can plug in its own
//! implementation (typically backed by remote calls) and tests can use the
//! in-memory one.

use crate::core::ledger_entry::ExpenseLedgerEntry;
use crate::types::{ExpenseId, GroupId, LedgerError};

/// Storage seam for expense ledger entries
///
/// Provides operations for persisting, retrieving, and mutating entries.
/// The engine never assumes a process-wide singleton; whoever constructs
/// the engine decides where entries live.
pub trait LedgerStore {
    /// Persist an entry, replacing any previous entry with the same id
    fn insert(&mut self, entry: ExpenseLedgerEntry);

    /// Get an entry by id
    fn get(&self, expense_id: &ExpenseId) -> Option<&ExpenseLedgerEntry>;

    /// Mutate an entry in place using a closure
    ///
    /// The closure's error is propagated unchanged; implementations must
    /// fail with `LedgerError::ExpenseNotFound` when the id is unknown.
    fn update<F>(&mut self, expense_id: &ExpenseId, f: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut ExpenseLedgerEntry) -> Result<(), LedgerError>;

    /// Remove an entry, returning it
    fn remove(&mut self, expense_id: &ExpenseId) -> Result<ExpenseLedgerEntry, LedgerError>;

    /// All stored entries, in no particular order
    fn entries(&self) -> Vec<&ExpenseLedgerEntry>;

    /// All entries belonging to the given group, in no particular order
    fn entries_for_group(&self, group_id: &GroupId) -> Vec<&ExpenseLedgerEntry>;
}
