//! In-memory ledger store
//!
//! This module provides the HashMap-backed reference implementation of
//! [`LedgerStore`]. The engine tests run against it, and it stands in for
//! the HTTP-backed store of the surrounding application.

use std::collections::HashMap;

use crate::core::ledger_entry::ExpenseLedgerEntry;
use crate::core::traits::LedgerStore;
use crate::types::{ExpenseId, GroupId, LedgerError};

/// HashMap-backed [`LedgerStore`] implementation
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    /// Map of expense id to ledger entry
    entries: HashMap<ExpenseId, ExpenseLedgerEntry>,
}

impl InMemoryLedgerStore {
    /// Create a new empty store
    pub fn new() -> Self {
        InMemoryLedgerStore {
            entries: HashMap::new(),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn insert(&mut self, entry: ExpenseLedgerEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    fn get(&self, expense_id: &ExpenseId) -> Option<&ExpenseLedgerEntry> {
        self.entries.get(expense_id)
    }

    fn update<F>(&mut self, expense_id: &ExpenseId, f: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut ExpenseLedgerEntry) -> Result<(), LedgerError>,
    {
        let entry = self
            .entries
            .get_mut(expense_id)
            .ok_or_else(|| LedgerError::expense_not_found(expense_id))?;
        f(entry)
    }

    fn remove(&mut self, expense_id: &ExpenseId) -> Result<ExpenseLedgerEntry, LedgerError> {
        self.entries
            .remove(expense_id)
            .ok_or_else(|| LedgerError::expense_not_found(expense_id))
    }

    fn entries(&self) -> Vec<&ExpenseLedgerEntry> {
        self.entries.values().collect()
    }

    fn entries_for_group(&self, group_id: &GroupId) -> Vec<&ExpenseLedgerEntry> {
        self.entries
            .values()
            .filter(|entry| entry.group_id == *group_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MemberId, Money, SplitMode};

    fn entry_in(group: &str, total_cents: i64, ids: &[&str]) -> ExpenseLedgerEntry {
        let members: Vec<MemberId> = ids.iter().map(|id| MemberId::new(*id)).collect();
        ExpenseLedgerEntry::create(
            "expense",
            Money::from_minor_units(total_cents),
            GroupId::new(group),
            SplitMode::Even,
            &members,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = InMemoryLedgerStore::new();
        let entry = entry_in("g1", 500, &["a"]);
        let id = entry.id.clone();

        store.insert(entry.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id), Some(&entry));
        assert!(store.get(&ExpenseId::new("missing")).is_none());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut store = InMemoryLedgerStore::new();
        let mut entry = entry_in("g1", 500, &["a"]);
        let id = entry.id.clone();
        store.insert(entry.clone());

        entry.description = "updated".to_string();
        store.insert(entry);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().description, "updated");
    }

    #[test]
    fn test_update_applies_closure() {
        let mut store = InMemoryLedgerStore::new();
        let entry = entry_in("g1", 500, &["a"]);
        let id = entry.id.clone();
        store.insert(entry);

        store
            .update(&id, |entry| entry.mark_paid(&MemberId::new("a"), true))
            .unwrap();

        assert!(store.get(&id).unwrap().is_settled());
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut store = InMemoryLedgerStore::new();
        let missing = ExpenseId::new("missing");

        let result = store.update(&missing, |_| Ok(()));

        assert_eq!(result, Err(LedgerError::expense_not_found(&missing)));
    }

    #[test]
    fn test_update_propagates_closure_error() {
        let mut store = InMemoryLedgerStore::new();
        let entry = entry_in("g1", 500, &["a"]);
        let id = entry.id.clone();
        store.insert(entry);

        let result = store.update(&id, |entry| entry.mark_paid(&MemberId::new("z"), true));

        assert!(matches!(
            result,
            Err(LedgerError::MemberNotAllocated { .. })
        ));
    }

    #[test]
    fn test_remove_returns_entry() {
        let mut store = InMemoryLedgerStore::new();
        let entry = entry_in("g1", 500, &["a"]);
        let id = entry.id.clone();
        store.insert(entry.clone());

        assert_eq!(store.remove(&id), Ok(entry));
        assert!(store.is_empty());
        assert_eq!(store.remove(&id), Err(LedgerError::expense_not_found(&id)));
    }

    #[test]
    fn test_entries_for_group_filters() {
        let mut store = InMemoryLedgerStore::new();
        store.insert(entry_in("g1", 100, &["a"]));
        store.insert(entry_in("g1", 200, &["a"]));
        store.insert(entry_in("g2", 300, &["a"]));

        assert_eq!(store.entries().len(), 3);
        assert_eq!(store.entries_for_group(&GroupId::new("g1")).len(), 2);
        assert_eq!(store.entries_for_group(&GroupId::new("g2")).len(), 1);
        assert!(store.entries_for_group(&GroupId::new("g3")).is_empty());
    }
}
