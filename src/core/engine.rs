//! Expense lifecycle orchestration
//!
//! This module provides the ExpenseEngine that drives the expense lifecycle
//! against a [`LedgerStore`] collaborator: create, edit, settle, delete,
//! and the balance views derived from stored entries.
//!
//! The engine enforces business rules such as:
//! - Roster checks: selected members must belong to the expense's group at
//!   creation or edit time (later roster changes never cascade)
//! - Allocation validation via the split policy before anything is persisted
//! - Settlement preconditions (the member must be allocated on the expense)

use crate::core::ledger_entry::{ExpenseLedgerEntry, ExpenseTombstone};
use crate::core::settlement::total_outstanding;
use crate::core::traits::LedgerStore;
use crate::types::{ExpenseDraft, ExpenseId, GroupId, LedgerError, Member, MemberId, Money};

/// Expense lifecycle engine
///
/// Generic over the ledger store so the surrounding application can supply
/// its own persistence while tests run against the in-memory one. All
/// operations take the acting identifiers explicitly; the engine never
/// reads ambient session state.
pub struct ExpenseEngine<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> ExpenseEngine<S> {
    /// Create an engine over the given store
    pub fn new(store: S) -> Self {
        ExpenseEngine { store }
    }

    /// Create an expense from a draft and persist it
    ///
    /// Validates the member selection against the group roster, computes
    /// allocations, and stores the resulting entry.
    ///
    /// # Arguments
    ///
    /// * `draft` - Description, total, group, split mode, and member selection
    /// * `roster` - The group's member set at creation time
    ///
    /// # Returns
    ///
    /// The persisted entry, all allocations unpaid.
    ///
    /// # Errors
    ///
    /// * `LedgerError::MemberNotInGroup` - a selected member is outside the roster
    /// * `LedgerError::Split` - allocation validation failed
    pub fn create_expense(
        &mut self,
        draft: ExpenseDraft,
        roster: &[Member],
    ) -> Result<ExpenseLedgerEntry, LedgerError> {
        check_roster(&draft.members, roster, &draft.group_id)?;

        let entry = ExpenseLedgerEntry::create(
            draft.description,
            draft.total,
            draft.group_id,
            draft.split_mode,
            &draft.members,
            draft.custom_amounts.as_ref(),
        )?;

        tracing::debug!(
            expense_id = %entry.id,
            group_id = %entry.group_id,
            member_count = entry.allocations.len(),
            total = %entry.total_amount,
            "Expense created"
        );

        self.store.insert(entry.clone());
        Ok(entry)
    }

    /// Replace an expense's description and allocation set
    ///
    /// Recomputes allocations exactly as creation does; paid state survives
    /// for members present before and after the edit. The entry keeps its
    /// group: the draft's `group_id` is used for roster error reporting
    /// only.
    ///
    /// # Errors
    ///
    /// * `LedgerError::ExpenseNotFound` - unknown expense id
    /// * `LedgerError::MemberNotInGroup` - a selected member is outside the roster
    /// * `LedgerError::Split` - allocation validation failed; the stored
    ///   entry is unchanged
    pub fn update_expense(
        &mut self,
        expense_id: &ExpenseId,
        draft: ExpenseDraft,
        roster: &[Member],
    ) -> Result<ExpenseLedgerEntry, LedgerError> {
        check_roster(&draft.members, roster, &draft.group_id)?;

        self.store.update(expense_id, move |entry| {
            entry.edit_allocations(
                draft.total,
                draft.split_mode,
                &draft.members,
                draft.custom_amounts.as_ref(),
            )?;
            entry.description = draft.description;
            Ok(())
        })?;

        tracing::debug!(expense_id = %expense_id, "Expense updated");
        self.entry(expense_id)
    }

    /// Set the paid flag of one member's allocation on an expense
    ///
    /// Maps to the update-by-(expense, member) settlement call of the
    /// external service; amounts are never altered.
    ///
    /// # Errors
    ///
    /// * `LedgerError::ExpenseNotFound` - unknown expense id
    /// * `LedgerError::MemberNotAllocated` - the member has no allocation
    ///   on the expense; the entry is unchanged
    pub fn set_paid(
        &mut self,
        expense_id: &ExpenseId,
        member_id: &MemberId,
        paid: bool,
    ) -> Result<ExpenseLedgerEntry, LedgerError> {
        self.store
            .update(expense_id, |entry| entry.mark_paid(member_id, paid))?;
        self.entry(expense_id)
    }

    /// Delete an expense, returning its tombstone
    ///
    /// # Errors
    ///
    /// * `LedgerError::ExpenseNotFound` - unknown expense id
    pub fn delete_expense(
        &mut self,
        expense_id: &ExpenseId,
    ) -> Result<ExpenseTombstone, LedgerError> {
        let entry = self.store.remove(expense_id)?;
        tracing::debug!(expense_id = %expense_id, group_id = %entry.group_id, "Expense deleted");
        Ok(entry.delete())
    }

    /// Get a stored expense by id
    pub fn expense(&self, expense_id: &ExpenseId) -> Option<&ExpenseLedgerEntry> {
        self.store.get(expense_id)
    }

    /// All stored expenses belonging to a group
    pub fn expenses_for_group(&self, group_id: &GroupId) -> Vec<&ExpenseLedgerEntry> {
        self.store.entries_for_group(group_id)
    }

    /// Total outstanding debt of a member across all stored expenses
    pub fn outstanding_for(&self, member_id: &MemberId) -> Money {
        total_outstanding(member_id, self.store.entries())
    }

    /// Outstanding debt of a member within one group
    pub fn group_outstanding(&self, member_id: &MemberId, group_id: &GroupId) -> Money {
        total_outstanding(member_id, self.store.entries_for_group(group_id))
    }

    /// Consume the engine, yielding its store
    pub fn into_store(self) -> S {
        self.store
    }

    fn entry(&self, expense_id: &ExpenseId) -> Result<ExpenseLedgerEntry, LedgerError> {
        self.store
            .get(expense_id)
            .cloned()
            .ok_or_else(|| LedgerError::expense_not_found(expense_id))
    }
}

/// Verify that every selected member belongs to the group roster.
fn check_roster(
    members: &[MemberId],
    roster: &[Member],
    group_id: &GroupId,
) -> Result<(), LedgerError> {
    for member_id in members {
        if !roster.iter().any(|member| member.id == *member_id) {
            tracing::warn!(
                member_id = %member_id,
                group_id = %group_id,
                "Selected member is not part of the group"
            );
            return Err(LedgerError::member_not_in_group(member_id, group_id));
        }
    }
    Ok(())
}
