//! Expense ledger entries
//!
//! This module provides the ExpenseLedgerEntry record: an expense combined
//! with its per-member allocations and paid flags, in the shape the external
//! ledger persists. Entries uphold one invariant through every successful
//! mutation: the allocation amounts sum exactly to the expense total.
//!
//! # Edit Semantics
//!
//! Editing replaces the allocation set wholesale rather than patching it.
//! Paid state survives for members present in both the old and new sets
//! (keyed by member id); members added by the edit start unpaid; members
//! dropped by the edit lose their allocation entirely, so re-adding a member
//! later never resurrects old state.
//!
//! # Settlement State
//!
//! Per allocation: Unpaid <-> Paid, driven only by `mark_paid`. Both states
//! are valid starting points for a freshly edited entry.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::core::split_policy::compute_allocations;
use crate::types::{
    Allocation, ExpenseId, GroupId, LedgerError, MemberId, Money, SplitError, SplitMode,
};

/// An expense with its per-member allocations and settlement flags
///
/// Invariant: after every successful mutation the allocation amounts sum
/// exactly to `total_amount`, the allocation order matches the member
/// selection order, and no member appears twice.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseLedgerEntry {
    /// Opaque identifier (generated locally, or assigned by the service)
    pub id: ExpenseId,

    /// Free-form description entered by the user
    pub description: String,

    /// The expense total; always equals the sum of the allocation amounts
    pub total_amount: Money,

    /// The group this expense belongs to; never changes after creation
    pub group_id: GroupId,

    /// How the total was divided at the last create or edit
    pub split_mode: SplitMode,

    /// Per-member shares in selection order
    pub allocations: Vec<Allocation>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Marker returned when an entry is deleted
///
/// The engine removes the entry from its store; removing the persisted
/// record is the external collaborator's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseTombstone {
    /// The deleted expense
    pub expense_id: ExpenseId,

    /// The group the expense belonged to
    pub group_id: GroupId,
}

impl ExpenseLedgerEntry {
    /// Create a new entry with validated allocations
    ///
    /// Delegates the split to [`compute_allocations`]; all allocations start
    /// unpaid. The entry carries a freshly generated id and is stamped with
    /// the current time.
    ///
    /// # Errors
    ///
    /// Any [`SplitError`] from allocation validation.
    pub fn create(
        description: impl Into<String>,
        total: Money,
        group_id: GroupId,
        mode: SplitMode,
        members: &[MemberId],
        custom_amounts: Option<&HashMap<MemberId, Money>>,
    ) -> Result<Self, SplitError> {
        let allocations = compute_allocations(total, members, mode, custom_amounts)?;

        Ok(ExpenseLedgerEntry {
            id: ExpenseId::generate(),
            description: description.into(),
            total_amount: total,
            group_id,
            split_mode: mode,
            allocations,
            created_at: Utc::now(),
        })
    }

    /// Replace the allocation set, carrying paid state over by member id
    ///
    /// Recomputes allocations exactly as `create` does, then restores the
    /// paid flag of every member that was already allocated before the
    /// edit. Members dropped by the edit lose their allocation; the entry
    /// is unchanged if validation fails.
    ///
    /// # Errors
    ///
    /// Any [`SplitError`] from allocation validation.
    pub fn edit_allocations(
        &mut self,
        new_total: Money,
        new_mode: SplitMode,
        new_members: &[MemberId],
        new_custom_amounts: Option<&HashMap<MemberId, Money>>,
    ) -> Result<(), SplitError> {
        let mut allocations =
            compute_allocations(new_total, new_members, new_mode, new_custom_amounts)?;

        // Carry settlement state over for members surviving the edit.
        let paid_before: HashMap<&MemberId, bool> = self
            .allocations
            .iter()
            .map(|a| (&a.member_id, a.is_paid))
            .collect();
        for allocation in &mut allocations {
            if let Some(&was_paid) = paid_before.get(&allocation.member_id) {
                allocation.is_paid = was_paid;
            }
        }

        self.total_amount = new_total;
        self.split_mode = new_mode;
        self.allocations = allocations;
        Ok(())
    }

    /// Set the paid flag of a single member's allocation
    ///
    /// Amounts are never altered by settlement. Marking an unallocated
    /// member is a caller bug: the entry stays unchanged and the failure is
    /// logged at warn level.
    ///
    /// # Errors
    ///
    /// * `LedgerError::MemberNotAllocated` - the member has no allocation
    ///   on this entry
    pub fn mark_paid(&mut self, member_id: &MemberId, paid: bool) -> Result<(), LedgerError> {
        let allocation = self
            .allocations
            .iter_mut()
            .find(|a| a.member_id == *member_id)
            .ok_or_else(|| {
                tracing::warn!(
                    expense_id = %self.id,
                    member_id = %member_id,
                    "Settlement attempted for a member with no allocation"
                );
                LedgerError::member_not_allocated(&self.id, member_id)
            })?;
        allocation.is_paid = paid;
        Ok(())
    }

    /// The allocation assigned to `member_id`, if any
    pub fn allocation_for(&self, member_id: &MemberId) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.member_id == *member_id)
    }

    /// True when every allocation has been settled
    pub fn is_settled(&self) -> bool {
        self.allocations.iter().all(|a| a.is_paid)
    }

    /// Consume the entry, yielding its tombstone marker
    pub fn delete(self) -> ExpenseTombstone {
        ExpenseTombstone {
            expense_id: self.id,
            group_id: self.group_id,
        }
    }
}
