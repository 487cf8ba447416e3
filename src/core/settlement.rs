//! Outstanding-debt aggregation
//!
//! This module computes a member's running balance over a collection of
//! ledger entries: every unpaid allocation belonging to the member
//! contributes its amount, paid allocations and entries not involving the
//! member contribute nothing.
//!
//! Addition over exact minor units is commutative, so results depend only
//! on the multiset of entries supplied, never on their order.

use std::collections::HashMap;

use crate::core::ledger_entry::ExpenseLedgerEntry;
use crate::types::{GroupId, MemberId, Money};

/// Total outstanding debt of a member across the given entries
///
/// # Arguments
///
/// * `member_id` - The member whose balance is computed; always passed
///   explicitly, never read from ambient session state
/// * `entries` - The ledger entries to aggregate over, in any order
pub fn total_outstanding<'a, I>(member_id: &MemberId, entries: I) -> Money
where
    I: IntoIterator<Item = &'a ExpenseLedgerEntry>,
{
    entries
        .into_iter()
        .filter_map(|entry| entry.allocation_for(member_id))
        .filter(|allocation| !allocation.is_paid)
        .map(|allocation| allocation.amount)
        .sum()
}

/// Outstanding debt of a member, broken down by group
///
/// Only groups where the member has at least one unpaid allocation appear
/// in the result; a group the member has fully settled contributes no key.
pub fn outstanding_by_group<'a, I>(
    member_id: &MemberId,
    entries: I,
) -> HashMap<GroupId, Money>
where
    I: IntoIterator<Item = &'a ExpenseLedgerEntry>,
{
    let mut balances = HashMap::new();

    for entry in entries {
        if let Some(allocation) = entry.allocation_for(member_id) {
            if !allocation.is_paid {
                *balances
                    .entry(entry.group_id.clone())
                    .or_insert(Money::ZERO) += allocation.amount;
            }
        }
    }

    balances
}
