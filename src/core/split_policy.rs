//! Allocation computation for expense splits
//!
//! This module provides the pure split policy: given an expense total, an
//! ordered member selection, and a split mode, it produces validated
//! per-member allocations or a [`SplitError`].
//!
//! The policy enforces the reconciliation invariant at the source: on
//! success the returned amounts always sum exactly to the total, whether
//! the remainder of an even division had to be distributed or the caller
//! supplied custom amounts.
//!
//! All functions are pure (no I/O, no state) for easy testing.

use std::collections::{HashMap, HashSet};

use crate::types::{Allocation, MemberId, Money, SplitError, SplitMode};

/// Compute validated per-member allocations for an expense
///
/// # Arguments
///
/// * `total` - The expense total; must be strictly positive
/// * `members` - Ordered member selection; allocations come back in this
///   order, and even splits front-load remainder minor units by position
/// * `mode` - Even or custom split
/// * `custom_amounts` - Per-member amounts; consulted only in custom mode,
///   where every selected member must have an entry
///
/// # Returns
///
/// Allocations in member order, all unpaid, whose amounts sum exactly to
/// `total`.
///
/// # Errors
///
/// * `SplitError::NoMembers` - the selection is empty
/// * `SplitError::DuplicateMember` - a member is selected more than once
/// * `SplitError::NonPositiveTotal` - the total is zero or negative
/// * `SplitError::MissingAllocation` - custom mode, a member has no amount
/// * `SplitError::NegativeAmount` - custom mode, a negative amount
/// * `SplitError::AmountMismatch` - custom mode, amounts do not sum to the
///   total (exact minor-unit comparison, never tolerance-based)
pub fn compute_allocations(
    total: Money,
    members: &[MemberId],
    mode: SplitMode,
    custom_amounts: Option<&HashMap<MemberId, Money>>,
) -> Result<Vec<Allocation>, SplitError> {
    if members.is_empty() {
        return Err(SplitError::NoMembers);
    }

    let mut seen = HashSet::with_capacity(members.len());
    for member_id in members {
        if !seen.insert(member_id) {
            return Err(SplitError::duplicate_member(member_id));
        }
    }

    if !total.is_positive() {
        return Err(SplitError::non_positive_total(total));
    }

    match mode {
        SplitMode::Even => Ok(split_evenly(total, members)),
        SplitMode::Custom => split_custom(total, members, custom_amounts),
    }
}

/// Zip the even division of the total with the members in selection order.
fn split_evenly(total: Money, members: &[MemberId]) -> Vec<Allocation> {
    total
        .divide_evenly(members.len())
        .into_iter()
        .zip(members)
        .map(|(amount, member_id)| Allocation::unpaid(member_id.clone(), amount))
        .collect()
}

/// Validate caller-specified amounts and reconcile them against the total.
fn split_custom(
    total: Money,
    members: &[MemberId],
    custom_amounts: Option<&HashMap<MemberId, Money>>,
) -> Result<Vec<Allocation>, SplitError> {
    let mut allocations = Vec::with_capacity(members.len());

    for member_id in members {
        let amount = custom_amounts
            .and_then(|amounts| amounts.get(member_id))
            .copied()
            .ok_or_else(|| SplitError::missing_allocation(member_id))?;

        if amount.is_negative() {
            return Err(SplitError::negative_amount(member_id, amount));
        }

        allocations.push(Allocation::unpaid(member_id.clone(), amount));
    }

    let assigned: Money = allocations.iter().map(|a| a.amount).sum();
    if assigned != total {
        tracing::debug!(
            expected = %total,
            actual = %assigned,
            member_count = members.len(),
            "Custom split rejected: amounts do not reconcile to the total"
        );
        return Err(SplitError::amount_mismatch(total, assigned));
    }

    Ok(allocations)
}
