//! Error types for the expense split engine
//!
//! All failures in the engine are returned as values; nothing here is fatal
//! to the process. Every error is locally recoverable by correcting input
//! and recomputing.
//!
//! # Error Categories
//!
//! - **Money Errors**: unparseable or sub-cent decimal amounts, overflow
//! - **Split Errors**: validation failures while computing allocations;
//!   user-correctable and never retried automatically
//! - **Ledger Errors**: entry-level precondition violations (unknown
//!   expense, member outside the allocation set or group roster)
//! - **Payload Errors**: malformed wire payloads rejected at the JSON
//!   boundary before they reach the core

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::expense::{ExpenseId, GroupId};
use crate::types::member::MemberId;
use crate::types::money::Money;

/// Errors constructing or converting monetary amounts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoneyError {
    /// The input could not be parsed as a decimal amount
    #[error("Invalid monetary amount '{input}'")]
    InvalidAmount {
        /// The unparseable input
        input: String,
    },

    /// The value carries sub-cent precision and cannot be represented exactly
    ///
    /// Amounts are never rounded; a value like `12.345` is rejected so that
    /// the exact-sum invariants hold end to end.
    #[error("Amount {value} carries sub-cent precision")]
    PrecisionLoss {
        /// The offending decimal value
        value: Decimal,
    },

    /// The value does not fit in integer minor units
    #[error("Arithmetic overflow in {operation}")]
    Overflow {
        /// Operation that would overflow
        operation: String,
    },
}

/// Validation failures while computing per-member allocations
///
/// All variants are user-correctable: the caller surfaces a message, the
/// user fixes the form input, and the split is recomputed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    /// An expense must be split between at least one member
    #[error("At least one member must be selected")]
    NoMembers,

    /// The expense total must be strictly positive
    #[error("Expense total {total} must be positive")]
    NonPositiveTotal {
        /// The rejected total
        total: Money,
    },

    /// A member appears more than once in the selection
    #[error("Member {member_id} is selected more than once")]
    DuplicateMember {
        /// The duplicated member
        member_id: MemberId,
    },

    /// A selected member has no custom amount assigned
    #[error("Member {member_id} has no amount assigned")]
    MissingAllocation {
        /// The member without an amount
        member_id: MemberId,
    },

    /// A negative custom amount was supplied
    #[error("Negative amount {amount} assigned to member {member_id}")]
    NegativeAmount {
        /// The member the amount was assigned to
        member_id: MemberId,
        /// The rejected amount
        amount: Money,
    },

    /// Custom amounts do not sum exactly to the expense total
    ///
    /// Comparison is exact integer comparison of minor units, never
    /// tolerance-based.
    #[error("Assigned amounts sum to {actual} but the expense total is {expected}")]
    AmountMismatch {
        /// The expense total
        expected: Money,
        /// The sum of the assigned amounts
        actual: Money,
    },
}

/// Entry-level precondition violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Attempt to settle a member that has no allocation on the expense
    ///
    /// Indicates a caller bug rather than user error; logged at warn level
    /// and never retried. The entry is unchanged.
    #[error("Member {member_id} has no allocation on expense {expense_id}")]
    MemberNotAllocated {
        /// The expense the settlement targeted
        expense_id: ExpenseId,
        /// The member without an allocation
        member_id: MemberId,
    },

    /// The referenced expense does not exist in the ledger
    #[error("Expense {expense_id} not found")]
    ExpenseNotFound {
        /// The unknown expense id
        expense_id: ExpenseId,
    },

    /// A selected member is not part of the group the expense belongs to
    ///
    /// Membership is checked against the roster supplied at creation or
    /// edit time; later roster changes never cascade into existing entries.
    #[error("Member {member_id} is not part of group {group_id}")]
    MemberNotInGroup {
        /// The member outside the roster
        member_id: MemberId,
        /// The group the expense belongs to
        group_id: GroupId,
    },

    /// Allocation validation failed
    #[error(transparent)]
    Split(#[from] SplitError),
}

/// Malformed wire payloads rejected at the JSON boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// A decimal amount field could not be converted exactly
    #[error("Invalid amount '{value}' in field '{field}'")]
    InvalidAmount {
        /// The wire field name
        field: String,
        /// The offending value
        value: String,
    },

    /// A persisted expense whose allocations do not sum to its balance
    ///
    /// The record is rejected rather than repaired; a mismatch means the
    /// external service violated the reconciliation invariant.
    #[error("Assigned amounts sum to {actual} but the expense balance is {expected}")]
    AllocationSumMismatch {
        /// The balance carried by the record
        expected: Decimal,
        /// The sum of the per-member amounts
        actual: Decimal,
    },
}

// Helper functions for creating common errors

impl MoneyError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        MoneyError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create a PrecisionLoss error
    pub fn precision_loss(value: Decimal) -> Self {
        MoneyError::PrecisionLoss { value }
    }

    /// Create an Overflow error
    pub fn overflow(operation: &str) -> Self {
        MoneyError::Overflow {
            operation: operation.to_string(),
        }
    }
}

impl SplitError {
    /// Create a NonPositiveTotal error
    pub fn non_positive_total(total: Money) -> Self {
        SplitError::NonPositiveTotal { total }
    }

    /// Create a DuplicateMember error
    pub fn duplicate_member(member_id: &MemberId) -> Self {
        SplitError::DuplicateMember {
            member_id: member_id.clone(),
        }
    }

    /// Create a MissingAllocation error
    pub fn missing_allocation(member_id: &MemberId) -> Self {
        SplitError::MissingAllocation {
            member_id: member_id.clone(),
        }
    }

    /// Create a NegativeAmount error
    pub fn negative_amount(member_id: &MemberId, amount: Money) -> Self {
        SplitError::NegativeAmount {
            member_id: member_id.clone(),
            amount,
        }
    }

    /// Create an AmountMismatch error
    pub fn amount_mismatch(expected: Money, actual: Money) -> Self {
        SplitError::AmountMismatch { expected, actual }
    }
}

impl LedgerError {
    /// Create a MemberNotAllocated error
    pub fn member_not_allocated(expense_id: &ExpenseId, member_id: &MemberId) -> Self {
        LedgerError::MemberNotAllocated {
            expense_id: expense_id.clone(),
            member_id: member_id.clone(),
        }
    }

    /// Create an ExpenseNotFound error
    pub fn expense_not_found(expense_id: &ExpenseId) -> Self {
        LedgerError::ExpenseNotFound {
            expense_id: expense_id.clone(),
        }
    }

    /// Create a MemberNotInGroup error
    pub fn member_not_in_group(member_id: &MemberId, group_id: &GroupId) -> Self {
        LedgerError::MemberNotInGroup {
            member_id: member_id.clone(),
            group_id: group_id.clone(),
        }
    }
}

impl PayloadError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(field: &str, value: impl ToString) -> Self {
        PayloadError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an AllocationSumMismatch error
    pub fn allocation_sum_mismatch(expected: Decimal, actual: Decimal) -> Self {
        PayloadError::AllocationSumMismatch { expected, actual }
    }
}
