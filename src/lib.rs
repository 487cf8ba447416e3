//! Expense Split Engine Library
//! # Overview
//!
//! This library implements the expense-splitting and settlement
//! reconciliation core of a shared-expense application: dividing a monetary
//! amount among selected group members, validating that the allocations
//! reconcile exactly to the expense total, and tracking per-member paid
//! state until a balance view is produced.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Money, Member, Allocation, errors)
//! - [`core`] - Business logic components:
//!   - [`core::split_policy`] - Pure allocation computation and validation
//!   - [`core::ledger_entry`] - The persisted-shape expense record and its
//!     mutations
//!   - [`core::settlement`] - Outstanding-debt aggregation
//!   - [`core::engine`] - Expense lifecycle orchestration over a pluggable
//!     ledger store
//! - [`io`] - JSON boundary handling with validated conversions
//!
//! # Expense Lifecycle
//!
//! An expense moves through four operations:
//!
//! - **Create**: a total, an ordered member selection, and a split mode
//!   produce validated allocations, all unpaid
//! - **Edit**: the allocation set is recomputed wholesale; paid state
//!   survives for members present before and after, dropped members lose
//!   their allocation permanently
//! - **Settle**: one member's allocation toggles between unpaid and paid;
//!   amounts never change
//! - **Delete**: the entry is removed, leaving a tombstone marker
//!
//! # Invariants
//!
//! Every successful mutation maintains:
//! - `sum(allocation amounts) == expense total`, exactly: even splits
//!   distribute remainder minor units deterministically (lowest index
//!   first), custom splits must reconcile or are rejected
//! - Allocation order matches the member selection order, with no
//!   duplicate members
//!
//! All amounts are integer minor units; floating point never enters the
//! arithmetic.

// Module declarations
pub mod core;
pub mod io;
pub mod types;

pub use core::{
    compute_allocations, outstanding_by_group, total_outstanding, ExpenseEngine,
    ExpenseLedgerEntry, ExpenseTombstone, InMemoryLedgerStore, LedgerStore,
};
pub use io::{
    convert_expense_request, decode_expense, encode_expense, AssignedUserRecord, ExpenseRecord,
    ExpenseRequest, MarkPaidRequest,
};
pub use types::{
    Allocation, ExpenseDraft, ExpenseId, GroupId, LedgerError, Member, MemberId, Money,
    MoneyError, PayloadError, SplitError, SplitMode,
};
