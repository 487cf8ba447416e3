//! Types module
//!
//! Contains core data structures used throughout the engine.
//! This module organizes types into logical submodules:
//! - `money`: Fixed-point monetary amounts
//! - `member`: Member identity types
//! - `expense`: Expense identifiers, split mode, allocations, drafts
//! - `error`: Error types for the engine

pub mod error;
pub mod expense;
pub mod member;
pub mod money;

pub use error::{LedgerError, MoneyError, PayloadError, SplitError};
pub use expense::{Allocation, ExpenseDraft, ExpenseId, GroupId, SplitMode};
pub use member::{Member, MemberId};
pub use money::{Money, MONEY_SCALE};
