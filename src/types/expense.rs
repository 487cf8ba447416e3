//! Expense-related data shapes
//!
//! This module defines the plain data types shared by the core components:
//! identifiers, the split mode, a single member's allocation, and the draft
//! input an expense is created or edited from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::types::member::MemberId;
use crate::types::money::Money;

/// Opaque expense identifier
///
/// Freshly created entries carry a generated id; entries decoded from the
/// wire keep whatever id the external service assigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        ExpenseId(id.into())
    }

    /// Generate a fresh opaque identifier
    pub fn generate() -> Self {
        ExpenseId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque group identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        GroupId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        GroupId(id.to_string())
    }
}

/// How an expense total is divided among the selected members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Equal shares, remainder minor units front-loaded onto the first members
    Even,

    /// Caller-specified per-member amounts that must sum exactly to the total
    Custom,
}

/// One member's share of an expense
///
/// Belongs to exactly one ledger entry. The amount changes only through a
/// full allocation-set edit; the paid flag toggles independently through a
/// settlement action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// The member this share is assigned to
    pub member_id: MemberId,

    /// The member's share of the expense total
    pub amount: Money,

    /// Whether the member has settled this share
    pub is_paid: bool,
}

impl Allocation {
    /// Create a fresh, unsettled allocation
    pub fn unpaid(member_id: MemberId, amount: Money) -> Self {
        Allocation {
            member_id,
            amount,
            is_paid: false,
        }
    }
}

/// Input for creating or editing an expense
///
/// The member sequence is ordered: even splits assign remainder minor units
/// by position, and allocations come back in this order. `custom_amounts`
/// is only consulted in [`SplitMode::Custom`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub total: Money,
    pub group_id: GroupId,
    pub split_mode: SplitMode,
    pub members: Vec<MemberId>,
    pub custom_amounts: Option<HashMap<MemberId, Money>>,
}
