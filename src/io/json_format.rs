//! JSON format handling for expense payloads
//!
//! This module centralizes the wire format spoken with the external expense
//! service, providing:
//! - Record structures matching the service's JSON payload shapes
//! - Conversion from wire records to domain types, validated before the
//!   core is entered
//! - Entry serialization back into the persisted shape
//!
//! Amounts travel as decimal numbers and are converted exactly: values with
//! sub-cent precision are rejected at this boundary, never rounded. All
//! functions are pure (no I/O) for easy testing.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::core::ledger_entry::ExpenseLedgerEntry;
use crate::types::{
    Allocation, ExpenseDraft, ExpenseId, GroupId, MemberId, Money, PayloadError, SplitMode,
};

/// Create/edit expense payload
///
/// `assignedUsers` is an unordered wire mapping; a `BTreeMap` keeps the
/// decoded member sequence deterministic (lexicographic by id). When
/// `isSplitEvenly` is set the mapped values are ignored, matching the even
/// split's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub group_id: String,
    pub assigned_users: BTreeMap<String, Decimal>,
    /// Additional group references; carried on the wire but without
    /// semantics of their own (entries are keyed by `groupId` alone)
    #[serde(default)]
    pub assigned_groups: Vec<String>,
    pub is_split_evenly: bool,
}

/// Persisted expense shape consumed back from the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub assigned_users: Vec<AssignedUserRecord>,
}

/// One member's allocation as persisted by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedUserRecord {
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor_in_debt: Decimal,
    pub is_paid: bool,
}

/// Body of the update-by-(expenseId, memberId) settlement call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    pub is_paid: bool,
}

/// Convert a wire request into a validated expense draft
///
/// This function:
/// - Converts the balance into exact minor units
/// - Orders the selected members lexicographically by id (the wire mapping
///   is unordered)
/// - In custom mode, converts every per-member amount exactly
/// - In even mode, ignores the mapped values entirely
///
/// Semantic validation (positive total, sum reconciliation) is the split
/// policy's job; this boundary only guarantees exact representability.
///
/// # Errors
///
/// * `PayloadError::InvalidAmount` - an amount cannot be represented in
///   exact minor units
pub fn convert_expense_request(request: ExpenseRequest) -> Result<ExpenseDraft, PayloadError> {
    let total = convert_amount(request.balance, "balance")?;

    let mut members = Vec::with_capacity(request.assigned_users.len());
    let mut custom_amounts = HashMap::with_capacity(request.assigned_users.len());
    for (user_id, value) in &request.assigned_users {
        let member_id = MemberId::new(user_id.clone());
        if !request.is_split_evenly {
            let field = format!("assignedUsers.{user_id}");
            custom_amounts.insert(member_id.clone(), convert_amount(*value, &field)?);
        }
        members.push(member_id);
    }

    let (split_mode, custom_amounts) = if request.is_split_evenly {
        (SplitMode::Even, None)
    } else {
        (SplitMode::Custom, Some(custom_amounts))
    };

    Ok(ExpenseDraft {
        description: request.description,
        total,
        group_id: GroupId::new(request.group_id),
        split_mode,
        members,
        custom_amounts,
    })
}

/// Serialize a ledger entry into the persisted wire shape
pub fn encode_expense(entry: &ExpenseLedgerEntry) -> ExpenseRecord {
    ExpenseRecord {
        id: entry.id.as_str().to_string(),
        description: entry.description.clone(),
        balance: entry.total_amount.as_decimal(),
        assigned_users: entry
            .allocations
            .iter()
            .map(|allocation| AssignedUserRecord {
                user_id: allocation.member_id.as_str().to_string(),
                valor_in_debt: allocation.amount.as_decimal(),
                is_paid: allocation.is_paid,
            })
            .collect(),
    }
}

/// Convert a persisted record back into a ledger entry
///
/// The record carries no group of its own (the service nests expenses
/// inside a group detail response), so the caller supplies the group
/// context. The split mode is inferred: even iff the amounts equal the
/// even division of the balance in record order. Decoded entries are
/// stamped at decode time; the authoritative creation timestamp belongs to
/// the service.
///
/// # Errors
///
/// * `PayloadError::InvalidAmount` - an amount cannot be represented in
///   exact minor units
/// * `PayloadError::AllocationSumMismatch` - the per-member amounts do not
///   sum to the balance; the record violates the reconciliation invariant
///   and is rejected rather than repaired
pub fn decode_expense(
    record: ExpenseRecord,
    group_id: GroupId,
) -> Result<ExpenseLedgerEntry, PayloadError> {
    let total = convert_amount(record.balance, "balance")?;

    let mut allocations = Vec::with_capacity(record.assigned_users.len());
    for user in &record.assigned_users {
        let field = format!("assignedUsers.{}", user.user_id);
        allocations.push(Allocation {
            member_id: MemberId::new(user.user_id.clone()),
            amount: convert_amount(user.valor_in_debt, &field)?,
            is_paid: user.is_paid,
        });
    }

    let assigned: Money = allocations.iter().map(|a| a.amount).sum();
    if assigned != total {
        return Err(PayloadError::allocation_sum_mismatch(
            record.balance,
            assigned.as_decimal(),
        ));
    }

    let amounts: Vec<Money> = allocations.iter().map(|a| a.amount).collect();
    let split_mode = if total.divide_evenly(amounts.len()) == amounts {
        SplitMode::Even
    } else {
        SplitMode::Custom
    };

    Ok(ExpenseLedgerEntry {
        id: ExpenseId::new(record.id),
        description: record.description,
        total_amount: total,
        group_id,
        split_mode,
        allocations,
        created_at: Utc::now(),
    })
}

/// Convert a wire decimal into exact minor units.
fn convert_amount(value: Decimal, field: &str) -> Result<Money, PayloadError> {
    Money::try_from_decimal(value).map_err(|_| PayloadError::invalid_amount(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_from_wire_json() {
        let request: ExpenseRequest = serde_json::from_value(json!({
            "description": "Hotel",
            "balance": 300.00,
            "groupId": "g1",
            "assignedUsers": { "u2": 150.00, "u1": 150.00 },
            "assignedGroups": ["g1"],
            "isSplitEvenly": true
        }))
        .unwrap();

        assert_eq!(request.description, "Hotel");
        assert_eq!(request.balance, dec!(300.00));
        assert_eq!(request.group_id, "g1");
        assert_eq!(request.assigned_users.len(), 2);
        assert!(request.is_split_evenly);
    }

    #[test]
    fn test_request_assigned_groups_defaults_empty() {
        let request: ExpenseRequest = serde_json::from_value(json!({
            "description": "Taxi",
            "balance": 10.00,
            "groupId": "g1",
            "assignedUsers": { "u1": 10.00 },
            "isSplitEvenly": true
        }))
        .unwrap();

        assert!(request.assigned_groups.is_empty());
    }

    #[test]
    fn test_convert_even_request_orders_members_and_drops_amounts() {
        let request = ExpenseRequest {
            description: "Hotel".to_string(),
            balance: dec!(300.00),
            group_id: "g1".to_string(),
            assigned_users: BTreeMap::from([
                ("u2".to_string(), dec!(150.00)),
                ("u1".to_string(), dec!(150.00)),
            ]),
            assigned_groups: vec![],
            is_split_evenly: true,
        };

        let draft = convert_expense_request(request).unwrap();

        assert_eq!(draft.total, Money::from_minor_units(30000));
        assert_eq!(draft.group_id, GroupId::new("g1"));
        assert_eq!(draft.split_mode, SplitMode::Even);
        assert_eq!(
            draft.members,
            vec![MemberId::new("u1"), MemberId::new("u2")]
        );
        assert!(draft.custom_amounts.is_none());
    }

    #[test]
    fn test_convert_custom_request_carries_amounts() {
        let request = ExpenseRequest {
            description: "Dinner".to_string(),
            balance: dec!(10.00),
            group_id: "g1".to_string(),
            assigned_users: BTreeMap::from([
                ("u1".to_string(), dec!(6.00)),
                ("u2".to_string(), dec!(4.00)),
            ]),
            assigned_groups: vec![],
            is_split_evenly: false,
        };

        let draft = convert_expense_request(request).unwrap();

        assert_eq!(draft.split_mode, SplitMode::Custom);
        let amounts = draft.custom_amounts.unwrap();
        assert_eq!(
            amounts.get(&MemberId::new("u1")),
            Some(&Money::from_minor_units(600))
        );
        assert_eq!(
            amounts.get(&MemberId::new("u2")),
            Some(&Money::from_minor_units(400))
        );
    }

    #[rstest]
    #[case::balance(dec!(10.999), dec!(5.00), "balance")]
    #[case::member_amount(dec!(10.00), dec!(4.999), "assignedUsers.u1")]
    fn test_convert_request_rejects_sub_cent_amounts(
        #[case] balance: Decimal,
        #[case] user_amount: Decimal,
        #[case] field: &str,
    ) {
        let request = ExpenseRequest {
            description: "Dinner".to_string(),
            balance,
            group_id: "g1".to_string(),
            assigned_users: BTreeMap::from([("u1".to_string(), user_amount)]),
            assigned_groups: vec![],
            is_split_evenly: false,
        };

        let error = convert_expense_request(request).unwrap_err();
        assert!(matches!(
            &error,
            PayloadError::InvalidAmount { field: f, .. } if f == field
        ));
    }

    #[test]
    fn test_even_request_ignores_sub_cent_member_values() {
        // Even mode never reads the mapped values, so stale garbage in them
        // does not fail the conversion.
        let request = ExpenseRequest {
            description: "Dinner".to_string(),
            balance: dec!(10.00),
            group_id: "g1".to_string(),
            assigned_users: BTreeMap::from([("u1".to_string(), dec!(3.333))]),
            assigned_groups: vec![],
            is_split_evenly: true,
        };

        let draft = convert_expense_request(request).unwrap();
        assert_eq!(draft.split_mode, SplitMode::Even);
    }

    fn sample_entry() -> ExpenseLedgerEntry {
        let mut entry = ExpenseLedgerEntry::create(
            "Dinner",
            Money::from_minor_units(1000),
            GroupId::new("g1"),
            SplitMode::Custom,
            &[MemberId::new("u1"), MemberId::new("u2")],
            Some(&HashMap::from([
                (MemberId::new("u1"), Money::from_minor_units(600)),
                (MemberId::new("u2"), Money::from_minor_units(400)),
            ])),
        )
        .unwrap();
        entry.mark_paid(&MemberId::new("u2"), true).unwrap();
        entry
    }

    #[test]
    fn test_encode_expense_matches_persisted_shape() {
        let entry = sample_entry();

        let value = serde_json::to_value(encode_expense(&entry)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": entry.id.as_str(),
                "description": "Dinner",
                "balance": 10.0,
                "assignedUsers": [
                    { "userId": "u1", "valorInDebt": 6.0, "isPaid": false },
                    { "userId": "u2", "valorInDebt": 4.0, "isPaid": true },
                ]
            })
        );
    }

    #[test]
    fn test_decode_round_trips_allocations() {
        let entry = sample_entry();

        let decoded = decode_expense(encode_expense(&entry), GroupId::new("g1")).unwrap();

        assert_eq!(decoded.id, entry.id);
        assert_eq!(decoded.description, entry.description);
        assert_eq!(decoded.total_amount, entry.total_amount);
        assert_eq!(decoded.group_id, entry.group_id);
        assert_eq!(decoded.allocations, entry.allocations);
    }

    #[test]
    fn test_decode_infers_even_mode() {
        let record: ExpenseRecord = serde_json::from_value(json!({
            "id": "e1",
            "description": "Taxi",
            "balance": 100.00,
            "assignedUsers": [
                { "userId": "u1", "valorInDebt": 33.34, "isPaid": false },
                { "userId": "u2", "valorInDebt": 33.33, "isPaid": false },
                { "userId": "u3", "valorInDebt": 33.33, "isPaid": true },
            ]
        }))
        .unwrap();

        let entry = decode_expense(record, GroupId::new("g1")).unwrap();

        assert_eq!(entry.split_mode, SplitMode::Even);
        assert_eq!(entry.total_amount, Money::from_minor_units(10000));
        assert!(entry.allocations[2].is_paid);
    }

    #[test]
    fn test_decode_infers_custom_mode() {
        let record: ExpenseRecord = serde_json::from_value(json!({
            "id": "e1",
            "description": "Dinner",
            "balance": 10.00,
            "assignedUsers": [
                { "userId": "u1", "valorInDebt": 6.00, "isPaid": false },
                { "userId": "u2", "valorInDebt": 4.00, "isPaid": false },
            ]
        }))
        .unwrap();

        let entry = decode_expense(record, GroupId::new("g1")).unwrap();

        assert_eq!(entry.split_mode, SplitMode::Custom);
    }

    #[test]
    fn test_decode_rejects_sum_mismatch() {
        let record: ExpenseRecord = serde_json::from_value(json!({
            "id": "e1",
            "description": "Dinner",
            "balance": 10.00,
            "assignedUsers": [
                { "userId": "u1", "valorInDebt": 6.00, "isPaid": false },
                { "userId": "u2", "valorInDebt": 3.00, "isPaid": false },
            ]
        }))
        .unwrap();

        let result = decode_expense(record, GroupId::new("g1"));

        assert!(matches!(
            result,
            Err(PayloadError::AllocationSumMismatch { .. })
        ));
    }

    #[test]
    fn test_mark_paid_request_wire_shape() {
        let value = serde_json::to_value(MarkPaidRequest { is_paid: true }).unwrap();
        assert_eq!(value, json!({ "isPaid": true }));

        let parsed: MarkPaidRequest =
            serde_json::from_value(json!({ "isPaid": false })).unwrap();
        assert!(!parsed.is_paid);
    }
}
