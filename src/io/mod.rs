//! I/O module
//!
//! Handles the JSON wire format spoken with the external expense service.
//!
//! # Components
//!
//! - `json_format` - JSON payload shapes and validated conversions into and
//!   out of the core types

pub mod json_format;

pub use json_format::{
    convert_expense_request, decode_expense, encode_expense, AssignedUserRecord, ExpenseRecord,
    ExpenseRequest, MarkPaidRequest,
};
