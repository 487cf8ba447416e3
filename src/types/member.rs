//! Member identity types
//!
//! Members are referenced by opaque string identifiers owned by the external
//! service. The engine never derives meaning from an identifier; the email
//! is a display label only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque member identifier
///
/// Allocations reference members by id only; the identifier format belongs
/// to the external service and is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        MemberId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        MemberId(id.to_string())
    }
}

/// A group member: identifier plus display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Opaque identifier owned by the external service
    pub id: MemberId,

    /// Display label (the member's email)
    pub email: String,
}

impl Member {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Member {
            id: MemberId::new(id),
            email: email.into(),
        }
    }
}
