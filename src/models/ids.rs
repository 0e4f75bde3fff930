//! Expense identifier
//!
//! The server assigns ids and the client never interprets them. Depending on
//! the backend an id arrives as a JSON number or a string; both are held as
//! the same opaque text so lookups compare equal either way.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned expense identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Wrap an identifier received from the server or typed by the user
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for ExpenseId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl FromStr for ExpenseId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self::new(s);
        if id.0.is_empty() {
            Err(IdParseError)
        } else {
            Ok(id)
        }
    }
}

impl<'de> Deserialize<'de> for ExpenseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = ExpenseId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an expense id as a string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ExpenseId, E> {
                v.parse().map_err(|_| E::custom("empty expense id"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ExpenseId, E> {
                Ok(ExpenseId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ExpenseId, E> {
                Ok(ExpenseId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Returned when an empty string is given as an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError;

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expense id cannot be empty")
    }
}

impl std::error::Error for IdParseError {}
