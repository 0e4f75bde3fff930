//! Expense model
//!
//! `Expense` is the server-owned record. `ExpenseFields` is the validated
//! request body for create and update. `ExpenseDraft` holds raw form text
//! as the user typed it, and is only turned into fields once every field is
//! present and parses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::ExpenseId;
use crate::error::{ExpenseError, ExpenseResult};

/// Date format used on the wire and in forms
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An expense record as held by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ServerExpense")]
pub struct Expense {
    /// Server-assigned identifier, immutable once created
    pub id: ExpenseId,

    pub title: String,

    pub amount: Amount,

    pub category: String,

    #[serde(with = "wire_date")]
    pub date: NaiveDate,
}

/// Record as it arrives, with the id under `id`, `_id` or both
#[derive(Deserialize)]
struct ServerExpense {
    #[serde(default)]
    id: Option<ExpenseId>,
    #[serde(default, rename = "_id")]
    object_id: Option<ExpenseId>,
    title: String,
    amount: Amount,
    category: String,
    #[serde(with = "wire_date")]
    date: NaiveDate,
}

impl TryFrom<ServerExpense> for Expense {
    type Error = String;

    fn try_from(raw: ServerExpense) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.object_id)
            .ok_or_else(|| "missing field `id`".to_string())?;
        Ok(Self {
            id,
            title: raw.title,
            amount: raw.amount,
            category: raw.category,
            date: raw.date,
        })
    }
}

impl Expense {
    /// Build a record from an id and a set of fields
    pub fn from_fields(id: ExpenseId, fields: ExpenseFields) -> Self {
        Self {
            id,
            title: fields.title,
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
        }
    }

    /// The editable part of this record
    pub fn fields(&self) -> ExpenseFields {
        ExpenseFields {
            title: self.title.clone(),
            amount: self.amount,
            category: self.category.clone(),
            date: self.date,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} on {}, {})",
            self.title,
            self.amount,
            self.date.format(DATE_FORMAT),
            self.category
        )
    }
}

/// Validated body sent to the server on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFields {
    pub title: String,
    pub amount: Amount,
    pub category: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
}

/// One input of the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftField {
    #[default]
    Title,
    Amount,
    Category,
    Date,
}

impl DraftField {
    /// All fields in form order
    pub const ALL: [DraftField; 4] = [Self::Title, Self::Amount, Self::Category, Self::Date];

    /// Lowercase name used in messages
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
        }
    }
}

/// Raw, unvalidated expense form input
///
/// Used both for the add form (starts empty, cleared after a successful
/// submit) and for the edit form (prefilled from the current record).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl ExpenseDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a draft prefilled from an existing record
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
            date: expense.date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Get a field's raw text
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Amount => &self.amount,
            DraftField::Category => &self.category,
            DraftField::Date => &self.date,
        }
    }

    /// Replace a field's raw text
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.title = value,
            DraftField::Amount => self.amount = value,
            DraftField::Category => self.category = value,
            DraftField::Date => self.date = value,
        }
    }

    /// Check whether every field is blank
    pub fn is_blank(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }

    /// Fields that are empty after trimming, in form order
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Reset every field to empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the whole form as a unit
    ///
    /// Every field must be non-empty; then amount and date must parse.
    pub fn validate(&self) -> ExpenseResult<ExpenseFields> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
            return Err(ExpenseError::Validation(format!(
                "All fields are required (missing: {})",
                names.join(", ")
            )));
        }

        let amount = Amount::parse(&self.amount)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            ExpenseError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD",
                self.date.trim()
            ))
        })?;

        Ok(ExpenseFields {
            title: self.title.trim().to_string(),
            amount,
            category: self.category.trim().to_string(),
            date,
        })
    }
}

impl From<&ExpenseFields> for ExpenseDraft {
    fn from(fields: &ExpenseFields) -> Self {
        Self {
            title: fields.title.clone(),
            amount: fields.amount.to_string(),
            category: fields.category.clone(),
            date: fields.date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Serde adapter for `YYYY-MM-DD` dates that tolerates a trailing time part
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        // "2024-01-01T00:00:00.000Z" and "2024-01-01 00:00:00" keep their date part
        let date_part = match raw.get(..10) {
            Some(prefix) if raw.len() > 10 => prefix,
            _ => raw,
        };
        NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Expense {
        Expense {
            id: ExpenseId::from(1),
            title: "Lunch".into(),
            amount: Amount::from_minor(20000),
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_deserialize_server_record() {
        let json = r#"{"id":1,"title":"Lunch","amount":200,"category":"Food","date":"2024-01-01"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense, lunch());
    }

    #[test]
    fn test_deserialize_tolerates_variants() {
        let json = r#"{
            "_id": "abc123",
            "title": "Lunch",
            "amount": "200",
            "category": "Food",
            "date": "2024-01-01T00:00:00.000Z",
            "userId": 9
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id.as_str(), "abc123");
        assert_eq!(expense.amount, Amount::from_minor(20000));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_deserialize_prefers_id_over_object_id() {
        let json = r#"{"_id":"a1","id":"a2","title":"Lunch","amount":200,"category":"Food","date":"2024-01-01","__v":0}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id.as_str(), "a2");

        let json = r#"{"title":"Lunch","amount":200,"category":"Food","date":"2024-01-01"}"#;
        let err = serde_json::from_str::<Expense>(json).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn test_deserialize_list_with_overprecise_amount() {
        let json = r#"[
            {"id":1,"title":"Lunch","amount":200,"category":"Food","date":"2024-01-01"},
            {"id":2,"title":"Tea","amount":10.555,"category":"Food","date":"2024-01-02"}
        ]"#;
        let expenses: Vec<Expense> = serde_json::from_str(json).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0], lunch());
        assert_eq!(expenses[1].amount, Amount::from_minor(1056));
    }

    #[test]
    fn test_fields_body() {
        let body = serde_json::to_value(lunch().fields()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "title": "Lunch",
                "amount": "200.00",
                "category": "Food",
                "date": "2024-01-01"
            })
        );
    }

    #[test]
    fn test_draft_validate_reports_missing_fields() {
        let draft = ExpenseDraft {
            title: "Bus".into(),
            amount: "  ".into(),
            category: "Transport".into(),
            date: String::new(),
        };
        let err = draft.validate().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: All fields are required (missing: amount, date)"
        );
    }

    #[test]
    fn test_draft_validate_parses() {
        let draft = ExpenseDraft {
            title: " Bus ".into(),
            amount: "50".into(),
            category: "Transport".into(),
            date: "2024-01-02".into(),
        };
        let fields = draft.validate().unwrap();
        assert_eq!(fields.title, "Bus");
        assert_eq!(fields.amount, Amount::from_minor(5000));
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_draft_rejects_bad_date_and_amount() {
        let mut draft = ExpenseDraft::from_expense(&lunch());
        draft.date = "01/02/2024".into();
        assert!(draft.validate().unwrap_err().is_validation());

        let mut draft = ExpenseDraft::from_expense(&lunch());
        draft.amount = "lots".into();
        assert!(draft.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_draft_prefill_and_clear() {
        let mut draft = ExpenseDraft::from_expense(&lunch());
        assert_eq!(draft.get(DraftField::Amount), "200.00");
        assert_eq!(draft.get(DraftField::Date), "2024-01-01");
        assert!(draft.missing_fields().is_empty());

        draft.set(DraftField::Title, "Dinner");
        assert_eq!(draft.title, "Dinner");

        draft.clear();
        assert!(draft.is_blank());
        assert_eq!(draft.missing_fields(), DraftField::ALL.to_vec());
    }
}
