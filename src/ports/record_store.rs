//! RecordStore port - Generic interface to the remote data store.
//!
//! The store is a set of tables of JSON rows. Only these request shapes are
//! ever issued:
//!
//! - **select** - equality filters, optional projection, order and limit
//! - **select_one** - point lookup; no row is `Ok(None)`, not an error
//! - **insert** - add a row; unique constraints are enforced by the store
//! - **upsert** - insert or merge into the row matching the conflict columns
//! - **update** - merge columns into the rows matching equality filters
//!
//! Adapters must surface a unique constraint violation as
//! [`StoreError::UniqueViolation`] so callers can tell a duplicate apart from
//! any other failure.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// A single row, as a JSON object.
pub type Row = Map<String, Value>;

/// Errors returned by the remote store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Unique constraint violated on '{table}': {detail}")]
    UniqueViolation { table: String, detail: String },

    #[error("Store rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Store rejected request with status {status}: {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Store unreachable: {0}")]
    Transport(String),

    #[error("Store request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Expected at most one row from '{table}', got {count}")]
    Ambiguous { table: String, count: usize },

    #[error("Malformed store response: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn unique_violation(table: impl Into<String>, detail: impl Into<String>) -> Self {
        StoreError::UniqueViolation {
            table: table.into(),
            detail: detail.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        StoreError::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        StoreError::Malformed(message.into())
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::UniqueViolation { .. } | StoreError::Rejected { .. } => {
                ErrorCode::StoreRejected
            }
            StoreError::Unauthorized(_) => ErrorCode::Unauthorized,
            StoreError::Transport(_) | StoreError::Timeout { .. } => ErrorCode::StoreUnavailable,
            StoreError::Ambiguous { .. } | StoreError::Malformed(_) => ErrorCode::MalformedRecord,
        }
    }

    /// Returns true if repeating the request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Transport(_) | StoreError::Timeout { .. } => true,
            StoreError::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Equality filter on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// True when `row` holds exactly this value in the filtered column.
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column) == Some(&self.value)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering applied to a select.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A select request.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub columns: Option<Vec<String>>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Select {
    /// Selects every column of every row of `table`.
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Restricts the returned columns.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Adds an equality filter.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Port for the remote data store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the rows matching `query`.
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError>;

    /// Inserts `row` and returns it as stored (with store-generated columns).
    ///
    /// # Errors
    /// Returns `StoreError::UniqueViolation` if the row collides with an
    /// existing one on a unique key.
    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError>;

    /// Inserts `row`, or merges its columns into the existing row that has
    /// the same values in `on_conflict`. Columns absent from `row` keep their
    /// stored values. Returns the resulting row.
    async fn upsert(&self, table: &str, row: Row, on_conflict: &[&str]) -> Result<Row, StoreError>;

    /// Merges `patch` into every row matching all `filters` and returns the
    /// updated rows. Matching nothing is not an error.
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError>;

    /// Point lookup.
    ///
    /// # Errors
    /// Returns `StoreError::Ambiguous` if more than one row matches.
    async fn select_one(&self, query: &Select) -> Result<Option<Row>, StoreError> {
        let query = query.clone().limit(2);
        let mut rows = self.select(&query).await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            count => Err(StoreError::Ambiguous {
                table: query.table,
                count,
            }),
        }
    }
}

/// Serializes a record into a row.
pub fn to_row<T: Serialize>(record: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(StoreError::malformed(format!(
            "expected an object, got {}",
            other
        ))),
        Err(e) => Err(StoreError::malformed(e.to_string())),
    }
}

/// Deserializes a row into a record.
pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn select_builder_collects_clauses() {
        let query = Select::from("devotional_content")
            .columns(["id"])
            .eq("user_id", "u1")
            .eq("date", "2024-01-01")
            .order_by("date", Direction::Descending)
            .limit(5);

        assert_eq!(query.table, "devotional_content");
        assert_eq!(query.columns, Some(vec!["id".to_string()]));
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.order.unwrap().direction, Direction::Descending);
    }

    #[test]
    fn filter_matches_exact_value_only() {
        let r = row(json!({ "user_id": "u1", "n": 1 }));
        assert!(Filter::eq("user_id", "u1").matches(&r));
        assert!(!Filter::eq("user_id", "u2").matches(&r));
        assert!(!Filter::eq("missing", "u1").matches(&r));
        assert!(!Filter::eq("n", "1").matches(&r));
    }

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(StoreError::transport("reset").is_retryable());
        assert!(StoreError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(StoreError::Rejected {
            status: 503,
            code: None,
            message: "down".into()
        }
        .is_retryable());
        assert!(!StoreError::unique_violation("t", "dup").is_retryable());
        assert!(!StoreError::Unauthorized("expired".into()).is_retryable());
    }

    #[test]
    fn error_codes_group_by_kind() {
        assert_eq!(StoreError::Unauthorized("x".into()).code(), ErrorCode::Unauthorized);
        assert_eq!(StoreError::transport("x").code(), ErrorCode::StoreUnavailable);
        assert_eq!(StoreError::malformed("x").code(), ErrorCode::MalformedRecord);
    }

    #[test]
    fn to_row_rejects_non_objects() {
        assert!(to_row(&json!({ "a": 1 })).is_ok());
        assert!(matches!(to_row(&json!([1])), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn from_row_decodes_records() {
        #[derive(serde::Deserialize)]
        struct R {
            a: i32,
        }
        let r: R = from_row(row(json!({ "a": 7 }))).unwrap();
        assert_eq!(r.a, 7);
    }
}
