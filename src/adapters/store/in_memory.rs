//! In-Memory Record Store Adapter
//!
//! Keeps tables as vectors of JSON rows. Unique keys and `now()` column
//! defaults are declared per table with [`TableSpec`] so duplicate handling
//! behaves like the real store. Useful for testing and development.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::devotional::DevotionalContent;
use crate::domain::user::UserProfile;
use crate::ports::{Clock, Direction, Filter, RecordStore, Row, Select, StoreError};

/// Constraints and defaults for one table.
#[derive(Debug, Clone, Default)]
pub struct TableSpec {
    unique_keys: Vec<Vec<String>>,
    default_now: Vec<String>,
}

impl TableSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a unique key over `columns`.
    pub fn unique(mut self, columns: &[&str]) -> Self {
        self.unique_keys
            .push(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Fills `column` with the current time when an insert leaves it empty.
    pub fn default_now(mut self, column: &str) -> Self {
        self.default_now.push(column.to_string());
        self
    }
}

/// In-memory implementation of [`RecordStore`].
#[derive(Clone)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<HashMap<String, Vec<Row>>>>,
    specs: Arc<HashMap<String, TableSpec>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRecordStore {
    /// Creates a store with no declared constraints.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            specs: Arc::new(HashMap::new()),
            clock,
        }
    }

    /// Creates a store with the same constraints and defaults as
    /// `migrations/0001_initial.sql`.
    pub fn with_default_schema(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock)
            .with_table(
                UserProfile::TABLE,
                TableSpec::new()
                    .unique(&["user_id"])
                    .default_now("created_at")
                    .default_now("updated_at"),
            )
            .with_table(
                DevotionalContent::TABLE,
                TableSpec::new()
                    .unique(&["id"])
                    .unique(&["user_id", "date"])
                    .default_now("created_at"),
            )
    }

    /// Declares constraints for `table`.
    pub fn with_table(mut self, table: &str, spec: TableSpec) -> Self {
        Arc::make_mut(&mut self.specs).insert(table.to_string(), spec);
        self
    }

    /// Number of rows in `table`.
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn spec(&self, table: &str) -> Option<&TableSpec> {
        self.specs.get(table)
    }

    fn apply_defaults(&self, table: &str, row: &mut Row) {
        let Some(spec) = self.spec(table) else {
            return;
        };
        let now = self.clock.now().to_rfc3339();
        for column in &spec.default_now {
            let empty = row.get(column).map_or(true, Value::is_null);
            if empty {
                row.insert(column.clone(), Value::String(now.clone()));
            }
        }
    }

    /// Checks `row` against every unique key of `table`, ignoring the row at
    /// `skip` (the row being merged into).
    fn check_unique(
        &self,
        table: &str,
        rows: &[Row],
        row: &Row,
        skip: Option<usize>,
    ) -> Result<(), StoreError> {
        let Some(spec) = self.spec(table) else {
            return Ok(());
        };
        for key in &spec.unique_keys {
            let Some(values) = key_values(row, key) else {
                continue;
            };
            let clash = rows
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != skip)
                .any(|(_, existing)| key_values(existing, key).as_ref() == Some(&values));
            if clash {
                return Err(StoreError::unique_violation(
                    table,
                    format!(
                        "duplicate key value violates unique constraint on ({})",
                        key.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Values of `key` in `row`, or `None` if any is missing or null.
fn key_values(row: &Row, key: &[String]) -> Option<Vec<Value>> {
    key.iter()
        .map(|column| row.get(column).filter(|v| !v.is_null()).cloned())
        .collect()
}

fn matches_all(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Orders two column values the way the store would: nulls last, numbers
/// numerically, strings lexicographically.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn project(row: &Row, columns: &Option<Vec<String>>) -> Row {
    match columns {
        None => row.clone(),
        Some(columns) => columns
            .iter()
            .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
            .collect(),
    }
}

fn merge(target: &mut Row, patch: Row) {
    for (column, value) in patch {
        target.insert(column, value);
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().await;
        let Some(rows) = tables.get(&query.table) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Row> = rows
            .iter()
            .filter(|row| matches_all(row, &query.filters))
            .collect();

        if let Some(order) = &query.order {
            matched.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .take(limit)
            .map(|row| project(row, &query.columns))
            .collect())
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Row, StoreError> {
        self.apply_defaults(table, &mut row);

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        self.check_unique(table, rows, &row, None)?;
        rows.push(row.clone());
        Ok(row)
    }

    async fn upsert(&self, table: &str, row: Row, on_conflict: &[&str]) -> Result<Row, StoreError> {
        let conflict: Vec<String> = on_conflict.iter().map(|c| c.to_string()).collect();
        let Some(conflict_values) = key_values(&row, &conflict) else {
            return Err(StoreError::Rejected {
                status: 400,
                code: None,
                message: format!(
                    "upsert row is missing conflict column(s) ({})",
                    conflict.join(", ")
                ),
            });
        };

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        let existing = rows
            .iter()
            .position(|r| key_values(r, &conflict).as_ref() == Some(&conflict_values));

        match existing {
            Some(index) => {
                let mut merged = rows[index].clone();
                merge(&mut merged, row);
                self.check_unique(table, rows, &merged, Some(index))?;
                rows[index] = merged.clone();
                Ok(merged)
            }
            None => {
                let mut row = row;
                self.apply_defaults(table, &mut row);
                self.check_unique(table, rows, &row, None)?;
                rows.push(row.clone());
                Ok(row)
            }
        }
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let targets: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches_all(row, filters))
            .map(|(i, _)| i)
            .collect();

        // Validate every merged row before writing any of them.
        let mut merged_rows = Vec::with_capacity(targets.len());
        for &index in &targets {
            let mut merged = rows[index].clone();
            merge(&mut merged, patch.clone());
            self.check_unique(table, rows, &merged, Some(index))?;
            merged_rows.push(merged);
        }

        for (&index, merged) in targets.iter().zip(&merged_rows) {
            rows[index] = merged.clone();
        }
        Ok(merged_rows)
    }
}
