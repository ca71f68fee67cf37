//! PostgREST Record Store - Implementation of RecordStore over HTTP.
//!
//! Talks to a PostgREST (or Supabase) endpoint at `{base_url}/rest/v1/{table}`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PostgrestConfig::new("https://project.supabase.co", anon_key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let store = PostgrestRecordStore::new(config)?;
//! ```
//!
//! # Error mapping
//!
//! - Postgres code `23505` (or a bare HTTP 409 without a code) → `StoreError::UniqueViolation`
//! - HTTP 401/403 → `StoreError::Unauthorized`
//! - any other non-2xx → `StoreError::Rejected`
//! - connect/timeout failures → `StoreError::Transport` / `StoreError::Timeout`

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::ports::{Direction, Filter, RecordStore, Row, Select, StoreError};

/// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Configuration for the PostgREST store.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL, without the `/rest/v1` suffix.
    pub base_url: String,
    /// Anonymous (publishable) API key.
    api_key: Secret<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Postgres schema; `None` uses the server default.
    pub schema: Option<String>,
}

impl PostgrestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: Secret::new(api_key.into()),
            timeout: Duration::from_secs(10),
            schema: None,
        }
    }

    /// Builds the adapter config from application settings.
    pub fn from_store_config(config: &StoreConfig) -> Self {
        let mut result = Self::new(config.url.clone(), config.anon_key.expose_secret().clone())
            .with_timeout(Duration::from_secs(config.request_timeout_secs));
        if let Some(schema) = &config.schema {
            result = result.with_schema(schema.clone());
        }
        result
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// PostgREST record store.
pub struct PostgrestRecordStore {
    config: PostgrestConfig,
    client: Client,
}

impl PostgrestRecordStore {
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    /// Starts a request with auth and schema headers.
    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let reads = method == Method::GET;
        let mut builder = self
            .client
            .request(method, self.table_url(table))
            .header("apikey", self.config.api_key())
            .bearer_auth(self.config.api_key())
            .header("Accept", "application/json");

        if let Some(schema) = &self.config.schema {
            let header = if reads { "Accept-Profile" } else { "Content-Profile" };
            builder = builder.header(header, schema);
        }
        builder
    }

    fn transport_error(&self, error: reqwest::Error) -> StoreError {
        if error.is_timeout() {
            StoreError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if error.is_connect() {
            StoreError::transport(format!("Connection failed: {}", error))
        } else {
            StoreError::transport(error.to_string())
        }
    }

    /// Sends the request and decodes the returned rows.
    async fn execute(&self, table: &str, request: RequestBuilder) -> Result<Vec<Row>, StoreError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = error_from_status(status.as_u16(), table, &body);
            match &error {
                StoreError::UniqueViolation { .. } => {
                    warn!(table, "Unique constraint rejected write")
                }
                StoreError::Unauthorized(_) => warn!(table, "Store rejected credentials"),
                _ => debug!(table, status = status.as_u16(), "Store request failed"),
            }
            return Err(error);
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        parse_rows(&body)
    }

    async fn write_one(&self, table: &str, request: RequestBuilder) -> Result<Row, StoreError> {
        self.execute(table, request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::malformed(format!("write to '{}' returned no row", table)))
    }
}

#[async_trait]
impl RecordStore for PostgrestRecordStore {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        debug!(table = %query.table, filters = query.filters.len(), "Store select");
        let request = self
            .request(Method::GET, &query.table)
            .query(&select_params(query));
        self.execute(&query.table, request).await
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError> {
        debug!(table, "Store insert");
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&row);
        self.write_one(table, request).await
    }

    async fn upsert(&self, table: &str, row: Row, on_conflict: &[&str]) -> Result<Row, StoreError> {
        debug!(table, on_conflict = %on_conflict.join(","), "Store upsert");
        let request = self
            .request(Method::POST, table)
            .query(&[("on_conflict", on_conflict.join(","))])
            .header("Prefer", "return=representation,resolution=merge-duplicates")
            .json(&row);
        self.write_one(table, request).await
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Row,
    ) -> Result<Vec<Row>, StoreError> {
        debug!(table, filters = filters.len(), "Store update");
        let request = self
            .request(Method::PATCH, table)
            .query(&filter_params(filters))
            .header("Prefer", "return=representation")
            .json(&patch);
        self.execute(table, request).await
    }
}

/// Renders a filter value the way PostgREST expects after `eq.`.
fn filter_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", filter_literal(&f.value))))
        .collect()
}

/// Query-string parameters for a select.
fn select_params(query: &Select) -> Vec<(String, String)> {
    let columns = match &query.columns {
        Some(columns) => columns.join(","),
        None => "*".to_string(),
    };
    let mut params = vec![("select".to_string(), columns)];
    params.extend(filter_params(&query.filters));

    if let Some(order) = &query.order {
        let direction = match order.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Maps a non-2xx response to a store error.
fn error_from_status(status: u16, table: &str, body: &str) -> StoreError {
    let parsed: PostgrestErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .clone()
        .unwrap_or_else(|| body.trim().to_string());

    let unique_violation = match parsed.code.as_deref() {
        Some(code) => code == UNIQUE_VIOLATION_CODE,
        None => status == 409,
    };
    if unique_violation {
        let detail = parsed.details.unwrap_or(message);
        return StoreError::unique_violation(table, detail);
    }

    match status {
        401 | 403 => StoreError::Unauthorized(message),
        _ => StoreError::Rejected {
            status,
            code: parsed.code,
            message,
        },
    }
}

/// Decodes a response body into rows. PostgREST returns an array, or an
/// empty body when no representation was requested.
fn parse_rows(body: &str) -> Result<Vec<Row>, StoreError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(StoreError::malformed(format!("expected a row, got {}", other))),
            })
            .collect(),
        Ok(Value::Object(row)) => Ok(vec![row]),
        Ok(other) => Err(StoreError::malformed(format!("expected rows, got {}", other))),
        Err(e) => Err(StoreError::malformed(e.to_string())),
    }
}
