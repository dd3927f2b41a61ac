//! Snowflake SQL API client.
//!
//! Submits statements to `POST /api/v2/statements` and zips the result
//! set metadata with the data rows into name-keyed records. Introspection
//! statements (`SHOW ...`) do not support bind variables, so statements
//! are passed through as text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use graphcat_core::{CatalogError, CatalogResult};

/// One warehouse result row, keyed by the reported column names.
pub type SqlRecord = serde_json::Map<String, serde_json::Value>;

/// Credentials and account locator for the warehouse.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Account locator, e.g. `xy12345.us-east-1`.
    pub account: String,
    pub user: String,
    /// Programmatic access token presented as a bearer credential.
    pub token: String,
}

/// Executes one SQL statement and returns all result rows.
#[async_trait]
pub trait SqlRunner: Send + Sync {
    async fn run(&self, sql: &str) -> CatalogResult<Vec<SqlRecord>>;
}

/// Snowflake SQL API client.
#[derive(Clone)]
pub struct SnowflakeClient {
    base_url: String,
    user: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
}

#[derive(Deserialize)]
struct StatementResponse {
    #[serde(rename = "resultSetMetaData")]
    result_set_meta_data: ResultSetMetaData,
    #[serde(default)]
    data: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct ResultSetMetaData {
    #[serde(rename = "rowType")]
    row_type: Vec<RowType>,
}

#[derive(Deserialize)]
struct RowType {
    name: String,
}

impl SnowflakeClient {
    pub fn new(config: &WarehouseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            base_url: format!("https://{}.snowflakecomputing.com", config.account),
            user: config.user.clone(),
            token: config.token.clone(),
            client,
        }
    }
}

#[async_trait]
impl SqlRunner for SnowflakeClient {
    async fn run(&self, sql: &str) -> CatalogResult<Vec<SqlRecord>> {
        let response = self
            .client
            .post(format!("{}/api/v2/statements", self.base_url))
            .bearer_auth(&self.token)
            .header("X-Snowflake-Authorization-Token-Type", "PROGRAMMATIC_ACCESS_TOKEN")
            .header("User-Agent", format!("graphcat/{} ({})", env!("CARGO_PKG_VERSION"), self.user))
            .json(&StatementRequest { statement: sql })
            .send()
            .await
            .map_err(|e| CatalogError::WarehouseUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::WarehouseUnavailable(format!(
                "statement rejected ({status}): {body}"
            )));
        }

        let result: StatementResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::WarehouseUnavailable(e.to_string()))?;

        let columns: Vec<String> = result
            .result_set_meta_data
            .row_type
            .into_iter()
            .map(|c| c.name)
            .collect();

        let records = result
            .data
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect::<Vec<SqlRecord>>();

        debug!(rows = records.len(), "Warehouse statement executed");
        Ok(records)
    }
}
