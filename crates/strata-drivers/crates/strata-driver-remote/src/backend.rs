//! HTTP adapter for the server-side query proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use strata_core::{QueryBackend, QueryRequest, QueryResult, Result, StrataError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Query backend that forwards SQL to a remote proxy endpoint.
///
/// The proxy answers every request with the shared result shape. A
/// non-2xx status is surfaced as an error with the raw response body;
/// a 2xx body is trusted verbatim, including any `error` field the
/// proxy chose to populate.
pub struct RemoteBackend {
    client: Client,
    endpoint: String,
    database: String,
}

impl RemoteBackend {
    /// Create a backend for `endpoint`, targeting `database`.
    pub fn new(endpoint: impl Into<String>, database: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StrataError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            database: database.into(),
        })
    }

    /// The proxy endpoint this backend posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The database name sent with every request.
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl QueryBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn execute(&self, sql: &str) -> Result<QueryResult> {
        let request = QueryRequest {
            sql: sql.to_string(),
            database: self.database.clone(),
            limit: None,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| StrataError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "proxy rejected query");
            return Err(StrataError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let result: QueryResult = response
            .json()
            .await
            .map_err(|e| StrataError::Transport(format!("Invalid proxy response: {}", e)))?;

        tracing::debug!(
            row_count = result.row_count,
            duration_ms = result.execution_time_ms,
            "proxy query completed"
        );
        Ok(result)
    }
}
