use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use std::time::Duration;

/// Thin GraphQL-over-HTTP client for the jobs. Every call is a single
/// best-effort attempt with a bounded timeout; callers turn failures into
/// logged status lines.
pub struct GraphQlClient {
    http: reqwest::Client,
    url: String,
}

impl GraphQlClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Executes a GraphQL document and returns the `data` object.
    pub async fn execute(&self, query: &str) -> Result<Value> {
        let response = self
            .http
            .post(&self.url)
            .json(&json!({ "query": query }))
            .send()
            .await
            .context("GraphQL request failed")?;

        let body: Value = response
            .json()
            .await
            .context("GraphQL response was not valid JSON")?;

        if let Some(errors) = body.get("errors") {
            if errors.as_array().map_or(false, |a| !a.is_empty()) {
                return Err(anyhow!("GraphQL errors: {}", errors));
            }
        }

        body.get("data")
            .filter(|d| !d.is_null())
            .cloned()
            .ok_or_else(|| anyhow!("GraphQL response carried no data"))
    }
}
