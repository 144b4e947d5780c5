//! Local print helper client
//!
//! The helper is a separate process on the operator's machine driving the
//! receipt printer, reached over a fixed local address. A short timeout
//! keeps a hung helper from stalling callers for long.

use crate::error::{rejection, ClientError, ClientResult};
use shared::{HelperHealth, OpResult, PrintDocument};
use std::time::Duration;

/// Default helper address; not the main backend
pub const DEFAULT_HELPER_URL: &str = "http://127.0.0.1:9100";

const HELPER_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the local print helper
#[derive(Debug, Clone)]
pub struct PrintHelperClient {
    client: reqwest::Client,
    base_url: String,
}

impl PrintHelperClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(HELPER_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a normalized order document to `POST /print`
    pub async fn print(&self, document: &PrintDocument) -> ClientResult<OpResult> {
        let url = format!("{}/print", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(document)
            .send()
            .await
            .map_err(ClientError::from)?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        resp.json().await.map_err(Into::into)
    }

    /// Query `GET /health` so the operator UI can show helper reachability,
    /// with the same unreachable-vs-rejected classification as printing
    pub async fn health(&self) -> ClientResult<HelperHealth> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        resp.json().await.map_err(Into::into)
    }
}
