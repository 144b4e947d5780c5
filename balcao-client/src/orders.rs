//! Backend orders API client
//!
//! Status-filtered paginated order queries plus the backend-side print
//! fallback (`POST /orders/{id}/print`).

use crate::error::{rejection, ClientResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{OpResult, Order, OrderStatus, Paginated};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of orders, the seam between the fetcher and the backend.
/// Implemented by [`OrdersApi`] in production and by mocks in tests.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// One page of orders in the given status
    async fn fetch_by_status(
        &self,
        status: OrderStatus,
        page: u32,
        per_page: u32,
    ) -> ClientResult<Paginated<Order>>;
}

/// HTTP client for the storefront backend's order endpoints
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: reqwest::Client,
    base_url: String,
}

impl OrdersApi {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send().await?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        resp.json().await.map_err(Into::into)
    }

    /// Ask the backend to print the order itself (fallback path when the
    /// local print helper is unavailable)
    pub async fn print_order(&self, id: i64) -> ClientResult<OpResult> {
        let url = format!("{}/orders/{}/print", self.base_url, id);
        let resp = self.client.post(&url).send().await?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        resp.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl OrderSource for OrdersApi {
    async fn fetch_by_status(
        &self,
        status: OrderStatus,
        page: u32,
        per_page: u32,
    ) -> ClientResult<Paginated<Order>> {
        self.get(
            "/orders",
            &[
                ("status", status.as_str().to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }
}
