//! Order fetcher
//!
//! Retrieves the current in-flight order set: one paginated query per
//! active status, issued concurrently and joined. A failing status query
//! degrades to an empty page so one bad status never blocks visibility
//! into the others.

use balcao_client::OrderSource;
use futures::future::join_all;
use shared::{Order, OrderStatus};
use std::collections::HashMap;
use std::sync::Arc;

/// Result of one in-flight sweep
#[derive(Debug)]
pub struct FetchReport {
    /// Orders merged across statuses, deduplicated by id, sorted by id
    pub orders: Vec<Order>,
    /// Statuses whose query failed and contributed an empty page
    pub failed: Vec<OrderStatus>,
}

impl FetchReport {
    /// True when the whole sweep failed (no status answered)
    pub fn all_failed(&self) -> bool {
        self.failed.len() == OrderStatus::IN_FLIGHT.len()
    }
}

/// Pure-read fetcher over an [`OrderSource`]
pub struct OrderFetcher {
    source: Arc<dyn OrderSource>,
}

impl OrderFetcher {
    pub fn new(source: Arc<dyn OrderSource>) -> Self {
        Self { source }
    }

    /// Fetch page 1 of every in-flight status concurrently and merge.
    /// Duplicate ids across statuses are not expected (filters are
    /// disjoint) but last write wins if they happen.
    pub async fn fetch_in_flight(&self, per_page: u32) -> FetchReport {
        let queries = OrderStatus::IN_FLIGHT.iter().map(|status| {
            let source = self.source.clone();
            let status = *status;
            async move { (status, source.fetch_by_status(status, 1, per_page).await) }
        });

        let mut merged: HashMap<i64, Order> = HashMap::new();
        let mut failed = Vec::new();

        for (status, result) in join_all(queries).await {
            match result {
                Ok(page) => {
                    for order in page.items {
                        merged.insert(order.id, order);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        status = status.as_str(),
                        error = %e,
                        "Status query failed, degrading to empty page"
                    );
                    failed.push(status);
                }
            }
        }

        let mut orders: Vec<Order> = merged.into_values().collect();
        orders.sort_unstable_by_key(|o| o.id);

        FetchReport { orders, failed }
    }
}
