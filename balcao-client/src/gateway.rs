//! Print gateway
//!
//! One call that always resolves to a `{success, message}` outcome: try the
//! local helper first, fall back to the backend print endpoint on any
//! failure. Fallback errors are logged, never retried again.

use crate::error::ClientError;
use crate::helper::PrintHelperClient;
use crate::orders::OrdersApi;
use async_trait::async_trait;
use shared::{OpResult, Order, PrintDocument, PrinterSettings};
use std::sync::Arc;

/// Seam between the dispatcher and the print path
#[async_trait]
pub trait PrintGateway: Send + Sync {
    /// Print the order, best effort. Never returns an error; failures are
    /// folded into the outcome.
    async fn print(&self, order: &Order) -> OpResult;
}

/// Production gateway: local helper with backend fallback
pub struct HelperWithFallback {
    helper: PrintHelperClient,
    backend: Arc<OrdersApi>,
    settings: PrinterSettings,
}

impl HelperWithFallback {
    pub fn new(
        helper: PrintHelperClient,
        backend: Arc<OrdersApi>,
        settings: PrinterSettings,
    ) -> Self {
        Self {
            helper,
            backend,
            settings,
        }
    }

    async fn fallback(&self, order_id: i64) -> OpResult {
        match self.backend.print_order(order_id).await {
            Ok(result) => {
                tracing::info!(
                    order_id,
                    success = result.success,
                    "Backend print fallback completed"
                );
                result
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Backend print fallback failed");
                OpResult::failed(e.to_string())
            }
        }
    }
}

#[async_trait]
impl PrintGateway for HelperWithFallback {
    async fn print(&self, order: &Order) -> OpResult {
        let mut document = PrintDocument::from_order(order);
        document.use_default_printer = self.settings.use_default_printer;

        match self.helper.print(&document).await {
            Ok(result) if result.success => result,
            Ok(result) => {
                tracing::warn!(
                    order_id = order.id,
                    message = %result.message,
                    "Print helper rejected request, falling back to backend"
                );
                self.fallback(order.id).await
            }
            Err(e @ ClientError::Unreachable(_)) => {
                tracing::warn!(
                    order_id = order.id,
                    error = %e,
                    "Print helper unreachable, falling back to backend"
                );
                self.fallback(order.id).await
            }
            Err(e) => {
                tracing::warn!(
                    order_id = order.id,
                    error = %e,
                    "Print helper request failed, falling back to backend"
                );
                self.fallback(order.id).await
            }
        }
    }
}
