//! Operator notification seam
//!
//! The hosting surface decides what a "toast" is; the agent only knows the
//! trait. Production uses [`TracingNotifier`], tests record calls.

use crate::filter::DetectReason;
use shared::Order;

/// Toast-style notification sink
pub trait Notifier: Send + Sync {
    fn notify(&self, order: &Order, reason: DetectReason);
}

/// Notifier that emits structured log lines
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, order: &Order, reason: DetectReason) {
        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            title = reason.title(),
            "New order"
        );
    }
}
