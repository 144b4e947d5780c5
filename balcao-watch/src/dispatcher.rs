//! Notifier/printer dispatcher
//!
//! Reacts to each newly detected order at most once. The id is marked seen
//! and persisted *before* the notification or print runs: a crash between
//! mark and print loses that print, but no order is ever printed twice.
//!
//! Actions inside one batch are staggered (the Nth order fires after N
//! seconds) so a burst of orders does not produce simultaneous popups and
//! print jobs. Each action runs in its own task, so a hung print helper
//! never blocks the polling loop.

use crate::filter::DetectReason;
use crate::notify::Notifier;
use crate::seen::SeenSet;
use balcao_client::PrintGateway;
use shared::{Order, PrinterSettings};
use std::sync::Arc;
use std::time::Duration;

/// Per-order reaction pipeline
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    gateway: Arc<dyn PrintGateway>,
    settings: PrinterSettings,
}

impl Dispatcher {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        gateway: Arc<dyn PrintGateway>,
        settings: PrinterSettings,
    ) -> Self {
        Self {
            notifier,
            gateway,
            settings,
        }
    }

    /// Commit and schedule one batch of detected orders.
    ///
    /// Marks each id seen (persisting after every insert), then spawns the
    /// staggered toast + auto-print action.
    pub fn dispatch(&self, batch: Vec<(Order, DetectReason)>, seen: &mut SeenSet) {
        for (position, (order, reason)) in batch.into_iter().enumerate() {
            if !seen.add(order.id) {
                // Raced with a previous dispatch of the same id
                continue;
            }
            seen.persist();

            tracing::info!(
                order_id = order.id,
                order_number = %order.order_number,
                reason = ?reason,
                delay_secs = position,
                "Dispatching new order"
            );

            let notifier = self.notifier.clone();
            let gateway = self.gateway.clone();
            let auto_print = self.settings.auto_print;
            let delay = Duration::from_secs(position as u64);

            tokio::spawn(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                notifier.notify(&order, reason);

                if auto_print {
                    let outcome = gateway.print(&order).await;
                    if outcome.success {
                        tracing::debug!(order_id = order.id, "Auto-print completed");
                    } else {
                        tracing::error!(
                            order_id = order.id,
                            message = %outcome.message,
                            "Auto-print failed"
                        );
                    }
                }
            });
        }
    }
}
