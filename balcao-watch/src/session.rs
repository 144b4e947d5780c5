//! Polling session
//!
//! Owns the whole watch lifecycle: priming, the fixed-interval polling
//! loop, the live in-flight feed, and the dispatcher hand-off. At most one
//! timer exists per session; `start` while active is a no-op and `stop`
//! releases the timer immediately.
//!
//! Ticks never overlap: each tick's fetch, filter and dispatch complete
//! before the next tick is taken from the interval.

use crate::dispatcher::Dispatcher;
use crate::fetcher::OrderFetcher;
use crate::filter;
use crate::seen::SeenSet;
use shared::{Order, StaffRole};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Why an activation attempt was refused
#[derive(Debug, Error)]
pub enum StartError {
    /// Only staff may watch orders
    #[error("role {0:?} is not allowed to start order polling")]
    RoleNotAllowed(StaffRole),

    /// The priming bulk fetch failed entirely. Starting without a baseline
    /// would flag every open order as new, so the activation aborts.
    #[error("priming fetch failed, polling not started")]
    PrimingFailed,
}

// Session lifecycle. ACTIVATING is claimed atomically before the priming
// fetch so two concurrent `start` calls cannot both prime and both spawn
// a loop.
const IDLE: u8 = 0;
const ACTIVATING: u8 = 1;
const ACTIVE: u8 = 2;

/// Long-lived polling session handle
pub struct PollingSession {
    fetcher: OrderFetcher,
    dispatcher: Dispatcher,
    seen: Mutex<SeenSet>,
    live_tx: watch::Sender<Vec<Order>>,
    state: AtomicU8,
    cancel: Mutex<Option<CancellationToken>>,
    role: Mutex<Option<StaffRole>>,
    poll_interval: Duration,
    page_size: u32,
    priming_page_size: u32,
}

impl PollingSession {
    pub fn new(
        fetcher: OrderFetcher,
        dispatcher: Dispatcher,
        seen: SeenSet,
        poll_interval: Duration,
        page_size: u32,
        priming_page_size: u32,
    ) -> Arc<Self> {
        let (live_tx, _) = watch::channel(Vec::new());
        Arc::new(Self {
            fetcher,
            dispatcher,
            seen: Mutex::new(seen),
            live_tx,
            state: AtomicU8::new(IDLE),
            cancel: Mutex::new(None),
            role: Mutex::new(None),
            poll_interval,
            page_size,
            priming_page_size,
        })
    }

    /// Prime the seen-set and start the polling loop.
    ///
    /// No-op when already active. Fails when the role may not watch or when
    /// the priming sweep gets no answer from any status.
    pub async fn start(self: &Arc<Self>, role: StaffRole) -> Result<(), StartError> {
        if !role.can_watch() {
            return Err(StartError::RoleNotAllowed(role));
        }
        // Claim activation before any await; a second caller arriving while
        // priming is in flight sees the claim and backs off.
        if self
            .state
            .compare_exchange(IDLE, ACTIVATING, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Polling session already active, start is a no-op");
            return Ok(());
        }

        // Priming: mark every currently open order as seen so nothing that
        // predates this activation is ever treated as new.
        let report = self.fetcher.fetch_in_flight(self.priming_page_size).await;
        if report.all_failed() {
            tracing::error!("Priming fetch failed for every status, aborting activation");
            self.state.store(IDLE, Ordering::SeqCst);
            return Err(StartError::PrimingFailed);
        }

        {
            let mut seen = self.seen.lock().expect("seen set lock poisoned");
            for order in &report.orders {
                seen.add(order.id);
            }
            seen.persist();
        }
        self.live_tx.send_replace(report.orders.clone());
        tracing::info!(
            primed = report.orders.len(),
            role = ?role,
            "Priming complete, starting polling loop"
        );

        *self.role.lock().expect("role lock poisoned") = Some(role);
        let token = CancellationToken::new();
        *self.cancel.lock().expect("cancel lock poisoned") = Some(token.clone());

        // A stop() issued during the priming fetch moved the state back to
        // IDLE; honor it and do not spawn the loop.
        if self
            .state
            .compare_exchange(ACTIVATING, ACTIVE, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.cancel.lock().expect("cancel lock poisoned").take();
            *self.role.lock().expect("role lock poisoned") = None;
            tracing::info!("Session stopped during priming, polling not started");
            return Ok(());
        }

        let session = self.clone();
        tokio::spawn(async move {
            session.run_loop(token).await;
        });

        Ok(())
    }

    /// Stop polling. The timer is released immediately; results of requests
    /// already in flight are discarded.
    pub fn stop(&self) {
        if self.state.swap(IDLE, Ordering::SeqCst) == IDLE {
            return;
        }
        if let Some(token) = self.cancel.lock().expect("cancel lock poisoned").take() {
            token.cancel();
        }
        *self.role.lock().expect("role lock poisoned") = None;
        tracing::info!("Polling session stopped");
    }

    pub fn is_active(&self) -> bool {
        self.state.load(Ordering::SeqCst) == ACTIVE
    }

    /// Live in-flight order feed (UI badge source). Updated on priming and
    /// on every tick, before filtering.
    pub fn live_orders(&self) -> watch::Receiver<Vec<Order>> {
        self.live_tx.subscribe()
    }

    /// Logout-style cache reset
    pub fn clear_seen(&self) {
        self.seen.lock().expect("seen set lock poisoned").clear();
        tracing::info!("Seen-set cleared");
    }

    async fn run_loop(self: Arc<Self>, token: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; priming already
        // covered this instant, so consume it.
        ticker.tick().await;

        tracing::info!(interval = ?self.poll_interval, "Polling loop started");
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    if self.state.load(Ordering::SeqCst) != ACTIVE {
                        break;
                    }
                    // Awaited inline: the next tick cannot start until this
                    // one has settled.
                    self.tick().await;
                }
            }
        }
        tracing::info!("Polling loop stopped");
    }

    async fn tick(&self) {
        let report = self.fetcher.fetch_in_flight(self.page_size).await;

        // Re-check after the async boundary: a stop() issued mid-fetch
        // means these results are not acted upon.
        if self.state.load(Ordering::SeqCst) != ACTIVE {
            return;
        }

        // Publish the raw live set regardless of filtering
        self.live_tx.send_replace(report.orders.clone());

        let role = *self.role.lock().expect("role lock poisoned");
        if !role.is_some_and(|r| r.receives_notifications()) {
            return;
        }

        let mut seen = self.seen.lock().expect("seen set lock poisoned");
        let batch = filter::detect_new(&report.orders, &seen);
        if batch.is_empty() {
            return;
        }

        tracing::info!(count = batch.len(), "New orders detected");
        self.dispatcher.dispatch(batch, &mut seen);
    }
}
