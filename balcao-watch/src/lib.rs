//! balcão order watch agent
//!
//! Polls the storefront backend for in-flight orders on a fixed cadence,
//! detects genuinely new ones through a persisted seen-set, notifies the
//! operator with staggered toasts and drives the local receipt print
//! helper (with backend fallback).
//!
//! Lifecycle: [`session::PollingSession::start`] primes the seen-set with
//! every order already open, then runs non-overlapping ticks until
//! [`session::PollingSession::stop`].

pub mod config;
pub mod dispatcher;
pub mod fetcher;
pub mod filter;
pub mod notify;
pub mod seen;
pub mod session;

// Re-exports
pub use config::Config;
pub use dispatcher::Dispatcher;
pub use fetcher::{FetchReport, OrderFetcher};
pub use filter::DetectReason;
pub use notify::{Notifier, TracingNotifier};
pub use seen::SeenSet;
pub use session::{PollingSession, StartError};
