//! HTTP clients for the balcão watch agent
//!
//! Two peers, one crate: the storefront backend's order API and the local
//! receipt print helper. Both share the unreachable-vs-rejected error
//! classification in [`error::ClientError`].

pub mod error;
pub mod gateway;
pub mod helper;
pub mod orders;

// Re-exports
pub use error::{ClientError, ClientResult};
pub use gateway::{HelperWithFallback, PrintGateway};
pub use helper::{PrintHelperClient, DEFAULT_HELPER_URL};
pub use orders::{OrderSource, OrdersApi};
