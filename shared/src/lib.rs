//! Shared types for the balcão order watch agent
//!
//! Common types used across the client and watch crates: the order model,
//! staff roles, printer settings, response envelopes and the normalized
//! print document sent to the local print helper.

pub mod models;
pub mod print;
pub mod response;

// Re-exports
pub use models::order::{
    Address, ComboRef, Customer, Order, OrderItem, OrderStatus, Payment, PaymentField,
    PaymentMethod, ProductRef,
};
pub use models::printer::PrinterSettings;
pub use models::staff::StaffRole;
pub use print::{PrintDocument, PrintItem, PrintPayment};
pub use response::{HelperHealth, OpResult, Paginated};
