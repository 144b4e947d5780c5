//! Printer Settings Model

use serde::{Deserialize, Serialize};

/// Operator printer preferences, persisted as a small JSON file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrinterSettings {
    /// Let the print helper pick the OS default printer
    #[serde(default = "default_true")]
    pub use_default_printer: bool,
    /// Print newly detected orders automatically
    #[serde(default = "default_true")]
    pub auto_print: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            use_default_printer: true,
            auto_print: true,
        }
    }
}
