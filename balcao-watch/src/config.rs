//! Agent configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | API_BASE_URL | http://localhost:8000/api | Storefront backend base URL |
//! | PRINT_HELPER_URL | http://127.0.0.1:9100 | Local print helper address |
//! | WORK_DIR | /var/lib/balcao | Seen-set and settings files |
//! | POLL_INTERVAL_MS | 10000 | Polling period |
//! | PAGE_SIZE | 50 | Per-status page size while polling |
//! | PRIMING_PAGE_SIZE | 200 | Per-status page size for the priming bulk read |

use balcao_client::DEFAULT_HELPER_URL;
use shared::PrinterSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub print_helper_url: String,
    pub work_dir: String,
    pub poll_interval: Duration,
    pub page_size: u32,
    pub priming_page_size: u32,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".into()),
            print_helper_url: std::env::var("PRINT_HELPER_URL")
                .unwrap_or_else(|_| DEFAULT_HELPER_URL.into()),
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/balcao".into()),
            poll_interval: Duration::from_millis(
                std::env::var("POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10_000),
            ),
            page_size: std::env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            priming_page_size: std::env::var("PRIMING_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
        }
    }

    pub fn seen_path(&self) -> PathBuf {
        Path::new(&self.work_dir).join("seen_orders.json")
    }

    pub fn printer_settings_path(&self) -> PathBuf {
        Path::new(&self.work_dir).join("printer_settings.json")
    }
}

/// Load printer preferences; missing or corrupt data yields the defaults
pub fn load_printer_settings(path: &Path) -> PrinterSettings {
    match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Printer settings corrupt, using defaults"
            );
            PrinterSettings::default()
        }),
        Err(_) => PrinterSettings::default(),
    }
}

/// Save printer preferences; failures are logged, not propagated
pub fn save_printer_settings(path: &Path, settings: PrinterSettings) {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&settings)?;
        std::fs::write(path, json)
    };

    if let Err(e) = write() {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to persist printer settings"
        );
    }
}
