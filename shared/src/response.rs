//! API Response types
//!
//! Envelopes used by the storefront backend and the local print helper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Paginated list response (`GET /orders?status=...&page=...&per_page=...`)
///
/// Deliberately tolerant: every field defaults so a sparse backend payload
/// still deserializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    // Explicit default path: a bare `default` would make the derive demand
    // `T: Default` even though `Vec<T>: Default` holds for any `T`
    #[serde(default = "Vec::new", alias = "data")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            per_page: 0,
            total: 0,
        }
    }
}

impl<T> Paginated<T> {
    /// Empty page, used when a status query degrades on failure
    pub fn empty() -> Self {
        Self::default()
    }
}

/// `{success, message}` result returned by both print endpoints
/// (`POST /print` on the helper, `POST /orders/{id}/print` on the backend)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl OpResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Print helper `GET /health` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperHealth {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    /// Deliberately has no Default impl, like the order entity
    #[derive(Debug, Deserialize)]
    struct Plain {
        id: i64,
    }

    #[test]
    fn paginated_deserializes_items_without_default_impl() {
        let page: Paginated<Plain> =
            serde_json::from_str(r#"{"items": [{"id": 1}], "page": 2}"#).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 1);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 0);
    }

    #[test]
    fn data_alias_and_missing_fields_are_tolerated() {
        let page: Paginated<Plain> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
