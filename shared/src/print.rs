//! Print Document
//!
//! Normalized, backend-agnostic order representation sent to the local
//! print helper. Built fresh per print attempt, never persisted.
//!
//! Normalization rules at this boundary:
//! - monetary fields are 2-decimal strings, never floats;
//! - the legacy payment union always becomes an array;
//! - missing nested fields degrade to explicit `null`, never an error.

use crate::models::order::{Address, Order, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Format a monetary value as a 2-decimal string ("10" -> "10.00")
fn money(value: Decimal) -> String {
    let mut v = value;
    v.rescale(2);
    v.to_string()
}

/// Normalized line item. `product` and `combo` are always serialized, as
/// explicit `null` when absent, so the helper never has to test for keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrintItem {
    pub quantity: i32,
    pub price: String,
    pub product: Option<String>,
    pub combo: Option<String>,
    pub notes: Option<String>,
}

/// Normalized payment record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrintPayment {
    pub method: PaymentMethod,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// Document posted to the print helper's `POST /print`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintDocument {
    pub order_id: i64,
    pub order_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Vec<PrintItem>,
    pub payments: Vec<PrintPayment>,
    pub delivery_address: Option<Address>,
    pub subtotal: String,
    pub delivery_fee: String,
    pub total: String,
    pub created_at: Option<String>,
    /// Routing hint for the helper: print on the OS default printer
    /// instead of the helper's configured device
    pub use_default_printer: bool,
}

impl PrintDocument {
    /// Build the normalized document from a backend order
    pub fn from_order(order: &Order) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| PrintItem {
                quantity: item.quantity,
                price: money(item.price),
                product: item.product.as_ref().map(|p| p.name.clone()),
                combo: item.combo.as_ref().map(|c| c.name.clone()),
                notes: item.notes.clone(),
            })
            .collect();

        let payments = order
            .payments()
            .iter()
            .map(|p| PrintPayment {
                method: p.method,
                amount: p.amount.map(money),
                status: p.status.clone(),
            })
            .collect();

        Self {
            order_id: order.id,
            order_number: order.order_number.clone(),
            customer_name: order.customer.as_ref().and_then(|c| c.name.clone()),
            customer_phone: order.customer.as_ref().and_then(|c| c.phone.clone()),
            items,
            payments,
            delivery_address: order.delivery_address.clone(),
            subtotal: money(order.subtotal),
            delivery_fee: money(order.delivery_fee),
            total: money(order.total),
            created_at: order.created_at.map(|t| t.to_rfc3339()),
            use_default_printer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_single_payment() -> Order {
        serde_json::from_str(
            r#"{
                "id": 42,
                "order_number": "A-0042",
                "status": "pending",
                "payment": {"method": "dinheiro", "amount": 55.5},
                "items": [
                    {"quantity": 2, "price": 19, "product": {"name": "X-Bacon"}},
                    {"quantity": 1, "price": 17.5, "combo": {"name": "Combo Casal"}}
                ],
                "subtotal": 55.5,
                "delivery_fee": 7,
                "total": 62.5
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn money_fields_become_two_decimal_strings() {
        let doc = PrintDocument::from_order(&order_with_single_payment());
        assert_eq!(doc.total, "62.50");
        assert_eq!(doc.delivery_fee, "7.00");
        assert_eq!(doc.items[0].price, "19.00");
        assert_eq!(doc.items[1].price, "17.50");
        assert_eq!(doc.payments[0].amount.as_deref(), Some("55.50"));
    }

    #[test]
    fn single_payment_object_normalizes_to_array() {
        let doc = PrintDocument::from_order(&order_with_single_payment());
        assert_eq!(doc.payments.len(), 1);
        assert_eq!(doc.payments[0].method, PaymentMethod::Dinheiro);
    }

    #[test]
    fn absent_product_and_combo_serialize_as_null() {
        let doc = PrintDocument::from_order(&order_with_single_payment());
        let json = serde_json::to_value(&doc).unwrap();

        // First item is a product: combo must be an explicit null key
        let first = &json["items"][0];
        assert_eq!(first["product"], serde_json::json!("X-Bacon"));
        assert!(first.get("combo").is_some());
        assert!(first["combo"].is_null());

        // Second item is a combo: product must be an explicit null key
        let second = &json["items"][1];
        assert!(second.get("product").is_some());
        assert!(second["product"].is_null());
        assert_eq!(second["combo"], serde_json::json!("Combo Casal"));
    }

    #[test]
    fn missing_nested_fields_degrade_to_null() {
        let order: Order =
            serde_json::from_str(r#"{"id": 1, "status": "pending"}"#).unwrap();
        let doc = PrintDocument::from_order(&order);
        assert!(doc.customer_name.is_none());
        assert!(doc.delivery_address.is_none());
        assert!(doc.payments.is_empty());
        assert_eq!(doc.total, "0.00");
        assert!(doc.use_default_printer);
    }
}
