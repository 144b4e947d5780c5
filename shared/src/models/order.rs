//! Order Model
//!
//! Read-only view of the storefront backend's order entity. Orders are only
//! mutated by the backend; the watch agent reads and reacts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Preparing,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Statuses of orders that are still moving through the store workflow.
    /// Completed and cancelled orders are never polled.
    pub const IN_FLIGHT: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
    ];

    /// Wire representation (also used as the `status` query parameter)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        Self::IN_FLIGHT.contains(self)
    }
}

/// Payment method
///
/// `Pix` requires the gateway to confirm payment before the order moves to
/// `processing`; cash and card-on-delivery need no advance confirmation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    /// Cash on delivery ("dinheiro")
    Dinheiro,
    /// Card on delivery ("cartao")
    Cartao,
    /// Unknown method from a newer backend
    Other,
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Unknown methods degrade to Other instead of failing the order
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "pix" => PaymentMethod::Pix,
            "dinheiro" => PaymentMethod::Dinheiro,
            "cartao" => PaymentMethod::Cartao,
            _ => PaymentMethod::Other,
        })
    }
}

impl PaymentMethod {
    /// Whether the method needs an online payment confirmation before the
    /// order can be worked on
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, PaymentMethod::Pix | PaymentMethod::Other)
    }
}

/// Single payment record attached to an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub method: PaymentMethod,
    /// Amount in currency unit
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payment field as actually sent by the backend
///
/// Legacy orders carry a single payment object, newer ones an array. The
/// shape is normalized exactly once, at this boundary, via
/// [`Order::payments`]; callers never see the raw union.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentField {
    Many(Vec<Payment>),
    Single(Payment),
}

/// Customer reference on an order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Customer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Product reference on a line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub name: String,
}

/// Combo reference on a line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboRef {
    pub name: String,
}

/// Order line item (either a product or a combo)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Unit price in currency unit
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default)]
    pub combo: Option<ComboRef>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Display number shown to the operator (not the primary key)
    #[serde(default)]
    pub order_number: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment: Option<PaymentField>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub delivery_address: Option<Address>,
    /// Items subtotal in currency unit
    #[serde(default)]
    pub subtotal: Decimal,
    /// Delivery fee in currency unit
    #[serde(default)]
    pub delivery_fee: Decimal,
    /// Grand total in currency unit
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Normalized view over the legacy payment union: single object, array
    /// or absent all come back as a slice.
    pub fn payments(&self) -> &[Payment] {
        match &self.payment {
            None => &[],
            Some(PaymentField::Single(p)) => std::slice::from_ref(p),
            Some(PaymentField::Many(v)) => v,
        }
    }

    /// Method of the primary (first) payment, if any
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payments().first().map(|p| p.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_format_is_lowercase() {
        let s: OrderStatus = serde_json::from_str("\"delivering\"").unwrap();
        assert_eq!(s, OrderStatus::Delivering);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"delivering\"");
    }

    #[test]
    fn unknown_payment_method_falls_back_to_other() {
        let m: PaymentMethod = serde_json::from_str("\"boleto\"").unwrap();
        assert_eq!(m, PaymentMethod::Other);
        assert!(m.requires_confirmation());
    }

    #[test]
    fn payment_union_accepts_single_object() {
        let order: Order = serde_json::from_str(
            r#"{"id": 7, "status": "pending", "payment": {"method": "dinheiro"}}"#,
        )
        .unwrap();
        assert_eq!(order.payments().len(), 1);
        assert_eq!(order.payment_method(), Some(PaymentMethod::Dinheiro));
    }

    #[test]
    fn payment_union_accepts_array() {
        let order: Order = serde_json::from_str(
            r#"{"id": 8, "status": "processing",
                "payment": [{"method": "pix", "status": "paid"}, {"method": "dinheiro"}]}"#,
        )
        .unwrap();
        assert_eq!(order.payments().len(), 2);
        assert_eq!(order.payment_method(), Some(PaymentMethod::Pix));
    }

    #[test]
    fn absent_payment_normalizes_to_empty() {
        let order: Order =
            serde_json::from_str(r#"{"id": 9, "status": "pending"}"#).unwrap();
        assert!(order.payments().is_empty());
        assert_eq!(order.payment_method(), None);
    }

    #[test]
    fn numeric_prices_deserialize_as_decimal() {
        let order: Order = serde_json::from_str(
            r#"{"id": 10, "status": "pending", "total": 42.5,
                "items": [{"price": 12.9, "product": {"name": "X-Salada"}}]}"#,
        )
        .unwrap();
        assert_eq!(order.total, Decimal::new(425, 1));
        assert_eq!(order.items[0].price, Decimal::new(129, 1));
        assert_eq!(order.items[0].quantity, 1);
    }
}
