//! New-order filter
//!
//! Decides which freshly fetched orders are genuinely new and warrant a
//! notification/print. An order qualifies iff its id is not in the seen-set
//! and either:
//! - its status is `processing` (an online payment was just confirmed), or
//! - its status is `pending` and the payment method needs no advance
//!   confirmation (cash, card on delivery).
//!
//! Pending PIX orders are deliberately excluded: they have not been
//! confirmed as paid yet. Detection never mutates the seen-set; commitment
//! happens at dispatch time.

use crate::seen::SeenSet;
use shared::{Order, OrderStatus, PaymentMethod};

/// Why an order was flagged as new (drives the toast title)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectReason {
    /// Online payment (PIX) confirmed, order moved to `processing`
    PaymentConfirmed,
    /// Pending order paid in cash on delivery
    Cash,
    /// Pending order paid by card on delivery
    CardOnDelivery,
}

impl DetectReason {
    /// Toast title shown to the operator
    pub fn title(&self) -> &'static str {
        match self {
            DetectReason::PaymentConfirmed => "Pagamento confirmado",
            DetectReason::Cash => "Novo pedido em dinheiro",
            DetectReason::CardOnDelivery => "Novo pedido com cartão na entrega",
        }
    }
}

/// Classify a single order, ignoring the seen-set
pub fn classify(order: &Order) -> Option<DetectReason> {
    match order.status {
        OrderStatus::Processing => Some(DetectReason::PaymentConfirmed),
        OrderStatus::Pending => match order.payment_method() {
            Some(PaymentMethod::Dinheiro) => Some(DetectReason::Cash),
            Some(PaymentMethod::Cartao) => Some(DetectReason::CardOnDelivery),
            _ => None,
        },
        _ => None,
    }
}

/// Compute the printable subset of a fetched in-flight list
pub fn detect_new(orders: &[Order], seen: &SeenSet) -> Vec<(Order, DetectReason)> {
    orders
        .iter()
        .filter(|order| !seen.contains(order.id))
        .filter_map(|order| classify(order).map(|reason| (order.clone(), reason)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, status: &str, method: Option<&str>) -> Order {
        let payment = match method {
            Some(m) => serde_json::json!({"method": m}),
            None => serde_json::Value::Null,
        };
        serde_json::from_value(serde_json::json!({
            "id": id,
            "status": status,
            "payment": payment,
        }))
        .unwrap()
    }

    fn empty_seen() -> SeenSet {
        let dir = tempfile::tempdir().unwrap();
        SeenSet::load(dir.path().join("seen.json"))
    }

    #[test]
    fn pending_pix_is_not_new() {
        assert_eq!(classify(&order(1, "pending", Some("pix"))), None);
    }

    #[test]
    fn processing_is_new_regardless_of_method() {
        for method in [Some("pix"), Some("dinheiro"), Some("cartao"), None] {
            assert_eq!(
                classify(&order(1, "processing", method)),
                Some(DetectReason::PaymentConfirmed)
            );
        }
    }

    #[test]
    fn pending_cash_and_card_are_new() {
        assert_eq!(
            classify(&order(1, "pending", Some("dinheiro"))),
            Some(DetectReason::Cash)
        );
        assert_eq!(
            classify(&order(2, "pending", Some("cartao"))),
            Some(DetectReason::CardOnDelivery)
        );
    }

    #[test]
    fn pending_without_payment_is_not_new() {
        assert_eq!(classify(&order(1, "pending", None)), None);
    }

    #[test]
    fn later_statuses_are_never_new() {
        for status in ["preparing", "delivering", "completed", "cancelled"] {
            assert_eq!(classify(&order(1, status, Some("dinheiro"))), None);
        }
    }

    #[test]
    fn seen_orders_are_filtered_out() {
        let orders = vec![
            order(1, "processing", Some("pix")),
            order(2, "pending", Some("dinheiro")),
            order(3, "pending", Some("pix")),
        ];

        let mut seen = empty_seen();
        seen.add(1);

        let detected = detect_new(&orders, &seen);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].0.id, 2);
        assert_eq!(detected[0].1, DetectReason::Cash);
    }
}
