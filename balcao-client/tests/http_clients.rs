//! HTTP client integration tests against in-process axum mocks

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use balcao_client::{ClientError, OrderSource, OrdersApi, PrintHelperClient};
use serde::Deserialize;
use shared::{HelperHealth, OpResult, Order, OrderStatus, Paginated, PrintDocument, PrinterSettings};

/// Bind a mock service on an ephemeral port and return its base URL
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Grab a local port nothing is listening on
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: String,
    page: u32,
    per_page: u32,
}

fn sample_order(id: i64, status: &str) -> Order {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "order_number": format!("A-{id:04}"),
        "status": status,
        "payment": {"method": "dinheiro"},
        "total": 25.0
    }))
    .unwrap()
}

#[tokio::test]
async fn fetch_by_status_sends_query_and_parses_page() {
    let app = Router::new().route(
        "/orders",
        get(|Query(q): Query<ListQuery>| async move {
            assert_eq!(q.page, 1);
            assert_eq!(q.per_page, 50);
            Json(Paginated {
                items: vec![sample_order(7, &q.status)],
                page: 1,
                per_page: 50,
                total: 1,
            })
        }),
    );
    let api = OrdersApi::new(&serve(app).await);

    let page = api
        .fetch_by_status(OrderStatus::Pending, 1, 50)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, 7);
    assert_eq!(page.items[0].status, OrderStatus::Pending);
}

#[tokio::test]
async fn backend_rejection_extracts_message_from_body() {
    let app = Router::new().route(
        "/orders",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"message": "database exploded"})),
            )
        }),
    );
    let api = OrdersApi::new(&serve(app).await);

    let err = api
        .fetch_by_status(OrderStatus::Pending, 1, 50)
        .await
        .unwrap_err();
    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database exploded");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn backend_print_fallback_returns_op_result() {
    let app = Router::new().route(
        "/orders/{id}/print",
        post(|Path(id): Path<i64>| async move {
            Json(OpResult::ok(format!("order {id} queued")))
        }),
    );
    let api = OrdersApi::new(&serve(app).await);

    let result = api.print_order(42).await.unwrap();
    assert!(result.success);
    assert_eq!(result.message, "order 42 queued");
}

#[tokio::test]
async fn helper_print_round_trip() {
    let app = Router::new().route(
        "/print",
        post(|Json(doc): Json<serde_json::Value>| async move {
            // Money fields must arrive as strings
            assert_eq!(doc["total"], serde_json::json!("25.00"));
            Json(OpResult::ok("printed"))
        }),
    );
    let helper = PrintHelperClient::new(&serve(app).await);

    let doc = PrintDocument::from_order(&sample_order(3, "processing"));
    let result = helper.print(&doc).await.unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn helper_health_parses_status_and_timestamp() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            Json(serde_json::json!({
                "status": "ok",
                "timestamp": "2026-08-28T12:00:00Z"
            }))
        }),
    );
    let helper = PrintHelperClient::new(&serve(app).await);

    let health: HelperHealth = helper.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.timestamp.is_some());
}

#[tokio::test]
async fn connection_refused_classifies_as_unreachable() {
    let helper = PrintHelperClient::new(&dead_url().await);

    let doc = PrintDocument::from_order(&sample_order(1, "pending"));
    let err = helper.print(&doc).await.unwrap_err();
    assert!(err.is_unreachable(), "got {err:?}");

    let err = helper.health().await.unwrap_err();
    assert!(err.is_unreachable(), "got {err:?}");
}

#[tokio::test]
async fn gateway_falls_back_to_backend_when_helper_is_down() {
    use balcao_client::{HelperWithFallback, PrintGateway};
    use std::sync::Arc;

    let backend_app = Router::new().route(
        "/orders/{id}/print",
        post(|Path(id): Path<i64>| async move {
            Json(OpResult::ok(format!("backend printed {id}")))
        }),
    );
    let backend = Arc::new(OrdersApi::new(&serve(backend_app).await));
    let helper = PrintHelperClient::new(&dead_url().await);

    let gateway = HelperWithFallback::new(helper, backend, PrinterSettings::default());
    let outcome = gateway.print(&sample_order(9, "processing")).await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "backend printed 9");
}

#[tokio::test]
async fn gateway_forwards_printer_preference_to_helper() {
    use balcao_client::{HelperWithFallback, PrintGateway};
    use std::sync::Arc;

    let helper_app = Router::new().route(
        "/print",
        post(|Json(doc): Json<serde_json::Value>| async move {
            assert_eq!(doc["use_default_printer"], serde_json::json!(false));
            Json(OpResult::ok("printed"))
        }),
    );
    let helper = PrintHelperClient::new(&serve(helper_app).await);
    let backend = Arc::new(OrdersApi::new(&dead_url().await));

    let settings = PrinterSettings {
        use_default_printer: false,
        auto_print: true,
    };
    let gateway = HelperWithFallback::new(helper, backend, settings);
    let outcome = gateway.print(&sample_order(4, "processing")).await;
    assert!(outcome.success, "got {}", outcome.message);
}

#[tokio::test]
async fn helper_http_error_is_rejected_not_unreachable() {
    let app = Router::new().route(
        "/print",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"message": "no paper"})),
            )
        }),
    );
    let helper = PrintHelperClient::new(&serve(app).await);

    let doc = PrintDocument::from_order(&sample_order(1, "pending"));
    let err = helper.print(&doc).await.unwrap_err();
    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "no paper");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}
