//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Store failures never leak their internal detail

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_test::TestServer;
use dashboard::core::{ConfigError, LabelError, OrderFilter, RequestError};
use dashboard::prelude::*;
use dashboard::storage::InMemoryLabelStore;
use serde_json::Value;

/// Order store whose every call fails
struct UnreachableStore;

#[async_trait]
impl OrderStore for UnreachableStore {
    async fn find(&self, _filter: &OrderFilter) -> Result<Vec<Order>, StorageError> {
        Err(StorageError::ConnectionError {
            backend: "MongoDB".to_string(),
            message: "connection refused at 10.0.0.7:27017".to_string(),
        })
    }

    async fn count(&self, _filter: &OrderFilter) -> Result<usize, StorageError> {
        Err(StorageError::query("MongoDB", "aggregate failed: $group exceeded memory"))
    }
}

fn failing_server() -> TestServer {
    let router = ServerBuilder::new()
        .with_order_store(UnreachableStore)
        .with_label_store(InMemoryLabelStore::new())
        .build()
        .unwrap();
    TestServer::try_new(router).unwrap()
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_storage_error_returns_500() {
        let err = DashboardError::Storage(StorageError::Unavailable {
            backend: "in-memory".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_label_not_found_returns_404() {
        let err = DashboardError::Label(LabelError::NotFound {
            key: "table".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_body_returns_400() {
        let err = DashboardError::Request(RequestError::InvalidBody {
            message: "expected value".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_config_error_returns_500() {
        let err = DashboardError::Config(ConfigError::MissingComponent {
            component: "OrderStore".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert_eq!(err.public_message(), "Internal server error");
    }
}

// =============================================================================
// Response Conversion Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_into_response_status() {
        let response = DashboardError::from(StorageError::IntegrityError {
            message: "field 'date' is missing".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = DashboardError::from(LabelError::NotFound {
            key: "x".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let err = DashboardError::from(RequestError::InvalidBody {
            message: "EOF while parsing".to_string(),
        });
        let json = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(json["code"], "INVALID_BODY");
        assert!(json.get("details").is_none());
    }
}

// =============================================================================
// Store failures over HTTP
// =============================================================================

mod store_failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_every_report_route_fails_generically() {
        let server = failing_server();

        for path in [
            "/orders",
            "/customers",
            "/customers/summary",
            "/customers/acquisition",
            "/customers/ltv-distribution",
            "/dashboard/revenue",
            "/dashboard/revenue-by-region",
            "/dashboard/summary",
        ] {
            let response = server.get(path).expect_failure().await;
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

            let body: Value = response.json();
            assert_eq!(body["message"], "Internal server error", "route {}", path);
            assert_eq!(body["code"], "STORAGE_ERROR");

            let text = response.text();
            assert!(!text.contains("10.0.0.7"), "route {} leaked detail", path);
            assert!(!text.contains("$group"), "route {} leaked detail", path);
        }
    }

    #[tokio::test]
    async fn test_health_survives_store_failure() {
        let server = failing_server();
        server.get("/health").await.assert_status_ok();
        server.get("/labels").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_report_function_propagates_storage_error() {
        let result = list_orders(&UnreachableStore, ReportQuery::default().into_params("amount")).await;
        assert!(matches!(result, Err(DashboardError::Storage(_))));
    }
}
