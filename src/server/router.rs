//! Route tables for the dashboard API

use super::handlers::{
    AppState, customer_acquisition, customer_summary, dashboard_summary, get_label, health_check,
    list_customers, list_labels, list_orders, ltv_distribution, monthly_revenue,
    revenue_by_region, root, update_label,
};
use axum::{Router, routing::get};

/// Liveness and health check routes
///
/// - GET / - plain-text liveness
/// - GET /health, GET /healthz - JSON health status
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Report routes
///
/// - GET /orders - paginated orders
/// - GET /customers - paginated qualified customers
/// - GET /customers/summary, /customers/acquisition, /customers/ltv-distribution
/// - GET /dashboard/revenue, /dashboard/revenue-by-region, /dashboard/summary
pub fn build_report_routes(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/customers", get(list_customers))
        .route("/customers/summary", get(customer_summary))
        .route("/customers/acquisition", get(customer_acquisition))
        .route("/customers/ltv-distribution", get(ltv_distribution))
        .route("/dashboard/revenue", get(monthly_revenue))
        .route("/dashboard/revenue-by-region", get(revenue_by_region))
        .route("/dashboard/summary", get(dashboard_summary))
        .with_state(state)
}

/// Label routes
///
/// - GET /labels - all labels
/// - GET /labels/{key} - one label
/// - PUT /labels/{key} - replace a label's value
pub fn build_label_routes(state: AppState) -> Router {
    Router::new()
        .route("/labels", get(list_labels))
        .route("/labels/{key}", get(get_label).put(update_label))
        .with_state(state)
}
