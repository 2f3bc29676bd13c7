//! HTTP handlers for reports and labels
//!
//! Handlers only translate between HTTP and the report operations: query
//! strings become [`ReportQuery`], results become JSON.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::{
    CohortPoint, DashboardResult, LabelError, Order, OrderStore, PaginatedResponse, ReportQuery,
    RequestError, TierCount,
};
use crate::labels::{Label, LabelStore, UpdateLabelRequest};
use crate::reports::{
    self, CustomerRow, CustomerSummary, DashboardSummary, RegionRevenue, RevenuePoint,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderStore>,
    pub labels: Arc<dyn LabelStore>,
}

/// Liveness text
pub async fn root() -> &'static str {
    "Backend is running"
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dashboard-rs"
    }))
}

// =============================================================================
// Orders and customers
// =============================================================================

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> DashboardResult<Json<PaginatedResponse<Order>>> {
    let params = query.into_params(reports::orders::DEFAULT_SORT_KEY);
    let response = reports::list_orders(state.orders.as_ref(), params).await?;
    Ok(Json(response))
}

pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> DashboardResult<Json<PaginatedResponse<CustomerRow>>> {
    let params = query.into_params(reports::customers::DEFAULT_SORT_KEY);
    let response = reports::list_customers(state.orders.as_ref(), params).await?;
    Ok(Json(response))
}

pub async fn customer_summary(
    State(state): State<AppState>,
) -> DashboardResult<Json<CustomerSummary>> {
    let summary = reports::customer_summary(state.orders.as_ref(), Utc::now()).await?;
    Ok(Json(summary))
}

pub async fn customer_acquisition(
    State(state): State<AppState>,
) -> DashboardResult<Json<Vec<CohortPoint>>> {
    let cohorts = reports::customer_acquisition(state.orders.as_ref()).await?;
    Ok(Json(cohorts))
}

pub async fn ltv_distribution(
    State(state): State<AppState>,
) -> DashboardResult<Json<Vec<TierCount>>> {
    let tiers = reports::ltv_distribution(state.orders.as_ref()).await?;
    Ok(Json(tiers))
}

// =============================================================================
// Dashboard
// =============================================================================

pub async fn monthly_revenue(
    State(state): State<AppState>,
) -> DashboardResult<Json<Vec<RevenuePoint>>> {
    let points = reports::monthly_revenue(state.orders.as_ref()).await?;
    Ok(Json(points))
}

pub async fn revenue_by_region(
    State(state): State<AppState>,
) -> DashboardResult<Json<Vec<RegionRevenue>>> {
    let regions = reports::revenue_by_region(state.orders.as_ref()).await?;
    Ok(Json(regions))
}

pub async fn dashboard_summary(
    State(state): State<AppState>,
) -> DashboardResult<Json<DashboardSummary>> {
    let summary = reports::dashboard_summary(state.orders.as_ref(), Utc::now()).await?;
    Ok(Json(summary))
}

// =============================================================================
// Labels
// =============================================================================

pub async fn list_labels(State(state): State<AppState>) -> DashboardResult<Json<Vec<Label>>> {
    Ok(Json(state.labels.list().await?))
}

pub async fn get_label(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> DashboardResult<Json<Label>> {
    let label = state
        .labels
        .get(&key)
        .await?
        .ok_or_else(|| LabelError::NotFound { key: key.clone() })?;

    Ok(Json(label))
}

/// Replace a label's value
///
/// A body that is not `{"value": "..."}` is rejected with 400.
pub async fn update_label(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<UpdateLabelRequest>, JsonRejection>,
) -> DashboardResult<Json<Label>> {
    let Json(request) = body.map_err(|rejection| RequestError::InvalidBody {
        message: rejection.body_text(),
    })?;

    tracing::debug!(key = %key, "updating label");

    let label = state
        .labels
        .update(&key, &request.value)
        .await?
        .ok_or_else(|| LabelError::NotFound { key: key.clone() })?;

    Ok(Json(label))
}
