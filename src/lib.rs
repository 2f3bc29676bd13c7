//! # Dashboard-RS
//!
//! REST backend for an analytics dashboard over orders, customers, revenue
//! and configurable UI labels.
//!
//! ## Features
//!
//! - **Reporting Pipeline**: filter, group, qualify, sort and paginate orders
//! - **Customer Views**: qualified customers, lifetime-value tiers, acquisition cohorts
//! - **Revenue Metrics**: completed revenue by month and region, month-over-month growth
//! - **Pluggable Storage**: in-memory store, or MongoDB behind the `mongodb_backend` feature
//! - **Label CRUD**: key/value UI labels with their usages
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let orders = InMemoryOrderStore::with_orders(vec![
//!     Order::new("ORD-1", "Alice", Utc::now(), "100".parse()?, OrderStatus::Completed, Region::Europe),
//! ]);
//!
//! ServerBuilder::new()
//!     .with_order_store(orders)
//!     .with_label_store(InMemoryLabelStore::with_labels(default_labels()))
//!     .serve("0.0.0.0:4000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod labels;
pub mod reports;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CustomerAggregate, DashboardError, DashboardResult, ListParams, Order, OrderFilter,
        OrderStatus, OrderStore, PageRequest, PaginatedResponse, Pipeline, Region, ReportQuery,
        SortDirection, StorageError,
    };

    // === Labels ===
    pub use crate::labels::{Label, LabelStore, Usage, default_labels};

    // === Reports ===
    pub use crate::reports::{
        customer_acquisition, customer_summary, dashboard_summary, list_customers, list_orders,
        ltv_distribution, monthly_revenue, revenue_by_region,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryLabelStore, InMemoryOrderStore};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::{MongoLabelStore, MongoOrderStore};

    // === Config ===
    pub use crate::config::{DashboardConfig, ServerConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
}
