//! Report operations behind the HTTP endpoints
//!
//! Each operation is a plain async function over a [`crate::core::OrderStore`],
//! so reports can be computed without going through HTTP.

pub mod customers;
pub mod dashboard;
pub mod orders;

pub use customers::{
    CustomerRow, CustomerSummary, customer_acquisition, customer_summary, list_customers,
    ltv_distribution,
};
pub use dashboard::{
    DashboardSummary, RegionRevenue, RevenuePoint, dashboard_summary, monthly_revenue,
    revenue_by_region,
};
pub use orders::{OrderSortKey, list_orders};
