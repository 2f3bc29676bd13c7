//! Dashboard charts and headline revenue figures
//!
//! Every figure here is completed revenue: non-completed orders are
//! filtered out before anything is summed.

use crate::core::aggregate;
use crate::core::metrics::{self, MonthWindows};
use crate::core::order::month_label;
use crate::core::{DashboardResult, OrderFilter, OrderStore, Region};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One point of the monthly revenue chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub label: &'static str,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRevenue {
    pub region: Region,
    pub revenue: Decimal,
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Completed revenue
    pub revenue: Decimal,
    /// Orders of any status
    pub orders: usize,
    /// Completed revenue per completed order
    pub avg_order: Decimal,
    /// Month-over-month growth of completed revenue, in percent
    pub growth: Decimal,
}

/// Completed revenue per calendar month, January first
pub async fn monthly_revenue(store: &dyn OrderStore) -> DashboardResult<Vec<RevenuePoint>> {
    let orders = store.find(&OrderFilter::completed()).await?;

    Ok(aggregate::completed_revenue_by_month(orders)
        .into_iter()
        .map(|group| RevenuePoint {
            label: month_label(group.key),
            value: group.value.total,
        })
        .collect())
}

/// Completed revenue per region, highest first
pub async fn revenue_by_region(store: &dyn OrderStore) -> DashboardResult<Vec<RegionRevenue>> {
    let orders = store.find(&OrderFilter::completed()).await?;

    Ok(aggregate::completed_revenue_by_region(orders)
        .into_iter()
        .map(|group| RegionRevenue {
            region: group.key,
            revenue: group.value.total,
        })
        .collect())
}

/// Revenue, order count, average order and revenue growth
///
/// The four store reads are independent and run concurrently.
pub async fn dashboard_summary(
    store: &dyn OrderStore,
    now: DateTime<Utc>,
) -> DashboardResult<DashboardSummary> {
    let windows = MonthWindows::at(now);
    let completed_only = OrderFilter::completed();
    let all = OrderFilter::all();
    let this_month = OrderFilter::completed().since(windows.this_month_start);
    let last_month = OrderFilter::completed()
        .since(windows.last_month_start)
        .before(windows.this_month_start);

    let (completed, orders, current, previous) = tokio::try_join!(
        store.find(&completed_only),
        store.count(&all),
        store.find(&this_month),
        store.find(&last_month),
    )?;

    let totals = aggregate::completed_totals(&completed);
    let current = aggregate::completed_totals(&current).total;
    let previous = aggregate::completed_totals(&previous).total;

    tracing::debug!(
        completed = totals.count,
        orders,
        %current,
        %previous,
        "computed dashboard summary"
    );

    Ok(DashboardSummary {
        revenue: totals.total,
        orders,
        avg_order: metrics::average(totals.total, totals.count),
        growth: metrics::growth_percent(current, previous),
    })
}
