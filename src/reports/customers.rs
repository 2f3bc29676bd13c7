//! Customer views: listing, summary, acquisition and lifetime value

use crate::core::aggregate::{self, CustomerAggregate, CustomerSortKey};
use crate::core::metrics::{self, CohortPoint, MonthWindows, TierCount};
use crate::core::{DashboardResult, ListParams, OrderFilter, OrderStore, PaginatedResponse, Region};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Default sort field for `/customers`
pub const DEFAULT_SORT_KEY: &str = "spend";

/// One row of the customer listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRow {
    pub customer_id: String,
    pub name: String,
    pub orders: usize,
    pub spend: Decimal,
    pub region: Option<Region>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl From<CustomerAggregate> for CustomerRow {
    fn from(customer: CustomerAggregate) -> Self {
        Self {
            customer_id: customer.customer_id(),
            name: customer.display_name,
            orders: customer.order_count,
            spend: customer.total_spend,
            region: customer.region,
            joined_at: customer.first_order_date,
        }
    }
}

/// Headline numbers for the customers page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Qualified customers
    pub total_customers: usize,
    /// Completed spend across qualified customers
    pub total_spend: Decimal,
    pub avg_spend_per_customer: Decimal,
    /// Qualified customers whose first completed order is in the current month
    pub new_customers_this_month: usize,
    /// Month-over-month growth of new qualified customers, in percent
    pub growth: Decimal,
}

/// One page of qualified customers
///
/// Search, region and month narrow the orders before grouping; the status
/// parameter does not apply to this view. Search uses the same matcher as
/// `/orders`, so text that appears in an order id also selects that order's
/// customer. `total` counts the qualified
/// customers before pagination.
pub async fn list_customers(
    store: &dyn OrderStore,
    params: ListParams,
) -> DashboardResult<PaginatedResponse<CustomerRow>> {
    tracing::debug!(
        page = params.page.page,
        page_size = params.page.page_size,
        sort_key = %params.sort.key,
        "listing customers"
    );

    let orders = store.find(&params.filter.clone().without_status()).await?;
    let qualified = aggregate::qualified_customers(orders);
    let total = qualified.len();

    let data = qualified
        .sort_by(params.sort.resolve::<CustomerSortKey>(), params.sort.direction)
        .paginate(params.page)
        .into_iter()
        .map(CustomerRow::from)
        .collect();

    Ok(PaginatedResponse::new(data, total, params.page))
}

/// Summary statistics over qualified customers
pub async fn customer_summary(
    store: &dyn OrderStore,
    now: DateTime<Utc>,
) -> DashboardResult<CustomerSummary> {
    let orders = store.find(&OrderFilter::all()).await?;
    let qualified = aggregate::qualified_customers(orders).into_vec();

    let total_customers = qualified.len();
    let total_spend: Decimal = qualified.iter().map(|c| c.completed_spend).sum();

    let windows = MonthWindows::at(now);
    let conversions: Vec<DateTime<Utc>> = qualified
        .iter()
        .filter_map(|c| c.first_completed_order_date)
        .collect();
    let new_this_month = conversions
        .iter()
        .filter(|date| windows.in_this_month(**date))
        .count();
    let new_last_month = conversions
        .iter()
        .filter(|date| windows.in_last_month(**date))
        .count();

    tracing::debug!(
        total_customers,
        new_this_month,
        new_last_month,
        "computed customer summary"
    );

    Ok(CustomerSummary {
        total_customers,
        total_spend,
        avg_spend_per_customer: metrics::average(total_spend, total_customers),
        new_customers_this_month: new_this_month,
        growth: metrics::growth_percent(
            Decimal::from(new_this_month),
            Decimal::from(new_last_month),
        ),
    })
}

/// New customers per calendar month of their first order
///
/// Every customer counts here, qualified or not.
pub async fn customer_acquisition(store: &dyn OrderStore) -> DashboardResult<Vec<CohortPoint>> {
    let orders = store.find(&OrderFilter::all()).await?;

    Ok(metrics::acquisition_cohorts(aggregate::customers(orders)))
}

/// Customers per lifetime-spend tier
///
/// Uses every customer's spend over all orders.
pub async fn ltv_distribution(store: &dyn OrderStore) -> DashboardResult<Vec<TierCount>> {
    let orders = store.find(&OrderFilter::all()).await?;

    Ok(metrics::ltv_distribution(
        aggregate::customers(orders)
            .into_iter()
            .map(|customer| customer.total_spend),
    ))
}
