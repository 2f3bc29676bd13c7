//! Paginated order listing

use crate::core::{
    DashboardResult, ListParams, Order, OrderStore, PaginatedResponse, Pipeline, SortableBy,
};
use std::cmp::Ordering;
use std::str::FromStr;

/// Default sort field for `/orders`
pub const DEFAULT_SORT_KEY: &str = "amount";

/// Sortable fields of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortKey {
    OrderId,
    Customer,
    Date,
    Amount,
    Status,
    Region,
}

impl FromStr for OrderSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orderId" => Ok(OrderSortKey::OrderId),
            "customer" => Ok(OrderSortKey::Customer),
            "date" => Ok(OrderSortKey::Date),
            "amount" => Ok(OrderSortKey::Amount),
            "status" => Ok(OrderSortKey::Status),
            "region" => Ok(OrderSortKey::Region),
            other => Err(format!("unknown order sort key '{}'", other)),
        }
    }
}

impl SortableBy<OrderSortKey> for Order {
    fn compare_by(&self, other: &Self, key: OrderSortKey) -> Ordering {
        match key {
            OrderSortKey::OrderId => self.order_id.cmp(&other.order_id),
            OrderSortKey::Customer => self.customer.cmp(&other.customer),
            OrderSortKey::Date => self.date.cmp(&other.date),
            OrderSortKey::Amount => self.amount.cmp(&other.amount),
            OrderSortKey::Status => self.status.code().cmp(&other.status.code()),
            OrderSortKey::Region => self.region.as_str().cmp(other.region.as_str()),
        }
    }
}

/// One page of orders matching the request filters
///
/// The total is counted with a separate store query that runs concurrently
/// with the data query.
pub async fn list_orders(
    store: &dyn OrderStore,
    params: ListParams,
) -> DashboardResult<PaginatedResponse<Order>> {
    tracing::debug!(
        page = params.page.page,
        page_size = params.page.page_size,
        sort_key = %params.sort.key,
        "listing orders"
    );

    let (total, orders) = tokio::try_join!(store.count(&params.filter), store.find(&params.filter))?;

    let data = Pipeline::new(orders)
        .sort_by(params.sort.resolve::<OrderSortKey>(), params.sort.direction)
        .paginate(params.page);

    Ok(PaginatedResponse::new(data, total, params.page))
}
