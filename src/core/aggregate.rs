//! Per-group reducers over order records
//!
//! Customer views group by customer name, time series by calendar month and
//! regional breakdowns by region. Revenue groupings only ever see completed
//! orders: the completed-status filter runs before grouping.

use super::order::{Order, Region};
use super::pipeline::{Accumulator, Group, Pipeline, SortableBy, Tally};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

/// Everything a customer view needs to know about one customer
///
/// Computed fresh per request, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerAggregate {
    pub customer_key: String,
    pub display_name: String,
    /// Region of the first order seen for this customer
    pub region: Option<Region>,
    pub order_count: usize,
    /// Sum over all orders, whatever their status
    pub total_spend: Decimal,
    pub completed_order_count: usize,
    /// Sum over completed orders only
    pub completed_spend: Decimal,
    pub first_order_date: Option<DateTime<Utc>>,
    pub first_completed_order_date: Option<DateTime<Utc>>,
}

impl CustomerAggregate {
    /// A customer is listed only once they have completed an order
    pub fn is_qualified(&self) -> bool {
        self.completed_order_count > 0
    }

    /// Public identifier: `CUST-` followed by the name, whitespace removed, uppercased
    pub fn customer_id(&self) -> String {
        let compact: String = self
            .customer_key
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("CUST-{}", compact.to_uppercase())
    }
}

impl Accumulator<Order> for CustomerAggregate {
    fn accumulate(&mut self, order: &Order) {
        if self.order_count == 0 {
            self.display_name = order.customer.clone();
            self.region = Some(order.region);
        }

        self.order_count += 1;
        self.total_spend += order.amount;
        self.first_order_date = earliest(self.first_order_date, order.date);

        if order.is_completed() {
            self.completed_order_count += 1;
            self.completed_spend += order.amount;
            self.first_completed_order_date =
                earliest(self.first_completed_order_date, order.date);
        }
    }
}

fn earliest(current: Option<DateTime<Utc>>, candidate: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Some(current.map_or(candidate, |c| c.min(candidate)))
}

/// Sortable fields of a customer row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSortKey {
    Name,
    Region,
    Orders,
    Spend,
    CompletedOrders,
    CompletedSpend,
    JoinedAt,
}

impl FromStr for CustomerSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(CustomerSortKey::Name),
            "region" => Ok(CustomerSortKey::Region),
            "orders" => Ok(CustomerSortKey::Orders),
            "spend" => Ok(CustomerSortKey::Spend),
            "completedOrders" => Ok(CustomerSortKey::CompletedOrders),
            "completedSpend" => Ok(CustomerSortKey::CompletedSpend),
            "joinedAt" => Ok(CustomerSortKey::JoinedAt),
            other => Err(format!("unknown customer sort key '{}'", other)),
        }
    }
}

impl SortableBy<CustomerSortKey> for CustomerAggregate {
    fn compare_by(&self, other: &Self, key: CustomerSortKey) -> Ordering {
        match key {
            CustomerSortKey::Name => self.display_name.cmp(&other.display_name),
            CustomerSortKey::Region => self
                .region
                .map(Region::as_str)
                .cmp(&other.region.map(Region::as_str)),
            CustomerSortKey::Orders => self.order_count.cmp(&other.order_count),
            CustomerSortKey::Spend => self.total_spend.cmp(&other.total_spend),
            CustomerSortKey::CompletedOrders => {
                self.completed_order_count.cmp(&other.completed_order_count)
            }
            CustomerSortKey::CompletedSpend => self.completed_spend.cmp(&other.completed_spend),
            CustomerSortKey::JoinedAt => self.first_order_date.cmp(&other.first_order_date),
        }
    }
}

impl Accumulator<Order> for Tally<Decimal> {
    fn accumulate(&mut self, order: &Order) {
        self.count += 1;
        self.total += order.amount;
    }
}

/// Group orders by customer, every customer included
pub fn customers(orders: Vec<Order>) -> Pipeline<CustomerAggregate> {
    Pipeline::new(orders)
        .group_by(|order: &Order| order.customer.clone())
        .map(|Group { key, mut value }: Group<String, CustomerAggregate>| {
            value.customer_key = key;
            value
        })
}

/// Group orders by customer and keep qualified customers only
pub fn qualified_customers(orders: Vec<Order>) -> Pipeline<CustomerAggregate> {
    customers(orders).having(CustomerAggregate::is_qualified)
}

/// Completed revenue per calendar month, January first
///
/// Months with no completed order are absent.
pub fn completed_revenue_by_month(orders: Vec<Order>) -> Vec<Group<u32, Tally<Decimal>>> {
    Pipeline::new(orders)
        .filter(Order::is_completed)
        .group_by::<_, Tally<Decimal>, _>(Order::month)
        .sort_with(|a, b| a.key.cmp(&b.key))
        .into_vec()
}

/// Completed revenue per region, highest revenue first
pub fn completed_revenue_by_region(orders: Vec<Order>) -> Vec<Group<Region, Tally<Decimal>>> {
    Pipeline::new(orders)
        .filter(Order::is_completed)
        .group_by::<_, Tally<Decimal>, _>(|order: &Order| order.region)
        .sort_with(|a, b| b.value.total.cmp(&a.value.total))
        .into_vec()
}

/// Count and total of completed orders
pub fn completed_totals(orders: &[Order]) -> Tally<Decimal> {
    let mut tally = Tally::default();
    orders
        .iter()
        .filter(|order| order.is_completed())
        .for_each(|order| tally.accumulate(order));
    tally
}
