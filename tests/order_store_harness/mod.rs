//! Shared test harness for order store backends
//!
//! Provides a fixed fixture of orders, the [`LoadOrders`] hook each backend
//! implements to receive them, and the `order_store_tests!` conformance suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod order_store_harness;
//! use order_store_harness::*;
//!
//! order_store_tests!(InMemoryOrderStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod order_store_tests;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use dashboard::core::{Order, OrderStatus, OrderStore, Region};
use rust_decimal::Decimal;

/// Backends under test accept fixture orders through this hook
#[async_trait]
pub trait LoadOrders: OrderStore {
    async fn load(&self, orders: Vec<Order>);
}

pub fn money(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
}

/// Six orders over four customers, January to March 2024
///
/// - Alice Johnson and Bob Smith have completed orders (qualified)
/// - Carol White only has a cancelled order, Dan Brown only a pending one
pub fn fixture_orders() -> Vec<Order> {
    vec![
        Order::new(
            "ORD-1001",
            "Alice Johnson",
            utc(2024, 1, 15),
            money("120.75"),
            OrderStatus::Completed,
            Region::Europe,
        ),
        Order::new(
            "ORD-1002",
            "Alice Johnson",
            utc(2024, 2, 3),
            money("80"),
            OrderStatus::Pending,
            Region::Asia,
        ),
        Order::new(
            "ORD-1003",
            "Bob Smith",
            utc(2024, 1, 20),
            money("300"),
            OrderStatus::Completed,
            Region::NorthAmerica,
        ),
        Order::new(
            "ORD-1004",
            "Carol White",
            utc(2024, 3, 5),
            money("45.5"),
            OrderStatus::Cancelled,
            Region::MiddleEast,
        ),
        Order::new(
            "ORD-1005",
            "Bob Smith",
            utc(2024, 3, 18),
            money("1000"),
            OrderStatus::Completed,
            Region::NorthAmerica,
        ),
        Order::new(
            "ORD-1006",
            "Dan Brown",
            utc(2024, 2, 28),
            money("60"),
            OrderStatus::Pending,
            Region::Europe,
        ),
    ]
}

/// Order ids, sorted, for order-insensitive comparisons
pub fn sorted_ids(orders: &[Order]) -> Vec<String> {
    let mut ids: Vec<String> = orders.iter().map(|o| o.order_id.clone()).collect();
    ids.sort();
    ids
}
