//! Macro-generated test suite for the `OrderStore` contract.
//!
//! The `order_store_tests!` macro generates a test module that validates any
//! `OrderStore` implementation: filter evaluation (search, region, month,
//! status, date range), count/find agreement, record round-trips, and the
//! report operations computed on top of the store.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod order_store_harness;
//!
//! use order_store_harness::*;
//! use dashboard::storage::InMemoryOrderStore;
//!
//! order_store_tests!(InMemoryOrderStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Filters
//! - `test_find_all`: empty filter returns every order
//! - `test_completed_filter`: status code 1 only
//! - `test_search_customer_case_insensitive`: "alice" matches "Alice Johnson"
//! - `test_search_order_id`: order ids are searchable
//! - `test_numeric_search_matches_amount`: "0.75" matches 120.75
//! - `test_search_is_literal`: regex metacharacters match literally
//! - `test_region_filter`, `test_month_filter`, `test_date_range_filter`
//! - `test_unknown_region_matches_nothing`: a region outside the set restricts to nothing
//! - `test_out_of_range_status_matches_nothing`
//! - `test_combined_filters`
//!
//! ## Counting and records
//! - `test_count_agrees_with_find`
//! - `test_record_round_trip`
//! - `test_empty_store`
//!
//! ## Reports
//! - `test_customer_summary_report`
//! - `test_revenue_reports`
//! - `test_customer_listing_report`

/// Generate a full `OrderStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty store
/// implementing `LoadOrders`. It is re-evaluated for each test.
#[macro_export]
macro_rules! order_store_tests {
    ($factory:expr) => {
        mod order_store_contract_tests {
            use super::*;
            use dashboard::core::{
                OrderFilter, OrderStatus, OrderStore, Region, ReportQuery, SearchFilter,
            };
            use dashboard::reports;

            async fn seeded() -> impl LoadOrders {
                let store = $factory;
                store.load(fixture_orders()).await;
                store
            }

            fn search(text: &str) -> OrderFilter {
                OrderFilter {
                    search: SearchFilter::parse(text),
                    ..OrderFilter::default()
                }
            }

            async fn ids_for(store: &impl LoadOrders, filter: OrderFilter) -> Vec<String> {
                sorted_ids(&store.find(&filter).await.expect("find should succeed"))
            }

            // ==================================================================
            // Filters
            // ==================================================================

            #[tokio::test]
            async fn test_find_all() {
                let store = seeded().await;
                assert_eq!(
                    ids_for(&store, OrderFilter::all()).await,
                    vec!["ORD-1001", "ORD-1002", "ORD-1003", "ORD-1004", "ORD-1005", "ORD-1006"]
                );
            }

            #[tokio::test]
            async fn test_completed_filter() {
                let store = seeded().await;
                assert_eq!(
                    ids_for(&store, OrderFilter::completed()).await,
                    vec!["ORD-1001", "ORD-1003", "ORD-1005"]
                );
            }

            #[tokio::test]
            async fn test_search_customer_case_insensitive() {
                let store = seeded().await;
                assert_eq!(
                    ids_for(&store, search("alice")).await,
                    vec!["ORD-1001", "ORD-1002"]
                );
            }

            #[tokio::test]
            async fn test_search_order_id() {
                let store = seeded().await;
                assert_eq!(ids_for(&store, search("ord-1004")).await, vec!["ORD-1004"]);
                // Numeric text still searches ids
                assert_eq!(ids_for(&store, search("1006")).await, vec!["ORD-1006"]);
            }

            #[tokio::test]
            async fn test_numeric_search_matches_amount() {
                let store = seeded().await;
                assert_eq!(ids_for(&store, search("0.75")).await, vec!["ORD-1001"]);
                assert_eq!(ids_for(&store, search("45.5")).await, vec!["ORD-1004"]);
            }

            #[tokio::test]
            async fn test_search_region_text() {
                let store = seeded().await;
                assert_eq!(
                    ids_for(&store, search("north")).await,
                    vec!["ORD-1003", "ORD-1005"]
                );
            }

            #[tokio::test]
            async fn test_search_is_literal() {
                let store = seeded().await;
                assert!(ids_for(&store, search("a.c")).await.is_empty());
                assert!(ids_for(&store, search("(")).await.is_empty());
                assert!(ids_for(&store, search("Bob.*")).await.is_empty());
            }

            #[tokio::test]
            async fn test_region_filter() {
                let store = seeded().await;
                let filter = OrderFilter::all().in_region(Region::Europe);
                assert_eq!(ids_for(&store, filter).await, vec!["ORD-1001", "ORD-1006"]);
            }

            #[tokio::test]
            async fn test_unknown_region_matches_nothing() {
                let store = seeded().await;
                for raw in ["Atlantis", "europe"] {
                    let params = ReportQuery {
                        region: Some(raw.to_string()),
                        ..ReportQuery::default()
                    };

                    let filter = params.clone().into_params("amount").filter;
                    assert!(ids_for(&store, filter.clone()).await.is_empty(), "{}", raw);
                    assert_eq!(store.count(&filter).await.unwrap(), 0);

                    let orders = reports::list_orders(&store, params.clone().into_params("amount"))
                        .await
                        .unwrap();
                    assert_eq!(orders.total, 0);

                    let customers = reports::list_customers(&store, params.into_params("spend"))
                        .await
                        .unwrap();
                    assert_eq!(customers.total, 0);
                }
            }

            #[tokio::test]
            async fn test_month_filter() {
                let store = seeded().await;
                let filter = OrderFilter {
                    month: Some(3),
                    ..OrderFilter::default()
                };
                assert_eq!(ids_for(&store, filter).await, vec!["ORD-1004", "ORD-1005"]);
            }

            #[tokio::test]
            async fn test_date_range_filter() {
                let store = seeded().await;
                let filter = OrderFilter::all()
                    .since(utc(2024, 2, 1))
                    .before(utc(2024, 3, 1));
                assert_eq!(ids_for(&store, filter).await, vec!["ORD-1002", "ORD-1006"]);
            }

            #[tokio::test]
            async fn test_out_of_range_status_matches_nothing() {
                let store = seeded().await;
                let filter = OrderFilter {
                    status: Some(7),
                    ..OrderFilter::default()
                };
                assert!(ids_for(&store, filter).await.is_empty());
            }

            #[tokio::test]
            async fn test_combined_filters() {
                let store = seeded().await;
                let filter = OrderFilter {
                    month: Some(3),
                    ..OrderFilter::completed()
                }
                .in_region(Region::NorthAmerica);
                assert_eq!(ids_for(&store, filter).await, vec!["ORD-1005"]);
            }

            // ==================================================================
            // Counting and records
            // ==================================================================

            #[tokio::test]
            async fn test_count_agrees_with_find() {
                let store = seeded().await;
                let filters = vec![
                    OrderFilter::all(),
                    OrderFilter::completed(),
                    OrderFilter::all().with_status(OrderStatus::Pending),
                    search("smith"),
                    OrderFilter {
                        month: Some(1),
                        ..OrderFilter::default()
                    },
                ];

                for filter in filters {
                    let found = store.find(&filter).await.unwrap().len();
                    let counted = store.count(&filter).await.unwrap();
                    assert_eq!(found, counted, "count and find disagree for {:?}", filter);
                }
            }

            #[tokio::test]
            async fn test_record_round_trip() {
                let store = seeded().await;
                let found = store.find(&search("ORD-1001")).await.unwrap();
                assert_eq!(found.len(), 1);
                assert_eq!(found[0], fixture_orders()[0]);
            }

            #[tokio::test]
            async fn test_empty_store() {
                let store = $factory;
                assert_eq!(store.count(&OrderFilter::all()).await.unwrap(), 0);
                assert!(store.find(&OrderFilter::completed()).await.unwrap().is_empty());
            }

            // ==================================================================
            // Reports on top of the store
            // ==================================================================

            #[tokio::test]
            async fn test_customer_summary_report() {
                let store = seeded().await;
                let summary = reports::customer_summary(&store, utc(2024, 3, 20))
                    .await
                    .unwrap();

                assert_eq!(summary.total_customers, 2);
                assert_eq!(summary.total_spend, money("1420.75"));
                assert_eq!(summary.avg_spend_per_customer, money("710.375"));
                assert_eq!(summary.new_customers_this_month, 0);
                assert_eq!(summary.growth, money("0"));
            }

            #[tokio::test]
            async fn test_revenue_reports() {
                let store = seeded().await;

                let months = reports::monthly_revenue(&store).await.unwrap();
                let labels: Vec<_> = months.iter().map(|p| p.label).collect();
                assert_eq!(labels, vec!["Jan", "Mar"]);
                assert_eq!(months[0].value, money("420.75"));
                assert_eq!(months[1].value, money("1000"));

                let regions = reports::revenue_by_region(&store).await.unwrap();
                assert_eq!(regions.len(), 2);
                assert_eq!(regions[0].region, Region::NorthAmerica);
                assert_eq!(regions[0].revenue, money("1300"));
                assert_eq!(regions[1].region, Region::Europe);

                let summary = reports::dashboard_summary(&store, utc(2024, 3, 20))
                    .await
                    .unwrap();
                assert_eq!(summary.revenue, money("1420.75"));
                assert_eq!(summary.orders, 6);
                assert_eq!(summary.growth, money("0"));
            }

            #[tokio::test]
            async fn test_customer_listing_report() {
                let store = seeded().await;
                let params = ReportQuery::default().into_params("spend");
                let page = reports::list_customers(&store, params).await.unwrap();

                assert_eq!(page.total, 2);
                let ids: Vec<_> = page.data.iter().map(|c| c.customer_id.as_str()).collect();
                assert_eq!(ids, vec!["CUST-BOBSMITH", "CUST-ALICEJOHNSON"]);
                assert_eq!(page.data[0].spend, money("1300"));
                assert_eq!(page.data[1].orders, 2);
            }
        }
    };
}
