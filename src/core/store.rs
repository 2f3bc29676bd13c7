//! Record store trait for order reads

use super::error::StorageError;
use super::filter::OrderFilter;
use super::order::Order;
use async_trait::async_trait;

/// Read access to the durable collection of orders
///
/// Implementations evaluate an [`OrderFilter`] however suits the backend
/// (in-process predicate, native database query). Reports never write, so
/// the trait is read-only. Calls are independent and may run concurrently.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders matching the filter, in the store's natural order
    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>, StorageError>;

    /// Number of orders matching the filter
    async fn count(&self, filter: &OrderFilter) -> Result<usize, StorageError>;
}
