//! Core module containing the order model and the reporting primitives

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod order;
pub mod pipeline;
pub mod query;
pub mod store;

pub use aggregate::{CustomerAggregate, CustomerSortKey};
pub use error::{
    ConfigError, DashboardError, DashboardResult, ErrorResponse, LabelError, RequestError,
    StorageError,
};
pub use filter::{OrderFilter, RegionFilter, SearchFilter};
pub use metrics::{CohortPoint, LtvTier, MonthWindows, TierCount};
pub use order::{Order, OrderStatus, Region};
pub use pipeline::{Accumulator, Group, Pipeline, SortableBy, Tally};
pub use query::{
    ListParams, PageRequest, PaginatedResponse, ReportQuery, SortDirection, SortSpec,
};
pub use store::OrderStore;
