//! Configurable UI labels
//!
//! A label is a key/value pair plus the list of places in the UI that show
//! it. Labels are plain key lookups; only the value can be changed.

use crate::core::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Where a label appears in the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub page: String,
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub usages: Vec<Usage>,
}

/// Request body for updating a label
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLabelRequest {
    pub value: String,
}

/// Storage for labels
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// All labels
    async fn list(&self) -> Result<Vec<Label>, StorageError>;

    /// Label by key, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<Label>, StorageError>;

    /// Replace a label's value, returning the updated label or `None` if absent
    async fn update(&self, key: &str, value: &str) -> Result<Option<Label>, StorageError>;

    /// Insert `labels` only if the store holds none yet
    ///
    /// Returns how many labels were inserted.
    async fn seed(&self, labels: Vec<Label>) -> Result<usize, StorageError>;
}

impl Label {
    pub fn new(key: &str, value: &str, usages: &[(&str, &str)]) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            usages: usages
                .iter()
                .map(|(page, component)| Usage {
                    page: page.to_string(),
                    component: component.to_string(),
                })
                .collect(),
        }
    }
}

/// The label set a fresh deployment starts with
pub fn default_labels() -> Vec<Label> {
    vec![
        Label::new(
            "metric_revenue",
            "Revenue Overview",
            &[("Dashboard", "Revenue Line Chart")],
        ),
        Label::new(
            "revenue_card",
            "Total Orders",
            &[
                ("Dashboard", "Orders KPI Card"),
                ("Customers", "Customers KPI Card"),
            ],
        ),
        Label::new(
            "orders_card",
            "Total Orders",
            &[
                ("Dashboard", "Orders KPI Card"),
                ("Customers", "Orders Table Header"),
            ],
        ),
        Label::new(
            "avg_order_card",
            "Avg Order Value",
            &[
                ("Dashboard", "AOV KPI Card"),
                ("Customers", "Customer AOV Column"),
            ],
        ),
        Label::new(
            "growth_card",
            "Monthly Growth",
            &[
                ("Dashboard", "Monthly growth card"),
                ("Customers", "Customer growth card"),
            ],
        ),
        Label::new(
            "total_customers_card",
            "Total Customers",
            &[("Customers", "Total Customers Card")],
        ),
        Label::new(
            "avg_customer_value_card",
            "Avg Customer Value",
            &[("Customers", "Customer Value Card")],
        ),
        Label::new(
            "new_customers_card",
            "New Customers",
            &[("Customers", "New Customers Card")],
        ),
        Label::new("page_dashboard_title", "Dashboard", &[("Dashboard", "Page Header")]),
        Label::new("page_customers_title", "Customers", &[("Customers", "Page Header")]),
        Label::new(
            "revenue_region",
            "Revenue by Region",
            &[("Dashboard", "Region Pie Chart Title")],
        ),
        Label::new(
            "customer_acquisition",
            "Customer Acquisition",
            &[("Customers", "Acquisition Chart")],
        ),
        Label::new(
            "customer_ltv",
            "Customer Value Distribution",
            &[("Customers", "LTV Chart")],
        ),
        Label::new(
            "table",
            "Transactions",
            &[
                ("Dashboard", "Sales Table Header"),
                ("Customers", "Customers Table Header"),
            ],
        ),
    ]
}
