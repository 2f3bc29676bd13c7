//! Order records and their fixed enumerations

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order
///
/// Stored and serialized as its numeric code:
/// - `0` = Pending
/// - `1` = Completed
/// - `2` = Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Numeric code used on the wire and in the database
    pub fn code(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Completed => 1,
            OrderStatus::Cancelled => 2,
        }
    }

    /// Resolve a status from its numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OrderStatus::Pending),
            1 => Some(OrderStatus::Completed),
            2 => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_completed(self) -> bool {
        self == OrderStatus::Completed
    }
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        OrderStatus::from_code(code as i64)
            .ok_or_else(|| format!("unknown order status code {}", code))
    }
}

/// Sales region of an order (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Asia")]
    Asia,
    #[serde(rename = "Middle East")]
    MiddleEast,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::NorthAmerica,
        Region::Europe,
        Region::Asia,
        Region::MiddleEast,
    ];

    /// Display name, identical to the stored value
    pub fn as_str(self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::MiddleEast => "Middle East",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Exact match against the display name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| format!("unknown region '{}'", s))
    }
}

/// A single order record
///
/// Orders are immutable once stored; every report is derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer: String,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub status: OrderStatus,
    pub region: Region,
}

impl Order {
    pub fn new(
        order_id: impl Into<String>,
        customer: impl Into<String>,
        date: DateTime<Utc>,
        amount: Decimal,
        status: OrderStatus,
        region: Region,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            customer: customer.into(),
            date,
            amount,
            status,
            region,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Calendar month of the order date (1 = January), in UTC
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Amount rendered the way a number prints: no trailing zeros
    ///
    /// `100.50` becomes `"100.5"` and `100.00` becomes `"100"`.
    pub fn amount_text(&self) -> String {
        self.amount.normalize().to_string()
    }
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short label for a 1-indexed calendar month
pub fn month_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_LABELS.get(idx as usize))
        .copied()
        .unwrap_or("")
}
