//! Order filter descriptors
//!
//! An [`OrderFilter`] is a storage-neutral predicate over order records.
//! The in-memory store evaluates it with [`OrderFilter::matches`]; other
//! backends translate its fields into their native query language.

use super::order::{Order, OrderStatus, Region};
use super::query::parse_number;
use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};

/// Free-text search over an order
///
/// Matches when the customer name, region or order id contains the text
/// (case-insensitive). When the text is itself a number, orders whose amount
/// prints with that text inside also match.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    text: String,
    pattern: Regex,
    numeric: bool,
}

impl SearchFilter {
    /// Build a search filter; blank text means no search
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let pattern = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
            .ok()?;

        Some(Self {
            text: text.to_string(),
            pattern,
            numeric: parse_number(text).is_some(),
        })
    }

    /// The trimmed search text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the text also searches amounts
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.pattern.is_match(&order.customer)
            || self.pattern.is_match(order.region.as_str())
            || self.pattern.is_match(&order.order_id)
            || (self.numeric && order.amount_text().contains(&self.text))
    }
}

/// Requested region
///
/// Values outside the fixed set are kept rather than dropped, so they
/// restrict the result to nothing instead of widening it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    Known(Region),
    Unknown(String),
}

impl RegionFilter {
    /// Empty text means no region filter; anything else restricts
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse() {
            Ok(region) => RegionFilter::Known(region),
            Err(_) => RegionFilter::Unknown(raw.to_string()),
        })
    }

    /// The value as it is stored and compared
    pub fn as_str(&self) -> &str {
        match self {
            RegionFilter::Known(region) => region.as_str(),
            RegionFilter::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn matches(&self, region: Region) -> bool {
        match self {
            RegionFilter::Known(wanted) => *wanted == region,
            RegionFilter::Unknown(_) => false,
        }
    }
}

impl From<Region> for RegionFilter {
    fn from(region: Region) -> Self {
        RegionFilter::Known(region)
    }
}

/// Predicate over order records
///
/// Every field is optional; an unset field does not restrict anything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Free-text search
    pub search: Option<SearchFilter>,

    /// Exact region
    pub region: Option<RegionFilter>,

    /// Calendar month of the order date, 1-indexed (January = 1)
    pub month: Option<i64>,

    /// Exact status code
    pub status: Option<i64>,

    /// Inclusive lower bound on the order date
    pub date_from: Option<DateTime<Utc>>,

    /// Exclusive upper bound on the order date
    pub date_before: Option<DateTime<Utc>>,
}

impl OrderFilter {
    /// Filter that matches every order
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter that matches completed orders only
    pub fn completed() -> Self {
        Self::default().with_status(OrderStatus::Completed)
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status.code() as i64);
        self
    }

    pub fn in_region(mut self, region: impl Into<RegionFilter>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Restrict to orders dated at or after `from`
    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Restrict to orders dated strictly before `before`
    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.date_before = Some(before);
        self
    }

    /// Drop the status restriction (customer views ignore it)
    pub fn without_status(mut self) -> Self {
        self.status = None;
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.search.as_ref().is_none_or(|s| s.matches(order))
            && self.region.as_ref().is_none_or(|r| r.matches(order.region))
            && self.month.is_none_or(|m| i64::from(order.month()) == m)
            && self.status.is_none_or(|s| i64::from(order.status.code()) == s)
            && self.date_from.is_none_or(|from| order.date >= from)
            && self.date_before.is_none_or(|before| order.date < before)
    }
}
