//! Summary statistics derived from aggregated groups

use super::aggregate::CustomerAggregate;
use super::order::month_label;
use super::pipeline::{Accumulator, Group, Pipeline};
use chrono::{DateTime, Datelike, Months, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Percentage change from `previous` to `current`
///
/// Falls back to 0 when there is no previous value to compare against.
pub fn growth_percent(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        (current - previous) / previous * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Arithmetic mean, 0 for an empty set
pub fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// The current and previous calendar months relative to `now` (UTC)
///
/// "This month" is open-ended: everything from the first of the month on.
/// "Last month" is the half-open range of the previous calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindows {
    pub this_month_start: DateTime<Utc>,
    pub last_month_start: DateTime<Utc>,
}

impl MonthWindows {
    pub fn at(now: DateTime<Utc>) -> Self {
        let this_month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        let last_month_start = this_month_start
            .checked_sub_months(Months::new(1))
            .unwrap_or(this_month_start);

        Self {
            this_month_start,
            last_month_start,
        }
    }

    pub fn in_this_month(&self, date: DateTime<Utc>) -> bool {
        date >= self.this_month_start
    }

    pub fn in_last_month(&self, date: DateTime<Utc>) -> bool {
        date >= self.last_month_start && date < self.this_month_start
    }
}

// =============================================================================
// Lifetime value tiers
// =============================================================================

/// Fixed lifetime-spend buckets, lower bound inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LtvTier {
    UnderTenK,
    TenToTwentyFiveK,
    TwentyFiveToFiftyK,
    FiftyKPlus,
}

impl LtvTier {
    /// Declaration order, which is also the output order
    pub const ALL: [LtvTier; 4] = [
        LtvTier::UnderTenK,
        LtvTier::TenToTwentyFiveK,
        LtvTier::TwentyFiveToFiftyK,
        LtvTier::FiftyKPlus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LtvTier::UnderTenK => "< $10k",
            LtvTier::TenToTwentyFiveK => "$10k-$25k",
            LtvTier::TwentyFiveToFiftyK => "$25k-$50k",
            LtvTier::FiftyKPlus => "$50k+",
        }
    }

    pub fn for_spend(spend: Decimal) -> Self {
        if spend < Decimal::from(10_000) {
            LtvTier::UnderTenK
        } else if spend < Decimal::from(25_000) {
            LtvTier::TenToTwentyFiveK
        } else if spend < Decimal::from(50_000) {
            LtvTier::TwentyFiveToFiftyK
        } else {
            LtvTier::FiftyKPlus
        }
    }

    fn index(self) -> usize {
        match self {
            LtvTier::UnderTenK => 0,
            LtvTier::TenToTwentyFiveK => 1,
            LtvTier::TwentyFiveToFiftyK => 2,
            LtvTier::FiftyKPlus => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: &'static str,
    pub count: usize,
}

/// Bucket each spend into its tier
///
/// All four tiers are always present, in declaration order.
pub fn ltv_distribution<I>(spends: I) -> Vec<TierCount>
where
    I: IntoIterator<Item = Decimal>,
{
    let mut counts = [0usize; 4];
    for spend in spends {
        counts[LtvTier::for_spend(spend).index()] += 1;
    }

    LtvTier::ALL
        .into_iter()
        .map(|tier| TierCount {
            tier: tier.label(),
            count: counts[tier.index()],
        })
        .collect()
}

// =============================================================================
// Acquisition cohorts
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortPoint {
    pub month: &'static str,
    pub customers: usize,
}

#[derive(Debug, Default)]
struct Headcount(usize);

impl Accumulator<CustomerAggregate> for Headcount {
    fn accumulate(&mut self, _customer: &CustomerAggregate) {
        self.0 += 1;
    }
}

/// Customers per calendar month of their first order (any status)
///
/// Ordered January to December; months nobody joined in are absent.
pub fn acquisition_cohorts<I>(customers: I) -> Vec<CohortPoint>
where
    I: IntoIterator<Item = CustomerAggregate>,
{
    Pipeline::new(customers.into_iter().collect())
        .filter(|c: &CustomerAggregate| c.first_order_date.is_some())
        .group_by::<_, Headcount, _>(|c| c.first_order_date.map_or(0, |d| d.month()))
        .sort_with(|a, b| a.key.cmp(&b.key))
        .map(|Group { key, value }| CohortPoint {
            month: month_label(key),
            customers: value.0,
        })
        .into_vec()
}
