use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chart::DailyBucket;

/// Revenue and transaction count over some set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesTotals {
    /// Sum of transaction totals (unrounded)
    pub sales: f64,

    /// Number of transactions
    pub transaction_count: usize,
}

impl SalesTotals {
    /// Average transaction value; 0 when there are no transactions.
    #[must_use]
    pub fn average_transaction(&self) -> f64 {
        if self.transaction_count > 0 {
            self.sales / self.transaction_count as f64
        } else {
            0.0
        }
    }

    /// Combine two partial totals (e.g. computed over disjoint chunks).
    #[must_use]
    pub fn merge(self, other: SalesTotals) -> SalesTotals {
        SalesTotals {
            sales: self.sales + other.sales,
            transaction_count: self.transaction_count + other.transaction_count,
        }
    }
}

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthDirection {
    Up,
    Down,
    Flat,
}

impl std::fmt::Display for GrowthDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthDirection::Up => write!(f, "up"),
            GrowthDirection::Down => write!(f, "down"),
            GrowthDirection::Flat => write!(f, "flat"),
        }
    }
}

/// Signed percentage change between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    /// (current - previous) / previous × 100, or 0 without a baseline
    pub percent: f64,

    /// Up, down or flat
    pub direction: GrowthDirection,
}

impl GrowthResult {
    /// Zero growth, no direction.
    pub const FLAT: GrowthResult = GrowthResult {
        percent: 0.0,
        direction: GrowthDirection::Flat,
    };
}

/// Two aggregated periods and the growth between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// The baseline period (e.g. yesterday)
    pub previous: SalesTotals,

    /// The period being compared (e.g. today)
    pub current: SalesTotals,

    /// Growth of `current.sales` over `previous.sales`
    pub growth: GrowthResult,
}

/// Units sold and revenue for one product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRankEntry {
    /// Product display name (exact, case-sensitive key)
    pub name: String,

    /// Total units sold
    pub quantity: u64,

    /// Sum of effective unit price × quantity
    pub revenue: f64,
}

/// Revenue collected through one payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentGroup {
    /// Payment method label, after defaulting
    pub label: String,

    /// Sum of transaction totals paid this way
    pub revenue: f64,
}

/// The complete store report at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Reference instant this summary was computed for
    pub as_of: DateTime<Utc>,

    /// IANA name of the timezone that defines calendar days
    pub timezone: String,

    /// Sum of all transaction totals
    pub total_sales: f64,

    /// Number of transactions
    pub total_transactions: usize,

    /// total_sales / total_transactions, 0 with no transactions
    pub avg_transaction: f64,

    /// Sales on the calendar day containing `as_of`
    pub today_sales: f64,

    /// Sales on the calendar day before
    pub yesterday_sales: f64,

    /// Growth of today's sales over yesterday's
    pub sales_growth: GrowthResult,

    /// Daily sales series, oldest day first
    pub daily: Vec<DailyBucket>,

    /// Best-selling products by revenue
    pub top_products: Vec<ProductRankEntry>,

    /// Revenue per payment method, in first-seen order
    pub payment_methods: Vec<PaymentGroup>,
}
