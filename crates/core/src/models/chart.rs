use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One calendar day in the reference timezone, as a closed UTC interval.
///
/// `start` is the first instant of the local day and `end` the last
/// representable instant before the next local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Local calendar date covered by this window
    pub date: NaiveDate,

    /// First instant of the day (local midnight)
    pub start: DateTime<Utc>,

    /// Last instant of the day (just before the next local midnight)
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Whether `timestamp` falls inside `[start, end]`, both ends inclusive.
    #[must_use]
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        self.start <= *timestamp && *timestamp <= self.end
    }
}

/// A single day of the sales time series.
///
/// The core computes the numbers and attaches display labels; the frontend
/// only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Local calendar date of this bucket
    pub date: NaiveDate,

    /// Short weekday label (e.g., "Mon")
    pub label: String,

    /// Day and month label (e.g., "06 Jan")
    pub full_label: String,

    /// First instant covered by the bucket
    pub start: DateTime<Utc>,

    /// Last instant covered by the bucket
    pub end: DateTime<Utc>,

    /// Sum of transaction totals that fell on this day
    pub sales: f64,

    /// Number of transactions that fell on this day
    pub transaction_count: usize,
}

impl DailyBucket {
    /// Short weekday label format.
    pub const LABEL_FORMAT: &'static str = "%a";

    /// Day and abbreviated month label format.
    pub const FULL_LABEL_FORMAT: &'static str = "%d %b";

    /// An empty bucket covering `window`.
    pub fn empty(window: &DayWindow) -> Self {
        Self {
            date: window.date,
            label: window.date.format(Self::LABEL_FORMAT).to_string(),
            full_label: window.date.format(Self::FULL_LABEL_FORMAT).to_string(),
            start: window.start,
            end: window.end,
            sales: 0.0,
            transaction_count: 0,
        }
    }

    /// The window this bucket covers.
    #[must_use]
    pub fn window(&self) -> DayWindow {
        DayWindow {
            date: self.date,
            start: self.start,
            end: self.end,
        }
    }
}
