use chrono::{DateTime, Utc};

use crate::models::analytics::{GrowthDirection, GrowthResult, PeriodComparison, SalesTotals};
use crate::models::chart::DayWindow;
use crate::models::transaction::Transaction;
use crate::services::aggregation_service::AggregationService;
use crate::services::bucket_service::BucketService;

/// Period-over-period growth of sales.
pub struct GrowthService {
    aggregation_service: AggregationService,
}

impl GrowthService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
        }
    }

    /// Percentage change from `previous` to `current`.
    ///
    /// Without a positive baseline growth is undefined and reported as
    /// 0% / flat, whatever `current` is.
    #[must_use]
    pub fn growth(&self, previous: f64, current: f64) -> GrowthResult {
        if previous > 0.0 {
            let delta = current - previous;
            let direction = if delta > 0.0 {
                GrowthDirection::Up
            } else if delta < 0.0 {
                GrowthDirection::Down
            } else {
                GrowthDirection::Flat
            };
            GrowthResult {
                percent: (delta / previous) * 100.0,
                direction,
            }
        } else {
            GrowthResult::FLAT
        }
    }

    /// Compare two aggregated periods by their sales.
    #[must_use]
    pub fn compare(&self, previous: SalesTotals, current: SalesTotals) -> PeriodComparison {
        PeriodComparison {
            previous,
            current,
            growth: self.growth(previous.sales, current.sales),
        }
    }

    /// Aggregate two day windows and compare them.
    pub fn compare_windows(
        &self,
        records: &[Transaction],
        previous: &DayWindow,
        current: &DayWindow,
    ) -> PeriodComparison {
        let previous_totals = self.aggregation_service.totals_within(records, previous);
        let current_totals = self.aggregation_service.totals_within(records, current);
        self.compare(previous_totals, current_totals)
    }

    /// Today (the day containing `now`) against yesterday.
    pub fn day_over_day(
        &self,
        records: &[Transaction],
        bucket_service: &BucketService,
        now: DateTime<Utc>,
    ) -> PeriodComparison {
        let today = bucket_service.day_window(bucket_service.local_date(&now));
        let comparison = match bucket_service.window_days_back(now, 1) {
            Some(yesterday) => self.compare_windows(records, &yesterday, &today),
            // No representable yesterday: there is no baseline.
            None => self.compare(
                SalesTotals::default(),
                self.aggregation_service.totals_within(records, &today),
            ),
        };

        tracing::debug!(
            previous = comparison.previous.sales,
            current = comparison.current.sales,
            percent = comparison.growth.percent,
            direction = %comparison.growth.direction,
            "computed day-over-day growth"
        );

        comparison
    }
}

impl Default for GrowthService {
    fn default() -> Self {
        Self::new()
    }
}
