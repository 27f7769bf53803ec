use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;

use crate::models::chart::{DailyBucket, DayWindow};
use crate::models::transaction::Transaction;

/// Splits time into calendar days of a reference timezone and builds the
/// daily sales series.
///
/// The timezone is always explicit; nothing here reads the system clock or
/// the host's local zone.
pub struct BucketService {
    timezone: Tz,
}

impl BucketService {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// The timezone whose midnights delimit days.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Local calendar date of an instant.
    #[must_use]
    pub fn local_date(&self, timestamp: &DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.timezone).date_naive()
    }

    /// The closed UTC interval covering local calendar day `date`.
    ///
    /// A day the zone skipped entirely gets an empty window (`end < start`).
    #[must_use]
    pub fn day_window(&self, date: NaiveDate) -> DayWindow {
        let start = self.local_midnight(date);
        let end = match date.succ_opt() {
            Some(next) => self.local_midnight(next) - Duration::nanoseconds(1),
            None => DateTime::<Utc>::MAX_UTC,
        };
        DayWindow { date, start, end }
    }

    /// `days` consecutive day windows ending with the day containing `now`,
    /// oldest first. `days = 0` yields no windows.
    #[must_use]
    pub fn day_windows(&self, now: DateTime<Utc>, days: u32) -> Vec<DayWindow> {
        let today = self.local_date(&now);
        (0..days)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
            .map(|date| self.day_window(date))
            .collect()
    }

    /// Window for the day `days_back` days before the day containing `now`.
    #[must_use]
    pub fn window_days_back(&self, now: DateTime<Utc>, days_back: u32) -> Option<DayWindow> {
        self.local_date(&now)
            .checked_sub_days(Days::new(u64::from(days_back)))
            .map(|date| self.day_window(date))
    }

    /// Daily sales series over the `days` days ending at `now`.
    ///
    /// Each record lands in at most one bucket; records outside the window
    /// are ignored. Uses a date index so the pass is O(days + records).
    pub fn daily_buckets(
        &self,
        records: &[Transaction],
        now: DateTime<Utc>,
        days: u32,
    ) -> Vec<DailyBucket> {
        let mut buckets: Vec<DailyBucket> = self
            .day_windows(now, days)
            .iter()
            .map(DailyBucket::empty)
            .collect();

        let index: HashMap<NaiveDate, usize> = buckets
            .iter()
            .enumerate()
            .map(|(idx, bucket)| (bucket.date, idx))
            .collect();

        // A record's local date equals a bucket's date exactly when its
        // timestamp lies inside that bucket's [start, end].
        let mut matched = 0usize;
        for record in records {
            if let Some(&idx) = index.get(&self.local_date(&record.timestamp)) {
                let bucket = &mut buckets[idx];
                bucket.sales += record.total;
                bucket.transaction_count += 1;
                matched += 1;
            }
        }

        tracing::debug!(
            records = records.len(),
            matched,
            buckets = buckets.len(),
            timezone = self.timezone.name(),
            "built daily sales buckets"
        );

        buckets
    }

    /// Records whose timestamp falls inside `window`.
    pub fn records_in<'a>(
        &self,
        records: &'a [Transaction],
        window: DayWindow,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        records
            .iter()
            .filter(move |record| window.contains(&record.timestamp))
    }

    fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        if let Some(local) = self.timezone.from_local_datetime(&midnight).earliest() {
            return local.with_timezone(&Utc);
        }

        // Midnight was skipped by a clock change (an hour, or a whole day).
        // The day begins at the first instant whose local date is `date` or
        // later. Offsets are whole seconds, so a search over seconds is exact.
        let mut lo = (midnight - Duration::days(1)).and_utc().timestamp();
        let mut hi = (midnight + Duration::days(2)).and_utc().timestamp();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match DateTime::from_timestamp(mid, 0) {
                Some(instant) if self.local_date(&instant) >= date => hi = mid,
                _ => lo = mid + 1,
            }
        }
        DateTime::from_timestamp(hi, 0).unwrap_or_else(|| midnight.and_utc())
    }
}

impl Default for BucketService {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
