pub mod errors;
pub mod models;
pub mod services;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use models::{
    analytics::{AnalyticsSummary, PaymentGroup, PeriodComparison, ProductRankEntry, SalesTotals},
    chart::DailyBucket,
    settings::AnalyticsSettings,
    transaction::Transaction,
};
use services::{
    aggregation_service::AggregationService, analytics_service::AnalyticsService,
    bucket_service::BucketService, growth_service::GrowthService,
    payment_service::PaymentService, ranking_service::RankingService,
};

use errors::CoreError;

/// Main entry point for the POS analytics core library.
/// Holds the report settings and all services needed to compute reports.
///
/// Records are never stored: every call takes the transaction slice and the
/// reference instant explicitly, and returns freshly built values.
#[must_use]
pub struct SalesAnalytics {
    settings: AnalyticsSettings,
    bucket_service: BucketService,
    aggregation_service: AggregationService,
    growth_service: GrowthService,
    ranking_service: RankingService,
    payment_service: PaymentService,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for SalesAnalytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesAnalytics")
            .field("settings", &self.settings)
            .finish()
    }
}

impl SalesAnalytics {
    /// Create an engine with default settings
    /// (7-day window, top 5 products, "Cash", UTC).
    pub fn new() -> Self {
        Self::build(AnalyticsSettings::default())
    }

    /// Create an engine with custom settings. Settings are validated first.
    pub fn with_settings(settings: AnalyticsSettings) -> Result<Self, CoreError> {
        if let Err(e) = settings.validate() {
            tracing::warn!("Rejected analytics settings: {e}");
            return Err(e);
        }
        Ok(Self::build(settings))
    }

    /// Create an engine from a JSON settings document.
    /// Missing fields take their defaults.
    pub fn from_settings_json(json: &str) -> Result<Self, CoreError> {
        let settings = AnalyticsSettings::from_json(json)?;
        Ok(Self::build(settings))
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Compute the full store report as of `now`.
    #[must_use]
    pub fn summarize(&self, records: &[Transaction], now: DateTime<Utc>) -> AnalyticsSummary {
        let summary =
            self.analytics_service
                .summarize(records, &self.bucket_service, &self.settings, now);
        tracing::debug!(
            records = records.len(),
            total_sales = summary.total_sales,
            top_products = summary.top_products.len(),
            payment_methods = summary.payment_methods.len(),
            "composed analytics summary"
        );
        summary
    }

    /// Daily sales series over the configured window, oldest day first.
    #[must_use]
    pub fn daily_sales(&self, records: &[Transaction], now: DateTime<Utc>) -> Vec<DailyBucket> {
        self.bucket_service
            .daily_buckets(records, now, self.settings.window_days)
    }

    /// Total sales and transaction count over all records.
    #[must_use]
    pub fn totals(&self, records: &[Transaction]) -> SalesTotals {
        self.aggregation_service.totals(records)
    }

    /// Total sales and transaction count on one local calendar day.
    #[must_use]
    pub fn totals_for_day(&self, records: &[Transaction], date: NaiveDate) -> SalesTotals {
        let window = self.bucket_service.day_window(date);
        self.aggregation_service.totals_within(records, &window)
    }

    /// Today's sales against yesterday's.
    #[must_use]
    pub fn day_over_day(&self, records: &[Transaction], now: DateTime<Utc>) -> PeriodComparison {
        self.growth_service
            .day_over_day(records, &self.bucket_service, now)
    }

    /// Sales on `current` against sales on `previous` (local calendar days).
    #[must_use]
    pub fn compare_days(
        &self,
        records: &[Transaction],
        previous: NaiveDate,
        current: NaiveDate,
    ) -> PeriodComparison {
        let previous = self.bucket_service.day_window(previous);
        let current = self.bucket_service.day_window(current);
        self.growth_service
            .compare_windows(records, &previous, &current)
    }

    /// Best-selling products by revenue, cut at the configured top-N.
    #[must_use]
    pub fn top_products(&self, records: &[Transaction]) -> Vec<ProductRankEntry> {
        self.ranking_service
            .top_products(records, self.settings.top_products)
    }

    /// Units and revenue for every product, in first-seen order.
    #[must_use]
    pub fn product_sales(&self, records: &[Transaction]) -> Vec<ProductRankEntry> {
        self.ranking_service.product_sales(records)
    }

    /// Revenue per payment method, in first-seen order.
    #[must_use]
    pub fn payment_methods(&self, records: &[Transaction]) -> Vec<PaymentGroup> {
        self.payment_service
            .payment_groups(records, &self.settings.default_payment_method)
    }

    // ── Validation ──────────────────────────────────────────────────

    /// Check every record's invariants. Stops at the first invalid record.
    ///
    /// Reports never call this themselves; hosts that cannot vouch for their
    /// data should call it before reporting.
    pub fn validate_transactions(&self, records: &[Transaction]) -> Result<(), CoreError> {
        for record in records {
            if let Err(e) = record.validate() {
                tracing::warn!("Rejected transaction batch: {e}");
                return Err(e);
            }
        }
        Ok(())
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Replace all settings. Invalid settings leave the current ones in place.
    pub fn update_settings(&mut self, settings: AnalyticsSettings) -> Result<(), CoreError> {
        if let Err(e) = settings.validate() {
            tracing::warn!("Rejected analytics settings: {e}");
            return Err(e);
        }
        *self = Self::build(settings);
        Ok(())
    }

    /// Set the number of days in the daily sales series.
    pub fn set_window_days(&mut self, days: u32) -> Result<(), CoreError> {
        let mut settings = self.settings.clone();
        settings.window_days = days;
        self.update_settings(settings)
    }

    /// Set how many products the ranking keeps.
    pub fn set_top_products(&mut self, limit: usize) {
        self.settings.top_products = limit;
    }

    /// Set the label used for transactions without a payment method.
    pub fn set_default_payment_method(&mut self, label: impl Into<String>) -> Result<(), CoreError> {
        let mut settings = self.settings.clone();
        settings.default_payment_method = label.into();
        self.update_settings(settings)
    }

    /// Set the timezone that defines calendar days.
    pub fn set_timezone(&mut self, timezone: Tz) {
        self.settings.timezone = timezone;
        self.bucket_service = BucketService::new(timezone);
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Parse a batch of transactions from JSON and validate each one.
    pub fn transactions_from_json(json: &str) -> Result<Vec<Transaction>, CoreError> {
        let records: Vec<Transaction> = serde_json::from_str(json)?;
        for record in &records {
            record.validate()?;
        }
        Ok(records)
    }

    /// Export a summary as a pretty-printed JSON string.
    pub fn export_summary_to_json(summary: &AnalyticsSummary) -> Result<String, CoreError> {
        serde_json::to_string_pretty(summary)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize summary to JSON: {e}")))
    }

    /// Export a daily sales series as a CSV string.
    /// Columns: date, label, full_label, sales, transactions
    #[must_use]
    pub fn export_daily_to_csv(buckets: &[DailyBucket]) -> String {
        let mut csv = String::from("date,label,full_label,sales,transactions\n");
        for bucket in buckets {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                bucket.date, bucket.label, bucket.full_label, bucket.sales, bucket.transaction_count,
            ));
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: AnalyticsSettings) -> Self {
        let bucket_service = BucketService::new(settings.timezone);
        let aggregation_service = AggregationService::new();
        let growth_service = GrowthService::new();
        let ranking_service = RankingService::new();
        let payment_service = PaymentService::new();
        let analytics_service = AnalyticsService::new();

        Self {
            settings,
            bucket_service,
            aggregation_service,
            growth_service,
            ranking_service,
            payment_service,
            analytics_service,
        }
    }
}

impl Default for SalesAnalytics {
    fn default() -> Self {
        Self::new()
    }
}
