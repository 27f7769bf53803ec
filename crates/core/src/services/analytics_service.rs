use chrono::{DateTime, Utc};

use crate::models::analytics::AnalyticsSummary;
use crate::models::settings::AnalyticsSettings;
use crate::models::transaction::Transaction;
use crate::services::aggregation_service::AggregationService;
use crate::services::bucket_service::BucketService;
use crate::services::growth_service::GrowthService;
use crate::services::payment_service::PaymentService;
use crate::services::ranking_service::RankingService;

/// Composes the full store report from the individual aggregations.
///
/// Each aggregation is an independent pass over the same borrowed records;
/// nothing is cached between calls.
pub struct AnalyticsService {
    aggregation_service: AggregationService,
    growth_service: GrowthService,
    ranking_service: RankingService,
    payment_service: PaymentService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
            growth_service: GrowthService::new(),
            ranking_service: RankingService::new(),
            payment_service: PaymentService::new(),
        }
    }

    /// Generate the report for `records` as of `now`.
    ///
    /// Computes:
    /// - Total sales, transaction count and average transaction
    /// - The daily sales series over `settings.window_days`
    /// - Today's sales against yesterday's
    /// - Top products by revenue
    /// - Revenue per payment method
    pub fn summarize(
        &self,
        records: &[Transaction],
        bucket_service: &BucketService,
        settings: &AnalyticsSettings,
        now: DateTime<Utc>,
    ) -> AnalyticsSummary {
        let totals = self.aggregation_service.totals(records);
        let daily = bucket_service.daily_buckets(records, now, settings.window_days);
        let day_over_day = self
            .growth_service
            .day_over_day(records, bucket_service, now);
        let top_products = self
            .ranking_service
            .top_products(records, settings.top_products);
        let payment_methods = self
            .payment_service
            .payment_groups(records, &settings.default_payment_method);

        AnalyticsSummary {
            as_of: now,
            timezone: bucket_service.timezone().name().to_string(),
            total_sales: totals.sales,
            total_transactions: totals.transaction_count,
            avg_transaction: totals.average_transaction(),
            today_sales: day_over_day.current.sales,
            yesterday_sales: day_over_day.previous.sales,
            sales_growth: day_over_day.growth,
            daily,
            top_products,
            payment_methods,
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
