use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Largest supported daily-series window, in days (10 years).
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Report configuration supplied by the host application.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Number of daily buckets in the sales series (default 7).
    pub window_days: u32,

    /// How many products the top-products ranking keeps (default 5).
    pub top_products: usize,

    /// Label used for transactions with no payment method (default "Cash").
    pub default_payment_method: String,

    /// Timezone whose midnights delimit calendar days (default UTC).
    pub timezone: Tz,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            window_days: 7,
            top_products: 5,
            default_payment_method: "Cash".to_string(),
            timezone: Tz::UTC,
        }
    }
}

impl AnalyticsSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: AnalyticsSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a report the engine can produce.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(CoreError::InvalidSettings(format!(
                "window of {} days exceeds the maximum of {MAX_WINDOW_DAYS}",
                self.window_days
            )));
        }
        if self.default_payment_method.trim().is_empty() {
            return Err(CoreError::InvalidSettings(
                "default payment method label must not be blank".into(),
            ));
        }
        Ok(())
    }
}
