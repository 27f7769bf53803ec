use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Snapshot of a catalog product as it was at the time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Display name; also the grouping key for product rankings (case-sensitive)
    pub name: String,

    /// Catalog unit price, used when the line carries no override price
    pub sell_price: f64,
}

impl ProductSnapshot {
    pub fn new(name: impl Into<String>, sell_price: f64) -> Self {
        Self {
            name: name.into(),
            sell_price,
        }
    }
}

/// One product line within a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product sold on this line
    pub product: ProductSnapshot,

    /// Number of units (always at least 1)
    pub quantity: u32,

    /// Override unit price (discounts, manual price changes)
    #[serde(default)]
    pub final_price: Option<f64>,
}

impl LineItem {
    pub fn new(product: ProductSnapshot, quantity: u32) -> Self {
        Self {
            product,
            quantity,
            final_price: None,
        }
    }

    /// Set an override unit price for this line.
    #[must_use]
    pub fn with_final_price(mut self, price: f64) -> Self {
        self.final_price = Some(price);
        self
    }

    /// The unit price actually charged.
    ///
    /// Precedence: `final_price` whenever it is present (including an explicit
    /// zero), otherwise the product's `sell_price`.
    #[must_use]
    pub fn effective_unit_price(&self) -> f64 {
        self.final_price.unwrap_or(self.product.sell_price)
    }

    /// Revenue contributed by this line: effective unit price × quantity.
    #[must_use]
    pub fn line_revenue(&self) -> f64 {
        self.effective_unit_price() * f64::from(self.quantity)
    }
}

/// A single completed sale.
///
/// Records are owned by the host application and are only ever read by the
/// analytics services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// When the sale was completed
    pub timestamp: DateTime<Utc>,

    /// Amount paid for the whole transaction
    pub total: f64,

    /// Payment method label ("Cash", "QRIS", "Card", ...); absent means default
    #[serde(default)]
    pub payment_method: Option<String>,

    /// Product lines, in the order they were rung up
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Transaction {
    pub fn new(timestamp: DateTime<Utc>, total: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            total,
            payment_method: None,
            items: Vec::new(),
        }
    }

    /// Set the payment method label.
    #[must_use]
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Append a line item.
    #[must_use]
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// The payment method label used for grouping.
    ///
    /// Returns the recorded label when it is present and non-empty,
    /// otherwise `default`. Labels are not trimmed or case-folded.
    #[must_use]
    pub fn payment_method_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.payment_method.as_deref() {
            Some(method) if !method.is_empty() => method,
            _ => default,
        }
    }

    /// Check the record invariants: finite non-negative total, at least one
    /// unit per line, finite non-negative effective price, named products.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "transaction {} has invalid total {}",
                self.id, self.total
            )));
        }

        for (idx, item) in self.items.iter().enumerate() {
            if item.product.name.is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "transaction {} line {idx} has an empty product name",
                    self.id
                )));
            }
            if item.quantity == 0 {
                return Err(CoreError::ValidationError(format!(
                    "transaction {} line {idx} ({}) has zero quantity",
                    self.id, item.product.name
                )));
            }
            let price = item.effective_unit_price();
            if !price.is_finite() || price < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "transaction {} line {idx} ({}) has invalid unit price {price}",
                    self.id, item.product.name
                )));
            }
        }

        Ok(())
    }
}
