use std::collections::HashMap;

use crate::models::analytics::ProductRankEntry;
use crate::models::transaction::Transaction;

/// Accumulates units and revenue per product and ranks products by revenue.
pub struct RankingService;

impl RankingService {
    pub fn new() -> Self {
        Self
    }

    /// Units and revenue per product name, in the order each name was first
    /// seen while walking the records' line items.
    ///
    /// Names are exact, case-sensitive keys. Revenue uses each line's
    /// effective unit price.
    pub fn product_sales<'a, I>(&self, records: I) -> Vec<ProductRankEntry>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        // name -> position in `entries`; `entries` keeps first-seen order
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<ProductRankEntry> = Vec::new();

        for item in records.into_iter().flat_map(|record| record.items.iter()) {
            let name = item.product.name.as_str();
            let idx = *index.entry(name).or_insert_with(|| {
                entries.push(ProductRankEntry {
                    name: name.to_string(),
                    quantity: 0,
                    revenue: 0.0,
                });
                entries.len() - 1
            });
            let entry = &mut entries[idx];
            entry.quantity += u64::from(item.quantity);
            entry.revenue += item.line_revenue();
        }

        entries
    }

    /// The `limit` best-selling products by revenue, highest first.
    ///
    /// The sort is stable: products with equal revenue keep their first-seen
    /// order. No line items means an empty ranking. Unvalidated NaN prices
    /// do not panic; NaN revenue sorts ahead of every number.
    pub fn top_products<'a, I>(&self, records: I, limit: usize) -> Vec<ProductRankEntry>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut entries = self.product_sales(records);
        let distinct = entries.len();

        // total_cmp keeps the order total even for NaN revenue.
        entries.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        entries.truncate(limit);

        tracing::debug!(distinct, kept = entries.len(), limit, "ranked products by revenue");

        entries
    }
}

impl Default for RankingService {
    fn default() -> Self {
        Self::new()
    }
}
