use std::collections::HashMap;

use crate::models::analytics::PaymentGroup;
use crate::models::transaction::Transaction;

/// Groups revenue by payment method.
pub struct PaymentService;

impl PaymentService {
    pub fn new() -> Self {
        Self
    }

    /// Revenue per payment method label.
    ///
    /// Records without a method (or with an empty one) are counted under
    /// `default_label`. Groups come out in the order their label was first
    /// seen, so identical input order gives identical output order. No
    /// records means no groups.
    pub fn payment_groups<'a, I>(&self, records: I, default_label: &str) -> Vec<PaymentGroup>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<PaymentGroup> = Vec::new();
        let mut records_seen = 0usize;

        for record in records {
            records_seen += 1;
            let label = record.payment_method_or(default_label);
            let idx = match index.get(label) {
                Some(&idx) => idx,
                None => {
                    index.insert(label.to_string(), groups.len());
                    groups.push(PaymentGroup {
                        label: label.to_string(),
                        revenue: 0.0,
                    });
                    groups.len() - 1
                }
            };
            groups[idx].revenue += record.total;
        }

        tracing::debug!(
            records = records_seen,
            groups = groups.len(),
            "grouped revenue by payment method"
        );

        groups
    }
}

impl Default for PaymentService {
    fn default() -> Self {
        Self::new()
    }
}
