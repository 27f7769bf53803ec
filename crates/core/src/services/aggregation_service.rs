use crate::models::analytics::SalesTotals;
use crate::models::chart::DayWindow;
use crate::models::transaction::Transaction;

/// Sums transaction totals and counts transactions.
///
/// Pure business logic, no rounding: presentation rounds for display.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Totals over an already-filtered sequence of records.
    /// Empty input yields zero sales and zero transactions.
    pub fn totals<'a, I>(&self, records: I) -> SalesTotals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        records
            .into_iter()
            .fold(SalesTotals::default(), |mut acc, record| {
                acc.sales += record.total;
                acc.transaction_count += 1;
                acc
            })
    }

    /// Totals over the records accepted by `predicate`.
    pub fn totals_where<'a, I, F>(&self, records: I, predicate: F) -> SalesTotals
    where
        I: IntoIterator<Item = &'a Transaction>,
        F: Fn(&Transaction) -> bool,
    {
        self.totals(records.into_iter().filter(|&record| predicate(record)))
    }

    /// Totals over the records whose timestamp falls inside `window`.
    pub fn totals_within<'a, I>(&self, records: I, window: &DayWindow) -> SalesTotals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        self.totals_where(records, |record| window.contains(&record.timestamp))
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
