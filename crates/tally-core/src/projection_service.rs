//! Filtered, date-ordered views of the transaction log.

use tally_domain::{Filter, Transaction};

/// Derives the display list for a filter without touching the source log.
pub struct ProjectionService;

impl ProjectionService {
    /// Returns the transactions matching `filter`, most recent first.
    ///
    /// The sort is stable: entries sharing a date keep their relative input order.
    pub fn project<'a, I>(transactions: I, filter: Filter) -> Vec<Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut projected: Vec<Transaction> = transactions
            .into_iter()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect();
        projected.sort_by(|a, b| b.date.cmp(&a.date));
        projected
    }
}
