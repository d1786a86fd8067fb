//! Aggregation helpers for balance totals and the per-category expense breakdown.

use std::{cmp::Ordering, collections::HashMap};

use tally_domain::{Transaction, TransactionKind};

/// Balance, income and expense totals over a transaction log.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub balance: f64,
    pub income: f64,
    pub expenses: f64,
}

/// Summed expense amount for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Expense totals keyed by category.
///
/// Entries come out in order of first occurrence in the input log. That order
/// is incidental; use [`CategoryBreakdown::sorted_by_category`] or
/// [`CategoryBreakdown::sorted_by_amount`] when a stable order matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

/// Labelled series consumed by the chart widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.amount)
    }

    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every category total.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    pub fn sorted_by_category(&self) -> Vec<CategoryTotal> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.category.cmp(&b.category));
        entries
    }

    /// Largest spend first; equal amounts fall back to the category name.
    pub fn sorted_by_amount(&self) -> Vec<CategoryTotal> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        entries
    }

    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries {
            labels: self.entries.iter().map(|e| e.category.clone()).collect(),
            values: self.entries.iter().map(|e| e.amount).collect(),
        }
    }
}

/// Pure aggregations over a transaction snapshot. Nothing here mutates its input.
pub struct SummaryService;

impl SummaryService {
    /// Computes balance, income and expense totals.
    ///
    /// `balance` is derived from the two sums, so `balance == income - expenses` holds exactly.
    pub fn totals<'a, I>(transactions: I) -> Totals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expenses) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expenses), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.amount, expenses),
                    TransactionKind::Expense => (income, expenses + txn.amount),
                });
        Totals {
            balance: income - expenses,
            income,
            expenses,
        }
    }

    /// Groups expense amounts by category. Income never contributes.
    pub fn category_breakdown<'a, I>(transactions: I) -> CategoryBreakdown
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<CategoryTotal> = Vec::new();
        for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
            match index.get(txn.category.as_str()) {
                Some(&position) => entries[position].amount += txn.amount,
                None => {
                    index.insert(txn.category.as_str(), entries.len());
                    entries.push(CategoryTotal {
                        category: txn.category.clone(),
                        amount: txn.amount,
                    });
                }
            }
        }
        CategoryBreakdown { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn txn(kind: TransactionKind, amount: f64, category: &str) -> Transaction {
        Transaction::new(kind, amount, category, "entry", Utc::now())
    }

    #[test]
    fn totals_of_empty_log_are_zero() {
        let empty: Vec<Transaction> = Vec::new();
        assert_eq!(SummaryService::totals(&empty), Totals::default());
        assert!(SummaryService::category_breakdown(&empty).is_empty());
    }

    #[test]
    fn totals_split_income_and_expenses() {
        let log = vec![
            txn(TransactionKind::Income, 100.0, "Salary"),
            txn(TransactionKind::Expense, 40.0, "Food"),
            txn(TransactionKind::Expense, 15.5, "Transport"),
        ];
        let totals = SummaryService::totals(&log);
        assert_eq!(totals.income, 100.0);
        assert_eq!(totals.expenses, 55.5);
        assert_eq!(totals.balance, 44.5);
    }

    #[test]
    fn balance_identity_holds_for_awkward_decimals() {
        let log = vec![
            txn(TransactionKind::Income, 0.1, "A"),
            txn(TransactionKind::Income, 0.2, "A"),
            txn(TransactionKind::Expense, 0.3, "B"),
            txn(TransactionKind::Expense, 1e-9, "C"),
        ];
        let totals = SummaryService::totals(&log);
        assert_eq!(totals.balance, totals.income - totals.expenses);
    }

    #[test]
    fn breakdown_groups_expenses_in_first_seen_order() {
        let log = vec![
            txn(TransactionKind::Expense, 10.0, "Food"),
            txn(TransactionKind::Income, 500.0, "Salary"),
            txn(TransactionKind::Expense, 5.0, "Transport"),
            txn(TransactionKind::Expense, 2.5, "Food"),
        ];
        let breakdown = SummaryService::category_breakdown(&log);
        assert_eq!(breakdown.get("Food"), Some(12.5));
        assert_eq!(breakdown.get("Transport"), Some(5.0));
        assert_eq!(breakdown.get("Salary"), None);
        let series = breakdown.chart_series();
        assert_eq!(series.labels, vec!["Food", "Transport"]);
        assert_eq!(series.values, vec![12.5, 5.0]);
        assert_eq!(breakdown.total(), SummaryService::totals(&log).expenses);
    }

    #[test]
    fn breakdown_keys_are_case_sensitive() {
        let log = vec![
            txn(TransactionKind::Expense, 1.0, "food"),
            txn(TransactionKind::Expense, 2.0, "Food"),
        ];
        let breakdown = SummaryService::category_breakdown(&log);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.get("food"), Some(1.0));
    }

    #[test]
    fn sorted_views_are_deterministic() {
        let log = vec![
            txn(TransactionKind::Expense, 3.0, "Rent"),
            txn(TransactionKind::Expense, 9.0, "Food"),
            txn(TransactionKind::Expense, 3.0, "Books"),
        ];
        let breakdown = SummaryService::category_breakdown(&log);
        let by_name: Vec<_> = breakdown
            .sorted_by_category()
            .into_iter()
            .map(|entry| entry.category)
            .collect();
        assert_eq!(by_name, vec!["Books", "Food", "Rent"]);
        let by_amount: Vec<_> = breakdown
            .sorted_by_amount()
            .into_iter()
            .map(|entry| entry.category)
            .collect();
        assert_eq!(by_amount, vec!["Food", "Books", "Rent"]);
    }
}
