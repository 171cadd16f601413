use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::models::analytics::{
    BudgetStatus, CategoryTotal, ReportFilter, SeriesPoint, SpendingReport,
};
use crate::models::transaction::{Category, Transaction, TransactionKind};
use crate::models::wallet::Wallet;

/// Aggregates the transaction log into time-windowed reports.
///
/// Read-only and pure — `now` is injected, nothing here is part of the
/// mutation path.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Build a spending report over the filtered window.
    ///
    /// The search term (case-insensitive substring over name and
    /// description) is applied first, then the time window measured
    /// backward from `now`.
    pub fn report(
        &self,
        transactions: &[Transaction],
        filter: &ReportFilter,
        now: DateTime<Utc>,
    ) -> SpendingReport {
        let mut filtered: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| matches_search(t, filter.search.as_deref()))
            .filter(|t| match filter.range.days() {
                Some(days) => t.date >= now - Duration::days(days),
                None => true,
            })
            .collect();

        let total_income: f64 = filtered
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let total_expense: f64 = filtered
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        let mut totals: BTreeMap<Category, f64> = BTreeMap::new();
        for t in filtered
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
        {
            *totals.entry(t.category.unwrap_or(Category::Other)).or_insert(0.0) += t.amount;
        }
        let by_category = totals
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect();

        // Chronological series, one point per transaction. Stable sort:
        // same-instant entries keep their log order.
        filtered.sort_by_key(|t| t.date);
        let series = filtered
            .iter()
            .map(|t| match t.kind {
                TransactionKind::Income => SeriesPoint {
                    date: t.date,
                    income: t.amount,
                    expense: 0.0,
                },
                TransactionKind::Expense => SeriesPoint {
                    date: t.date,
                    income: 0.0,
                    expense: t.amount,
                },
            })
            .collect();

        SpendingReport {
            total_income,
            total_expense,
            by_category,
            series,
        }
    }

    /// Check the advisory budget against expenses in its period window.
    /// `None` when no budget is configured.
    pub fn budget_status(&self, wallet: &Wallet, now: DateTime<Utc>) -> Option<BudgetStatus> {
        let budget = wallet.budget.as_ref()?;
        let window_start = now - Duration::days(budget.period.window_days());

        let spent: f64 = wallet
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .filter(|t| t.date >= window_start && t.date <= now)
            .map(|t| t.amount)
            .sum();

        Some(BudgetStatus {
            period: budget.period,
            limit: budget.amount,
            spent,
            exceeded: spent > budget.amount,
        })
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_search(transaction: &Transaction, term: Option<&str>) -> bool {
    let Some(term) = term else { return true };
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }
    transaction.name.to_lowercase().contains(&term)
        || transaction
            .description
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(&term)
}
