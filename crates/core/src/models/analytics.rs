use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::budget::BudgetPeriod;
use super::transaction::Category;

/// Lookback window for analytics reports, measured backward from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    AllTime,
    LastDay,
    LastWeek,
    LastMonth,
    LastYear,
}

impl TimeRange {
    /// Window length in days; `None` means no windowing.
    #[must_use]
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::AllTime => None,
            TimeRange::LastDay => Some(1),
            TimeRange::LastWeek => Some(7),
            TimeRange::LastMonth => Some(30),
            TimeRange::LastYear => Some(365),
        }
    }
}

/// Filter applied before aggregating a report. The search term restricts
/// to transactions whose name or description contains it
/// (case-insensitive); it is applied before the time window.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub search: Option<String>,
    pub range: TimeRange,
}

impl ReportFilter {
    #[must_use]
    pub fn range(range: TimeRange) -> Self {
        Self {
            search: None,
            range,
        }
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// Aggregated view of the filtered transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingReport {
    /// Sum of income amounts in the window
    pub total_income: f64,

    /// Sum of expense amounts in the window
    pub total_expense: f64,

    /// Expense totals per category, only for categories actually present.
    /// Uncategorized expenses bucket under `Other`.
    pub by_category: Vec<CategoryTotal>,

    /// One point per transaction in the window, in date order
    pub series: Vec<SeriesPoint>,
}

/// Summed expense amount for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// One bar in the income/expense time series. Exactly one of the two
/// sides is non-zero per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: DateTime<Utc>,
    pub income: f64,
    pub expense: f64,
}

/// Result of checking the advisory budget against the windowed expense sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub period: BudgetPeriod,
    /// The configured budget amount
    pub limit: f64,
    /// Expense sum over the period window
    pub spent: f64,
    /// True when spent exceeds the limit
    pub exceeded: bool,
}
