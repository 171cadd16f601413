use serde::{Deserialize, Serialize};

/// Spending budget, advisory only — it never blocks a mutation, it only
/// drives the exceeded-budget warning in [`crate::services::analytics_service`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Spending limit for the period (always positive)
    pub amount: f64,
    /// Window the limit applies to
    pub period: BudgetPeriod,
}

/// Budget window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl BudgetPeriod {
    /// Length of the lookback window in days, aligned with the analytics
    /// time ranges (monthly uses a rolling 30 days, not calendar months).
    #[must_use]
    pub fn window_days(&self) -> i64 {
        match self {
            BudgetPeriod::Daily => 1,
            BudgetPeriod::Weekly => 7,
            BudgetPeriod::Monthly => 30,
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetPeriod::Daily => write!(f, "daily"),
            BudgetPeriod::Weekly => write!(f, "weekly"),
            BudgetPeriod::Monthly => write!(f, "monthly"),
        }
    }
}
