use serde::{Deserialize, Serialize};

/// Gamified milestones unlocked by ledger activity.
///
/// Unlocking is monotonic: once an achievement is in the wallet's set it
/// is never removed by normal operation. Only a wholesale snapshot import
/// replaces the set. Serde names match the ids used in exported data
/// (`first_transaction`, `big_spender`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Ledger contains at least one transaction
    FirstTransaction,
    /// A transaction recorded on each of 7 consecutive days up to today
    TransactionStreak,
    /// Balance reached 10,000 in the active currency
    SavingsMilestone,
    /// Expenses span at least 5 distinct categories
    DiversePortfolio,
    /// Any single transaction of 1,000 or more
    BigSpender,
}

impl Achievement {
    /// All achievements, in unlock-id order.
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstTransaction,
        Achievement::TransactionStreak,
        Achievement::SavingsMilestone,
        Achievement::DiversePortfolio,
        Achievement::BigSpender,
    ];

    /// Stable string id, identical to the serde name.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstTransaction => "first_transaction",
            Achievement::TransactionStreak => "transaction_streak",
            Achievement::SavingsMilestone => "savings_milestone",
            Achievement::DiversePortfolio => "diverse_portfolio",
            Achievement::BigSpender => "big_spender",
        }
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
