use chrono::{Days, NaiveDate};
use std::collections::{BTreeSet, HashSet};

use crate::models::achievement::Achievement;
use crate::models::transaction::{Category, TransactionKind};
use crate::models::wallet::Wallet;

/// Balance threshold for the savings milestone, in nominal units of the
/// active currency (no cross-currency normalization).
const SAVINGS_MILESTONE: f64 = 10_000.0;

/// Single-transaction amount threshold for the big-spender unlock.
const BIG_SPENDER: f64 = 1_000.0;

/// Distinct expense categories needed for the diverse-portfolio unlock.
const DIVERSE_CATEGORIES: usize = 5;

/// Consecutive calendar days of activity for the streak unlock.
const STREAK_DAYS: u64 = 7;

/// Evaluates the achievement rules against the wallet state.
///
/// Pure — the caller injects `today` so streak logic stays deterministic
/// under test. All rules are evaluated independently; any number may fire
/// from a single mutation.
pub struct AchievementService;

impl AchievementService {
    pub fn new() -> Self {
        Self
    }

    /// Full rule evaluation. Returns the set of achievements whose
    /// conditions currently hold; it says nothing about what was already
    /// unlocked.
    pub fn evaluate(&self, wallet: &Wallet, today: NaiveDate) -> BTreeSet<Achievement> {
        let mut unlocked = BTreeSet::new();

        if !wallet.transactions.is_empty() {
            unlocked.insert(Achievement::FirstTransaction);
        }

        if self.has_streak(wallet, today) {
            unlocked.insert(Achievement::TransactionStreak);
        }

        if wallet.balance >= SAVINGS_MILESTONE {
            unlocked.insert(Achievement::SavingsMilestone);
        }

        let categories: HashSet<Category> = wallet
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.category.unwrap_or(Category::Other))
            .collect();
        if categories.len() >= DIVERSE_CATEGORIES {
            unlocked.insert(Achievement::DiversePortfolio);
        }

        if wallet
            .transactions
            .iter()
            .any(|t| t.amount >= BIG_SPENDER)
        {
            unlocked.insert(Achievement::BigSpender);
        }

        unlocked
    }

    /// Union newly satisfied rules into the wallet's set and return what
    /// is new, in stable order. Never removes anything — unlocking is
    /// monotonic for the lifetime of the wallet.
    pub fn unlock(&self, wallet: &mut Wallet, today: NaiveDate) -> Vec<Achievement> {
        let satisfied = self.evaluate(wallet, today);
        let newly: Vec<Achievement> = satisfied
            .iter()
            .filter(|a| !wallet.achievements.contains(a))
            .copied()
            .collect();
        wallet.achievements.extend(satisfied);
        if !newly.is_empty() {
            tracing::debug!(?newly, "achievements unlocked");
        }
        newly
    }

    /// At least one transaction dated on each of the last `STREAK_DAYS`
    /// calendar days, up to and including `today`. Goes by transaction
    /// date, not recording time.
    fn has_streak(&self, wallet: &Wallet, today: NaiveDate) -> bool {
        let active_days: HashSet<NaiveDate> = wallet
            .transactions
            .iter()
            .map(|t| t.date.date_naive())
            .collect();

        (0..STREAK_DAYS).all(|back| {
            today
                .checked_sub_days(Days::new(back))
                .is_some_and(|day| active_days.contains(&day))
        })
    }
}

impl Default for AchievementService {
    fn default() -> Self {
        Self::new()
    }
}
