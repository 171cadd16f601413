use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::achievement::Achievement;
use super::budget::Budget;
use super::card::BankCard;
use super::transaction::{RecurringTransaction, Transaction};

/// The main data container: ledger, derived balance, and everything else
/// that persists across sessions.
///
/// Invariant maintained by [`crate::services::ledger_service::LedgerService`]:
/// `balance == initial balance + Σ signed amounts` over `transactions`,
/// at every point between mutations. A snapshot import replaces the pair
/// wholesale and is exempt (the imported balance is trusted as-is).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Signed balance in `currency` units
    pub balance: f64,

    /// Display currency code; free-form, custom codes allowed
    pub currency: String,

    /// Transaction log, newest-first insertion order. Display sorting is
    /// a separate derivation — see `LedgerService::display_order`.
    pub transactions: Vec<Transaction>,

    /// Unlocked achievements; grows monotonically outside of imports
    #[serde(default)]
    pub achievements: BTreeSet<Achievement>,

    /// Advisory spending budget
    #[serde(default)]
    pub budget: Option<Budget>,

    /// Savings goal target; must exceed the balance at set-time
    #[serde(default)]
    pub savings_goal: Option<f64>,

    /// Recurring transaction templates (never auto-materialized)
    #[serde(default)]
    pub recurring: Vec<RecurringTransaction>,

    /// Stored mock bank cards
    #[serde(default)]
    pub cards: Vec<BankCard>,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            balance: 0.0,
            currency: "CNY".to_string(),
            transactions: Vec::new(),
            achievements: BTreeSet::new(),
            budget: None,
            savings_goal: None,
            recurring: Vec::new(),
            cards: Vec::new(),
        }
    }
}
