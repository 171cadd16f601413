use std::collections::BTreeSet;

use crate::errors::CoreError;
use crate::models::achievement::Achievement;
use crate::models::budget::Budget;
use crate::models::card::BankCard;
use crate::models::transaction::{RecurringTransaction, Transaction};
use crate::models::wallet::Wallet;

use super::keyvalue::KeyValueStore;

// Key layout, kept compatible with the original local-storage app:
// scalars as plain strings, collections as JSON arrays.
pub const KEY_BALANCE: &str = "balance";
pub const KEY_CURRENCY: &str = "currency";
pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_ACHIEVEMENTS: &str = "achievements";
pub const KEY_BUDGET: &str = "budget";
pub const KEY_SAVINGS_GOAL: &str = "savingsGoal";
pub const KEY_RECURRING: &str = "recurringTransactions";
pub const KEY_CARDS: &str = "cards";

/// High-level persistence: maps a [`Wallet`] onto the key-value layout
/// and back.
pub struct StorageManager;

impl StorageManager {
    /// Write the full wallet. Optional sections are removed from the
    /// store when unset so a reload can't resurrect stale data.
    pub fn save(store: &mut impl KeyValueStore, wallet: &Wallet) -> Result<(), CoreError> {
        store.set(KEY_BALANCE, &wallet.balance.to_string());
        store.set(KEY_CURRENCY, &wallet.currency);
        store.set(KEY_TRANSACTIONS, &serde_json::to_string(&wallet.transactions)?);
        store.set(KEY_ACHIEVEMENTS, &serde_json::to_string(&wallet.achievements)?);

        match &wallet.budget {
            Some(budget) => store.set(KEY_BUDGET, &serde_json::to_string(budget)?),
            None => store.remove(KEY_BUDGET),
        }
        match wallet.savings_goal {
            Some(goal) => store.set(KEY_SAVINGS_GOAL, &goal.to_string()),
            None => store.remove(KEY_SAVINGS_GOAL),
        }
        if wallet.recurring.is_empty() {
            store.remove(KEY_RECURRING);
        } else {
            store.set(KEY_RECURRING, &serde_json::to_string(&wallet.recurring)?);
        }
        if wallet.cards.is_empty() {
            store.remove(KEY_CARDS);
        } else {
            store.set(KEY_CARDS, &serde_json::to_string(&wallet.cards)?);
        }
        Ok(())
    }

    /// Read a wallet back. Returns `Ok(None)` for a store with no wallet
    /// data at all (first launch). Individual malformed entries are hard
    /// errors — a corrupt store must not be half-loaded.
    pub fn load(store: &impl KeyValueStore) -> Result<Option<Wallet>, CoreError> {
        let balance_raw = store.get(KEY_BALANCE);
        let transactions_raw = store.get(KEY_TRANSACTIONS);
        if balance_raw.is_none() && transactions_raw.is_none() {
            return Ok(None);
        }

        let balance = match balance_raw {
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|e| CoreError::Storage(format!("Invalid stored balance '{raw}': {e}")))?,
            None => 0.0,
        };
        let currency = store
            .get(KEY_CURRENCY)
            .unwrap_or_else(|| Wallet::default().currency);

        let transactions: Vec<Transaction> = match transactions_raw {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| CoreError::Storage(format!("Invalid stored transactions: {e}")))?,
            None => Vec::new(),
        };
        let achievements: BTreeSet<Achievement> = match store.get(KEY_ACHIEVEMENTS) {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| CoreError::Storage(format!("Invalid stored achievements: {e}")))?,
            None => BTreeSet::new(),
        };
        let budget: Option<Budget> = match store.get(KEY_BUDGET) {
            Some(raw) => Some(
                serde_json::from_str(&raw)
                    .map_err(|e| CoreError::Storage(format!("Invalid stored budget: {e}")))?,
            ),
            None => None,
        };
        let savings_goal = match store.get(KEY_SAVINGS_GOAL) {
            Some(raw) => Some(raw.parse::<f64>().map_err(|e| {
                CoreError::Storage(format!("Invalid stored savings goal '{raw}': {e}"))
            })?),
            None => None,
        };
        let recurring: Vec<RecurringTransaction> = match store.get(KEY_RECURRING) {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| CoreError::Storage(format!("Invalid stored recurring entries: {e}")))?,
            None => Vec::new(),
        };
        let cards: Vec<BankCard> = match store.get(KEY_CARDS) {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| CoreError::Storage(format!("Invalid stored cards: {e}")))?,
            None => Vec::new(),
        };

        Ok(Some(Wallet {
            balance,
            currency,
            transactions,
            achievements,
            budget,
            savings_goal,
            recurring,
            cards,
        }))
    }
}
