use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::budget::{Budget, BudgetPeriod};
use crate::models::card::{BankCard, CardDraft, CardProvider};
use crate::models::transaction::{
    RecurringDraft, RecurringTransaction, Transaction, TransactionDraft,
};
use crate::models::wallet::Wallet;

/// Manages the transaction log and keeps the balance consistent with it.
///
/// Pure business logic — no I/O. Every mutation either validates and
/// applies atomically (balance and log together) or rejects with the
/// wallet untouched.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Overwrite balance and currency without touching the transaction log.
    ///
    /// Negative amounts are allowed (starting in debt). Normally called
    /// once during onboarding, but a later call is a plain overwrite, not
    /// an adjustment.
    pub fn set_initial_balance(
        &self,
        wallet: &mut Wallet,
        amount: f64,
        currency: &str,
    ) -> Result<(), CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::Validation(
                "Balance must be a finite number".into(),
            ));
        }
        let trimmed = currency.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "Currency code must not be empty".into(),
            ));
        }
        wallet.balance = amount;
        wallet.currency = trimmed.to_string();
        Ok(())
    }

    /// Add a new transaction to the ledger.
    ///
    /// Assigns a fresh id, prepends to the log (storage order is
    /// newest-first), and applies the signed amount to the balance.
    pub fn add_transaction(
        &self,
        wallet: &mut Wallet,
        draft: TransactionDraft,
    ) -> Result<Uuid, CoreError> {
        validate_entry(&draft.name, draft.amount)?;

        let transaction = Transaction::from_draft(draft);
        let id = transaction.id;
        wallet.balance += transaction.signed_amount();
        wallet.transactions.insert(0, transaction);
        tracing::debug!(%id, balance = wallet.balance, "transaction added");
        Ok(id)
    }

    /// Replace an existing transaction, adjusting the balance by the
    /// difference between the new and old signed amounts.
    ///
    /// The delta must be computed before the entry is replaced — applying
    /// the new signed amount on its own would double-count the old one.
    /// Unknown ids fail with `TransactionNotFound` and leave the wallet
    /// untouched.
    pub fn update_transaction(
        &self,
        wallet: &mut Wallet,
        updated: Transaction,
    ) -> Result<(), CoreError> {
        validate_entry(&updated.name, updated.amount)?;

        let idx = wallet
            .transactions
            .iter()
            .position(|t| t.id == updated.id)
            .ok_or_else(|| CoreError::TransactionNotFound(updated.id.to_string()))?;

        let delta = updated.signed_amount() - wallet.transactions[idx].signed_amount();
        wallet.transactions[idx] = normalize_category(updated);
        wallet.balance += delta;
        tracing::debug!(delta, balance = wallet.balance, "transaction updated");
        Ok(())
    }

    /// Remove a transaction and reverse its signed contribution.
    ///
    /// Deleting an unknown id is a no-op (idempotent delete); returns
    /// whether anything was removed.
    pub fn delete_transaction(&self, wallet: &mut Wallet, id: Uuid) -> bool {
        let Some(idx) = wallet.transactions.iter().position(|t| t.id == id) else {
            return false;
        };
        let removed = wallet.transactions.remove(idx);
        wallet.balance -= removed.signed_amount();
        tracing::debug!(%id, balance = wallet.balance, "transaction deleted");
        true
    }

    /// Transactions in display order: date descending, ties broken by
    /// insertion order (stable sort over the newest-first log).
    ///
    /// This is the single source of truth for display order — view layers
    /// must not re-sort on their own.
    pub fn display_order<'a>(&self, wallet: &'a Wallet) -> Vec<&'a Transaction> {
        let mut transactions: Vec<&Transaction> = wallet.transactions.iter().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }

    // ── Budget & Savings Goal ───────────────────────────────────────

    /// Set the advisory spending budget.
    pub fn set_budget(
        &self,
        wallet: &mut Wallet,
        amount: f64,
        period: BudgetPeriod,
    ) -> Result<(), CoreError> {
        if !(amount > 0.0) || !amount.is_finite() {
            return Err(CoreError::Validation(
                "Budget amount must be positive".into(),
            ));
        }
        wallet.budget = Some(Budget { amount, period });
        Ok(())
    }

    pub fn clear_budget(&self, wallet: &mut Wallet) {
        wallet.budget = None;
    }

    /// Set the savings goal. The target must exceed the current balance —
    /// checked here at the boundary only, never re-validated if the
    /// balance later changes.
    pub fn set_savings_goal(&self, wallet: &mut Wallet, goal: f64) -> Result<(), CoreError> {
        if !(goal > 0.0) || !goal.is_finite() {
            return Err(CoreError::Validation("Goal must be positive".into()));
        }
        if goal <= wallet.balance {
            return Err(CoreError::Validation(format!(
                "Goal {goal} must exceed the current balance {}",
                wallet.balance
            )));
        }
        wallet.savings_goal = Some(goal);
        Ok(())
    }

    pub fn clear_savings_goal(&self, wallet: &mut Wallet) {
        wallet.savings_goal = None;
    }

    // ── Recurring Transactions ──────────────────────────────────────

    /// Add a recurring template. Templates are stored and listed only;
    /// nothing is ever posted to the ledger from them automatically.
    pub fn add_recurring(
        &self,
        wallet: &mut Wallet,
        draft: RecurringDraft,
    ) -> Result<Uuid, CoreError> {
        validate_entry(&draft.name, draft.amount)?;
        let entry = RecurringTransaction {
            id: Uuid::new_v4(),
            name: draft.name,
            amount: draft.amount,
            frequency: draft.frequency,
            kind: draft.kind,
        };
        let id = entry.id;
        wallet.recurring.push(entry);
        Ok(id)
    }

    /// Remove a recurring template; no-op on unknown id.
    pub fn delete_recurring(&self, wallet: &mut Wallet, id: Uuid) -> bool {
        let before = wallet.recurring.len();
        wallet.recurring.retain(|r| r.id != id);
        wallet.recurring.len() != before
    }

    // ── Bank Cards ──────────────────────────────────────────────────

    /// Store a mock bank card. The number is normalized to digits only
    /// and the provider detected from its prefix.
    pub fn add_card(&self, wallet: &mut Wallet, draft: CardDraft) -> Result<Uuid, CoreError> {
        let number = normalize_card_number(&draft.number)?;
        if draft.holder.trim().is_empty() {
            return Err(CoreError::Validation(
                "Card holder name must not be empty".into(),
            ));
        }
        let card = BankCard::from_draft(CardDraft { number, ..draft });
        let id = card.id;
        wallet.cards.push(card);
        Ok(id)
    }

    /// Replace an existing card; the provider is re-detected from the
    /// (possibly changed) number.
    pub fn update_card(&self, wallet: &mut Wallet, updated: BankCard) -> Result<(), CoreError> {
        let number = normalize_card_number(&updated.number)?;
        let idx = wallet
            .cards
            .iter()
            .position(|c| c.id == updated.id)
            .ok_or_else(|| CoreError::CardNotFound(updated.id.to_string()))?;
        wallet.cards[idx] = BankCard {
            provider: CardProvider::detect(&number),
            number,
            ..updated
        };
        Ok(())
    }

    /// Remove a card; no-op on unknown id.
    pub fn delete_card(&self, wallet: &mut Wallet, id: Uuid) -> bool {
        let before = wallet.cards.len();
        wallet.cards.retain(|c| c.id != id);
        wallet.cards.len() != before
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared boundary checks for transactions and recurring templates.
fn validate_entry(name: &str, amount: f64) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if !(amount > 0.0) || !amount.is_finite() {
        return Err(CoreError::Validation("Amount must be positive".into()));
    }
    Ok(())
}

/// Income entries never carry a category.
fn normalize_category(mut transaction: Transaction) -> Transaction {
    if transaction.kind == crate::models::transaction::TransactionKind::Income {
        transaction.category = None;
    }
    transaction
}

/// Strip spaces, require digits only, 12–19 of them.
fn normalize_card_number(raw: &str) -> Result<String, CoreError> {
    let number: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "Card number must contain digits only".into(),
        ));
    }
    if !(12..=19).contains(&number.len()) {
        return Err(CoreError::Validation(
            "Card number must be 12 to 19 digits".into(),
        ));
    }
    Ok(number)
}
