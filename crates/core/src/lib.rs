pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use models::{
    achievement::Achievement,
    analytics::{BudgetStatus, ReportFilter, SpendingReport},
    budget::{Budget, BudgetPeriod},
    card::{BankCard, CardDraft},
    transaction::{RecurringDraft, RecurringTransaction, Transaction, TransactionDraft},
    wallet::Wallet,
};
use services::{
    achievement_service::AchievementService, analytics_service::AnalyticsService,
    ledger_service::LedgerService,
};
use storage::{keyvalue::KeyValueStore, manager::StorageManager, snapshot::Snapshot};

use errors::CoreError;

/// Result of adding a transaction: the assigned id plus the one-shot
/// unlock signal for the UI to celebrate. `newly_unlocked` is
/// edge-triggered — an achievement appears here exactly once, when its
/// rule first becomes true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerUpdate {
    pub id: Uuid,
    pub newly_unlocked: Vec<Achievement>,
}

/// Main entry point for the Expense Tracker core library.
///
/// Owns the wallet state and the services that operate on it, and keeps
/// the balance invariant (`balance == initial balance + Σ signed
/// amounts`) across every mutation. Each mutation validates, applies
/// atomically, re-evaluates achievements, and persists the full state
/// through the injected [`KeyValueStore`].
///
/// Persistence is fire-and-forget: a failing save is logged and the
/// in-memory state stays authoritative — business logic never blocks on
/// storage acknowledgement.
#[must_use]
pub struct ExpenseTracker<S: KeyValueStore> {
    wallet: Wallet,
    ledger_service: LedgerService,
    achievement_service: AchievementService,
    analytics_service: AnalyticsService,
    store: S,
}

impl<S: KeyValueStore> std::fmt::Debug for ExpenseTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseTracker")
            .field("transactions", &self.wallet.transactions.len())
            .field("balance", &self.wallet.balance)
            .field("currency", &self.wallet.currency)
            .field("achievements", &self.wallet.achievements.len())
            .finish()
    }
}

impl<S: KeyValueStore> ExpenseTracker<S> {
    /// Open a tracker backed by `store`, loading any previously saved
    /// wallet or starting fresh. A corrupt store is an error — existing
    /// data is never silently discarded.
    pub fn open(store: S) -> Result<Self, CoreError> {
        let wallet = StorageManager::load(&store)?.unwrap_or_default();
        Ok(Self::build(wallet, store))
    }

    // ── Ledger Operations ───────────────────────────────────────────

    /// Overwrite balance and currency; the transaction log is untouched.
    ///
    /// Intended for onboarding, but later calls behave the same way:
    /// a direct overwrite, not an adjustment. Negative amounts are
    /// allowed (starting in debt).
    pub fn set_initial_balance(
        &mut self,
        amount: f64,
        currency: &str,
    ) -> Result<Vec<Achievement>, CoreError> {
        self.ledger_service
            .set_initial_balance(&mut self.wallet, amount, currency)?;
        let newly = self.unlock_achievements();
        self.persist();
        Ok(newly)
    }

    /// Validate and append a new transaction, apply its signed amount to
    /// the balance, and re-evaluate achievements.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<LedgerUpdate, CoreError> {
        let id = self.ledger_service.add_transaction(&mut self.wallet, draft)?;
        let newly_unlocked = self.unlock_achievements();
        self.persist();
        Ok(LedgerUpdate { id, newly_unlocked })
    }

    /// Replace an existing transaction by id, adjusting the balance by
    /// the signed-amount delta. Fails with `TransactionNotFound` (state
    /// untouched) when the id is unknown.
    pub fn update_transaction(
        &mut self,
        updated: Transaction,
    ) -> Result<Vec<Achievement>, CoreError> {
        self.ledger_service
            .update_transaction(&mut self.wallet, updated)?;
        let newly = self.unlock_achievements();
        self.persist();
        Ok(newly)
    }

    /// Remove a transaction and reverse its balance contribution.
    /// Deleting an unknown id is a silent no-op (idempotent delete).
    pub fn delete_transaction(&mut self, id: Uuid) -> Vec<Achievement> {
        if !self.ledger_service.delete_transaction(&mut self.wallet, id) {
            return Vec::new();
        }
        let newly = self.unlock_achievements();
        self.persist();
        newly
    }

    // ── Budget & Savings Goal ───────────────────────────────────────

    /// Set the advisory spending budget.
    pub fn set_budget(&mut self, amount: f64, period: BudgetPeriod) -> Result<(), CoreError> {
        self.ledger_service
            .set_budget(&mut self.wallet, amount, period)?;
        self.persist();
        Ok(())
    }

    pub fn clear_budget(&mut self) {
        self.ledger_service.clear_budget(&mut self.wallet);
        self.persist();
    }

    /// Set a savings goal; the target must exceed the current balance.
    pub fn set_savings_goal(&mut self, goal: f64) -> Result<(), CoreError> {
        self.ledger_service.set_savings_goal(&mut self.wallet, goal)?;
        self.persist();
        Ok(())
    }

    pub fn clear_savings_goal(&mut self) {
        self.ledger_service.clear_savings_goal(&mut self.wallet);
        self.persist();
    }

    // ── Recurring Transactions ──────────────────────────────────────

    /// Add a recurring template (bookkeeping only, never posted to the
    /// ledger automatically).
    pub fn add_recurring(&mut self, draft: RecurringDraft) -> Result<Uuid, CoreError> {
        let id = self.ledger_service.add_recurring(&mut self.wallet, draft)?;
        self.persist();
        Ok(id)
    }

    /// Remove a recurring template; no-op on unknown id.
    pub fn delete_recurring(&mut self, id: Uuid) -> bool {
        let removed = self.ledger_service.delete_recurring(&mut self.wallet, id);
        if removed {
            self.persist();
        }
        removed
    }

    // ── Bank Cards ──────────────────────────────────────────────────

    /// Store a mock bank card; provider is detected from the number.
    pub fn add_card(&mut self, draft: CardDraft) -> Result<Uuid, CoreError> {
        let id = self.ledger_service.add_card(&mut self.wallet, draft)?;
        self.persist();
        Ok(id)
    }

    /// Replace an existing card. Fails with `CardNotFound` when the id
    /// is unknown.
    pub fn update_card(&mut self, updated: BankCard) -> Result<(), CoreError> {
        self.ledger_service.update_card(&mut self.wallet, updated)?;
        self.persist();
        Ok(())
    }

    /// Remove a card; no-op on unknown id.
    pub fn delete_card(&mut self, id: Uuid) -> bool {
        let removed = self.ledger_service.delete_card(&mut self.wallet, id);
        if removed {
            self.persist();
        }
        removed
    }

    // ── Export / Import / Device Transfer ───────────────────────────

    /// Current state as a portable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_wallet(&self.wallet)
    }

    /// Export the snapshot as pretty JSON (the download file content).
    pub fn export_json(&self) -> Result<String, CoreError> {
        self.snapshot().to_json()
    }

    /// Compact snapshot JSON for the device-transfer QR code.
    pub fn transfer_payload(&self) -> Result<String, CoreError> {
        self.snapshot().to_transfer_json()
    }

    /// Wholesale replace balance, currency, transactions, and
    /// achievements from a snapshot.
    ///
    /// The imported balance is trusted as-is and never recomputed from
    /// the imported log — importers own internal consistency. This is
    /// the sanctioned reset/restore path; it is also the only operation
    /// that can shrink the achievement set.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) {
        snapshot.apply(&mut self.wallet);
        self.persist();
    }

    /// Parse and import an export-format JSON document. Malformed
    /// payloads fail with `CoreError::Import` and leave state unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<(), CoreError> {
        let snapshot = Snapshot::from_json(json)?;
        self.import_snapshot(snapshot);
        Ok(())
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Spending report over the filtered window, measured back from now.
    #[must_use]
    pub fn report(&self, filter: &ReportFilter) -> SpendingReport {
        self.report_at(filter, Utc::now())
    }

    /// Same as [`Self::report`] with an explicit "now" (deterministic
    /// for tests and replays).
    #[must_use]
    pub fn report_at(&self, filter: &ReportFilter, now: DateTime<Utc>) -> SpendingReport {
        self.analytics_service
            .report(&self.wallet.transactions, filter, now)
    }

    /// Budget check against the period-windowed expense sum; `None`
    /// when no budget is set.
    #[must_use]
    pub fn budget_status(&self) -> Option<BudgetStatus> {
        self.budget_status_at(Utc::now())
    }

    #[must_use]
    pub fn budget_status_at(&self, now: DateTime<Utc>) -> Option<BudgetStatus> {
        self.analytics_service.budget_status(&self.wallet, now)
    }

    // ── Read Accessors ──────────────────────────────────────────────

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.wallet.balance
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.wallet.currency
    }

    /// Transaction log in storage order (newest-first insertion).
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.wallet.transactions
    }

    /// Transactions in display order: date descending, ties broken by
    /// insertion order. Every view layer goes through this one
    /// derivation so they all agree on tie-breaks.
    #[must_use]
    pub fn transactions_sorted(&self) -> Vec<&Transaction> {
        self.ledger_service.display_order(&self.wallet)
    }

    /// Look up a single transaction by id.
    #[must_use]
    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.wallet.transactions.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.wallet.transactions.len()
    }

    /// Unlocked achievements, in stable id order.
    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        self.wallet.achievements.iter().copied().collect()
    }

    #[must_use]
    pub fn budget(&self) -> Option<&Budget> {
        self.wallet.budget.as_ref()
    }

    #[must_use]
    pub fn savings_goal(&self) -> Option<f64> {
        self.wallet.savings_goal
    }

    #[must_use]
    pub fn recurring(&self) -> &[RecurringTransaction] {
        &self.wallet.recurring
    }

    #[must_use]
    pub fn cards(&self) -> &[BankCard] {
        &self.wallet.cards
    }

    /// The backing store (hosts flushing to their own medium read from
    /// here; tests inspect the persisted layout).
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(wallet: Wallet, store: S) -> Self {
        Self {
            wallet,
            ledger_service: LedgerService::new(),
            achievement_service: AchievementService::new(),
            analytics_service: AnalyticsService::new(),
            store,
        }
    }

    fn unlock_achievements(&mut self) -> Vec<Achievement> {
        let today = self.today();
        self.achievement_service.unlock(&mut self.wallet, today)
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Best-effort save of the full wallet. The mutation has already
    /// succeeded; a storage failure is logged, not surfaced.
    fn persist(&mut self) {
        if let Err(e) = StorageManager::save(&mut self.store, &self.wallet) {
            tracing::warn!(error = %e, "wallet persistence failed");
        }
    }
}
