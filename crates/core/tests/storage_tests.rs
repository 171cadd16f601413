// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryStore, FileStore, StorageManager, Snapshot
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};

use expense_tracker_core::models::budget::{Budget, BudgetPeriod};
use expense_tracker_core::models::transaction::{
    Category, Transaction, TransactionDraft, TransactionKind,
};
use expense_tracker_core::models::wallet::Wallet;
use expense_tracker_core::storage::keyvalue::{KeyValueStore, MemoryStore};
use expense_tracker_core::storage::manager::{
    StorageManager, KEY_ACHIEVEMENTS, KEY_BALANCE, KEY_BUDGET, KEY_CURRENCY, KEY_SAVINGS_GOAL,
    KEY_TRANSACTIONS,
};
use expense_tracker_core::storage::snapshot::Snapshot;

fn sample_wallet() -> Wallet {
    let mut wallet = Wallet {
        balance: 500.0,
        currency: "EUR".into(),
        ..Wallet::default()
    };
    wallet.transactions.push(Transaction::from_draft(
        TransactionDraft::new(
            "Groceries",
            80.0,
            TransactionKind::Expense,
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        )
        .with_category(Category::Shopping),
    ));
    wallet
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("balance", "100");
        assert_eq!(store.get("balance").as_deref(), Some("100"));
        assert_eq!(store.len(), 1);

        store.set("balance", "250");
        assert_eq!(store.get("balance").as_deref(), Some("250"));
        assert_eq!(store.len(), 1);

        store.remove("balance");
        assert_eq!(store.get("balance"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn remove_missing_key_is_a_noop() {
        let mut store = MemoryStore::new();
        store.remove("nothing");
        assert!(store.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod storage_manager {
    use super::*;

    #[test]
    fn load_from_empty_store_is_none() {
        let store = MemoryStore::new();
        assert_eq!(StorageManager::load(&store).unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut wallet = sample_wallet();
        wallet.budget = Some(Budget {
            amount: 300.0,
            period: BudgetPeriod::Weekly,
        });
        wallet.savings_goal = Some(2000.0);

        let mut store = MemoryStore::new();
        StorageManager::save(&mut store, &wallet).unwrap();

        let loaded = StorageManager::load(&store).unwrap().unwrap();
        assert_eq!(loaded, wallet);
    }

    #[test]
    fn key_layout_matches_original_storage() {
        let wallet = sample_wallet();
        let mut store = MemoryStore::new();
        StorageManager::save(&mut store, &wallet).unwrap();

        // Scalars are plain strings, collections JSON arrays.
        assert_eq!(store.get(KEY_BALANCE).as_deref(), Some("500"));
        assert_eq!(store.get(KEY_CURRENCY).as_deref(), Some("EUR"));
        assert!(store.get(KEY_TRANSACTIONS).unwrap().starts_with('['));
        assert_eq!(store.get(KEY_ACHIEVEMENTS).as_deref(), Some("[]"));

        // Unset optional sections are absent, not empty markers.
        assert_eq!(store.get(KEY_BUDGET), None);
        assert_eq!(store.get(KEY_SAVINGS_GOAL), None);
    }

    #[test]
    fn saving_clears_stale_optional_sections() {
        let mut wallet = sample_wallet();
        wallet.savings_goal = Some(1500.0);

        let mut store = MemoryStore::new();
        StorageManager::save(&mut store, &wallet).unwrap();
        assert!(store.get(KEY_SAVINGS_GOAL).is_some());

        wallet.savings_goal = None;
        StorageManager::save(&mut store, &wallet).unwrap();
        assert_eq!(store.get(KEY_SAVINGS_GOAL), None);
    }

    #[test]
    fn missing_currency_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(KEY_BALANCE, "42");

        let loaded = StorageManager::load(&store).unwrap().unwrap();
        assert_eq!(loaded.balance, 42.0);
        assert_eq!(loaded.currency, "CNY");
        assert!(loaded.transactions.is_empty());
    }

    #[test]
    fn corrupt_balance_is_a_hard_error() {
        let mut store = MemoryStore::new();
        store.set(KEY_BALANCE, "not-a-number");

        let err = StorageManager::load(&store).unwrap_err();
        assert!(err.to_string().contains("Invalid stored balance"));
    }

    #[test]
    fn corrupt_transactions_are_a_hard_error() {
        let mut store = MemoryStore::new();
        store.set(KEY_BALANCE, "10");
        store.set(KEY_TRANSACTIONS, "{broken");

        let err = StorageManager::load(&store).unwrap_err();
        assert!(err.to_string().contains("Invalid stored transactions"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use super::*;
    use expense_tracker_core::storage::file::FileStore;

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("wallet.json")).unwrap();
        assert_eq!(store.get("balance"), None);
    }

    #[test]
    fn writes_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("balance", "123.5");
        store.set("currency", "USD");
        store.remove("currency");
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("balance").as_deref(), Some("123.5"));
        assert_eq!(reopened.get("currency"), None);
    }

    #[test]
    fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Corrupt store file"));
    }

    #[test]
    fn full_wallet_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.json");
        let wallet = sample_wallet();

        let mut store = FileStore::open(&path).unwrap();
        StorageManager::save(&mut store, &wallet).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        let loaded = StorageManager::load(&reopened).unwrap().unwrap();
        assert_eq!(loaded, wallet);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Snapshot (export / import / transfer formats)
// ═══════════════════════════════════════════════════════════════════

mod snapshot {
    use super::*;
    use expense_tracker_core::models::achievement::Achievement;

    #[test]
    fn export_json_round_trips() {
        let mut wallet = sample_wallet();
        wallet.achievements.insert(Achievement::FirstTransaction);

        let snapshot = Snapshot::from_wallet(&wallet);
        let json = snapshot.to_json().unwrap();
        // Export files are pretty-printed.
        assert!(json.contains('\n'));

        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn transfer_payload_is_compact() {
        let snapshot = Snapshot::from_wallet(&sample_wallet());
        let json = snapshot.to_transfer_json().unwrap();
        assert!(!json.contains('\n'));

        let back = Snapshot::parse_transfer(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn apply_trusts_the_imported_balance() {
        // Balance deliberately inconsistent with the (empty) log.
        let snapshot = Snapshot {
            balance: 9999.0,
            currency: "USD".into(),
            transactions: Vec::new(),
            achievements: Default::default(),
        };

        let mut wallet = sample_wallet();
        wallet.savings_goal = Some(2000.0);
        snapshot.apply(&mut wallet);

        assert_eq!(wallet.balance, 9999.0);
        assert_eq!(wallet.currency, "USD");
        assert!(wallet.transactions.is_empty());
        // Fields outside the snapshot stay untouched.
        assert_eq!(wallet.savings_goal, Some(2000.0));
    }

    #[test]
    fn import_accepts_missing_achievements() {
        let json = r#"{"balance": 10.0, "currency": "CNY", "transactions": []}"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert!(snapshot.achievements.is_empty());
    }

    #[test]
    fn transfer_requires_every_field() {
        let json = r#"{"balance": 10.0, "currency": "CNY", "transactions": []}"#;
        let err = Snapshot::parse_transfer(json).unwrap_err();
        assert!(err.to_string().contains("Missing field 'achievements'"));
    }

    #[test]
    fn malformed_documents_are_import_errors() {
        assert!(Snapshot::from_json("{oops").is_err());
        assert!(Snapshot::parse_transfer("[1, 2, 3").is_err());
    }
}
