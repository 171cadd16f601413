// ═══════════════════════════════════════════════════════════════════
// Model Tests — Transaction, Category, Achievement, BankCard, Wallet
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, TimeZone, Utc};

use expense_tracker_core::models::achievement::Achievement;
use expense_tracker_core::models::budget::BudgetPeriod;
use expense_tracker_core::models::card::{BankCard, CardDraft, CardProvider};
use expense_tracker_core::models::transaction::{
    Category, Transaction, TransactionDraft, TransactionKind,
};
use expense_tracker_core::models::wallet::Wallet;

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn from_draft_assigns_unique_ids() {
        let draft = TransactionDraft::new("Coffee", 4.5, TransactionKind::Expense, date(2025, 3, 1));
        let a = Transaction::from_draft(draft.clone());
        let b = Transaction::from_draft(draft);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn from_draft_keeps_fields() {
        let draft = TransactionDraft::new("Salary", 3000.0, TransactionKind::Income, date(2025, 3, 1))
            .with_description("March paycheck");
        let t = Transaction::from_draft(draft);
        assert_eq!(t.name, "Salary");
        assert_eq!(t.amount, 3000.0);
        assert_eq!(t.kind, TransactionKind::Income);
        assert_eq!(t.description.as_deref(), Some("March paycheck"));
    }

    #[test]
    fn income_never_carries_a_category() {
        let draft = TransactionDraft::new("Salary", 3000.0, TransactionKind::Income, date(2025, 3, 1))
            .with_category(Category::Shopping);
        let t = Transaction::from_draft(draft);
        assert_eq!(t.category, None);
    }

    #[test]
    fn expense_keeps_its_category() {
        let draft = TransactionDraft::new("Lunch", 12.0, TransactionKind::Expense, date(2025, 3, 1))
            .with_category(Category::Restaurants);
        let t = Transaction::from_draft(draft);
        assert_eq!(t.category, Some(Category::Restaurants));
    }

    #[test]
    fn signed_amount_positive_for_income() {
        let t = Transaction::from_draft(TransactionDraft::new(
            "Salary",
            3000.0,
            TransactionKind::Income,
            date(2025, 3, 1),
        ));
        assert_eq!(t.signed_amount(), 3000.0);
    }

    #[test]
    fn signed_amount_negative_for_expense() {
        let t = Transaction::from_draft(TransactionDraft::new(
            "Rent",
            1200.0,
            TransactionKind::Expense,
            date(2025, 3, 1),
        ));
        assert_eq!(t.signed_amount(), -1200.0);
    }

    #[test]
    fn serde_uses_type_field_and_iso_date() {
        let t = Transaction::from_draft(
            TransactionDraft::new("Lunch", 12.0, TransactionKind::Expense, date(2025, 3, 1))
                .with_category(Category::Transport),
        );
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        assert!(json.contains("2025-03-01T12:00:00Z"));
        assert!(json.contains("\"Transport\""));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Category
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn known_names_round_trip() {
        for (cat, name) in [
            (Category::Shopping, "\"Shopping\""),
            (Category::Restaurants, "\"Restaurants\""),
            (Category::Transport, "\"Transport\""),
            (Category::Entertainment, "\"Entertainment\""),
            (Category::Other, "\"Other\""),
        ] {
            assert_eq!(serde_json::to_string(&cat).unwrap(), name);
            let back: Category = serde_json::from_str(name).unwrap();
            assert_eq!(back, cat);
        }
    }

    #[test]
    fn unknown_name_falls_back_to_other() {
        let cat: Category = serde_json::from_str("\"Groceries\"").unwrap();
        assert_eq!(cat, Category::Other);
    }

    #[test]
    fn display_matches_serde_name() {
        assert_eq!(Category::Restaurants.to_string(), "Restaurants");
        assert_eq!(Category::Other.to_string(), "Other");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Achievement
// ═══════════════════════════════════════════════════════════════════

mod achievement {
    use super::*;

    #[test]
    fn serde_ids_match_exported_data() {
        assert_eq!(
            serde_json::to_string(&Achievement::FirstTransaction).unwrap(),
            "\"first_transaction\""
        );
        assert_eq!(
            serde_json::to_string(&Achievement::BigSpender).unwrap(),
            "\"big_spender\""
        );
        let back: Achievement = serde_json::from_str("\"transaction_streak\"").unwrap();
        assert_eq!(back, Achievement::TransactionStreak);
    }

    #[test]
    fn id_matches_display() {
        for a in Achievement::ALL {
            assert_eq!(a.to_string(), a.id());
        }
    }

    #[test]
    fn all_lists_every_achievement_once() {
        let mut ids: Vec<&str> = Achievement::ALL.iter().map(|a| a.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}

// ═══════════════════════════════════════════════════════════════════
// BankCard
// ═══════════════════════════════════════════════════════════════════

mod bank_card {
    use super::*;

    #[test]
    fn provider_detection_by_prefix() {
        assert_eq!(CardProvider::detect("4111111111111111"), CardProvider::Visa);
        assert_eq!(CardProvider::detect("5212345678901234"), CardProvider::Mastercard);
        assert_eq!(CardProvider::detect("6212345678901234"), CardProvider::UnionPay);
        assert_eq!(CardProvider::detect("371234567890123"), CardProvider::Amex);
        assert_eq!(CardProvider::detect("9912345678901234"), CardProvider::Unknown);
    }

    #[test]
    fn from_draft_detects_provider() {
        let card = BankCard::from_draft(CardDraft {
            holder: "Wei Chen".into(),
            number: "4111111111111111".into(),
            expiry: "12/27".into(),
        });
        assert_eq!(card.provider, CardProvider::Visa);
        assert_eq!(card.last_four(), "1111");
    }

    #[test]
    fn last_four_on_short_numbers() {
        let mut card = BankCard::from_draft(CardDraft {
            holder: "Wei Chen".into(),
            number: "123456789012".into(),
            expiry: "01/30".into(),
        });
        assert_eq!(card.last_four(), "9012");
        card.number = "12".into();
        assert_eq!(card.last_four(), "12");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Wallet & misc
// ═══════════════════════════════════════════════════════════════════

mod wallet {
    use super::*;

    #[test]
    fn default_wallet_is_empty_cny() {
        let w = Wallet::default();
        assert_eq!(w.balance, 0.0);
        assert_eq!(w.currency, "CNY");
        assert!(w.transactions.is_empty());
        assert!(w.achievements.is_empty());
        assert!(w.budget.is_none());
        assert!(w.savings_goal.is_none());
        assert!(w.recurring.is_empty());
        assert!(w.cards.is_empty());
    }

    #[test]
    fn budget_period_window_days() {
        assert_eq!(BudgetPeriod::Daily.window_days(), 1);
        assert_eq!(BudgetPeriod::Weekly.window_days(), 7);
        assert_eq!(BudgetPeriod::Monthly.window_days(), 30);
    }

    #[test]
    fn wallet_deserializes_without_optional_sections() {
        // Data saved by older versions has only the core trio of fields.
        let json = r#"{"balance": 12.5, "currency": "EUR", "transactions": []}"#;
        let w: Wallet = serde_json::from_str(json).unwrap();
        assert_eq!(w.balance, 12.5);
        assert!(w.achievements.is_empty());
        assert!(w.cards.is_empty());
    }
}
