use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// Closed set of expense categories, with `Other` as the escape hatch
/// for anything outside the fixed list. Unknown strings in imported data
/// fall back to `Other` instead of failing the import.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum Category {
    Shopping,
    Restaurants,
    Transport,
    Entertainment,
    Other,
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Shopping" => Category::Shopping,
            "Restaurants" => Category::Restaurants,
            "Transport" => Category::Transport,
            "Entertainment" => Category::Entertainment,
            _ => Category::Other,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Shopping => write!(f, "Shopping"),
            Category::Restaurants => write!(f, "Restaurants"),
            Category::Transport => write!(f, "Transport"),
            Category::Entertainment => write!(f, "Entertainment"),
            Category::Other => write!(f, "Other"),
        }
    }
}

/// A single income/expense entry in the ledger.
///
/// **Important**: `amount` is always a positive magnitude. The sign is
/// carried by `kind` — use [`Transaction::signed_amount`] when applying
/// a transaction to the balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned at creation, immutable thereafter
    pub id: Uuid,

    /// Display label (never empty)
    pub name: String,

    /// Positive magnitude; sign comes from `kind`
    pub amount: f64,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Expense category; ignored for income transactions
    #[serde(default)]
    pub category: Option<Category>,

    /// User-settable instant, not necessarily the recording time
    pub date: DateTime<Utc>,

    /// Optional free-text memo
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Build a stored transaction from a draft, assigning a fresh id.
    /// Income transactions never carry a category.
    pub fn from_draft(draft: TransactionDraft) -> Self {
        let category = match draft.kind {
            TransactionKind::Income => None,
            TransactionKind::Expense => draft.category,
        };
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            amount: draft.amount,
            kind: draft.kind,
            category,
            date: draft.date,
            description: draft.description,
        }
    }

    /// The amount with sign applied per kind: positive for income,
    /// negative for expense.
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Transaction input before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Option<Category>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
            category: None,
            date,
            description: None,
        }
    }

    /// Attach an expense category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach a free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A recurring income/expense template (e.g., rent, salary).
///
/// Recurring entries are bookkeeping only — they are never materialized
/// into the ledger automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// How often a recurring transaction repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// Recurring transaction input before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDraft {
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}
