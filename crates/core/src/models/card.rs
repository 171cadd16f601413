use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card network, detected from the leading digits of the card number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardProvider {
    Visa,
    Mastercard,
    UnionPay,
    Amex,
    Unknown,
}

impl CardProvider {
    /// Detect the network from a digits-only card number.
    #[must_use]
    pub fn detect(number: &str) -> Self {
        let prefix2: &str = number.get(..2).unwrap_or("");
        if number.starts_with('4') {
            CardProvider::Visa
        } else if matches!(prefix2, "51" | "52" | "53" | "54" | "55") {
            CardProvider::Mastercard
        } else if prefix2 == "62" {
            CardProvider::UnionPay
        } else if matches!(prefix2, "34" | "37") {
            CardProvider::Amex
        } else {
            CardProvider::Unknown
        }
    }
}

impl std::fmt::Display for CardProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardProvider::Visa => write!(f, "Visa"),
            CardProvider::Mastercard => write!(f, "Mastercard"),
            CardProvider::UnionPay => write!(f, "UnionPay"),
            CardProvider::Amex => write!(f, "Amex"),
            CardProvider::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A stored mock bank card. The number is kept digits-only; masking and
/// display formatting are left to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankCard {
    pub id: Uuid,
    pub holder: String,
    pub number: String,
    /// Expiry as entered, e.g. "12/27"
    pub expiry: String,
    pub provider: CardProvider,
}

impl BankCard {
    /// Build a stored card from a draft, assigning a fresh id and
    /// detecting the provider from the number.
    pub fn from_draft(draft: CardDraft) -> Self {
        let provider = CardProvider::detect(&draft.number);
        Self {
            id: Uuid::new_v4(),
            holder: draft.holder,
            number: draft.number,
            expiry: draft.expiry,
            provider,
        }
    }

    /// Last four digits, for masked display.
    #[must_use]
    pub fn last_four(&self) -> &str {
        let len = self.number.len();
        &self.number[len.saturating_sub(4)..]
    }
}

/// Card input before an id has been assigned. `number` should contain
/// digits only; the ledger service strips spaces and validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDraft {
    pub holder: String,
    pub number: String,
    pub expiry: String,
}
