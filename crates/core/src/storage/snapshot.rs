use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::CoreError;
use crate::models::achievement::Achievement;
use crate::models::transaction::Transaction;
use crate::models::wallet::Wallet;

/// The portable state document: export file, import payload, and
/// device-transfer QR content all share this shape.
///
/// `achievements` is optional on plain export files but required in
/// transfer payloads — see [`Snapshot::parse_transfer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub balance: f64,
    pub currency: String,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub achievements: BTreeSet<Achievement>,
}

impl Snapshot {
    pub fn from_wallet(wallet: &Wallet) -> Self {
        Self {
            balance: wallet.balance,
            currency: wallet.currency.clone(),
            transactions: wallet.transactions.clone(),
            achievements: wallet.achievements.clone(),
        }
    }

    /// Overwrite the snapshot-covered portion of a wallet.
    ///
    /// The balance is applied as-is, never re-derived from the imported
    /// transaction log: exporters are responsible for internal
    /// consistency, and re-deriving here would silently diverge from
    /// what the export produced. Budget, goal, recurring entries, and
    /// cards are outside the snapshot and stay untouched.
    pub fn apply(self, wallet: &mut Wallet) {
        wallet.balance = self.balance;
        wallet.currency = self.currency;
        wallet.transactions = self.transactions;
        wallet.achievements = self.achievements;
    }

    /// Pretty JSON for the export file download.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    /// Compact JSON for the device-transfer QR payload.
    pub fn to_transfer_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    /// Parse an export/import document. Presence checks only, no
    /// cross-validation of balance against the transaction log.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|e| CoreError::Import(e.to_string()))
    }

    /// Parse a device-transfer payload. Same shape as the export format,
    /// but all four fields must be present, matching the scanner's
    /// checks. Parsing never applies anything — the caller confirms with
    /// the user first and then imports.
    pub fn parse_transfer(json: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CoreError::Import(e.to_string()))?;

        for field in ["balance", "currency", "transactions", "achievements"] {
            if value.get(field).is_none() {
                return Err(CoreError::Import(format!("Missing field '{field}'")));
            }
        }

        serde_json::from_value(value).map_err(|e| CoreError::Import(e.to_string()))
    }
}
