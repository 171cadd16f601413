use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of exchange rates for one base currency.
///
/// Kept entirely outside the wallet: a failed or stale refresh never
/// affects ledger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// Base currency the rates are quoted against
    pub base: String,
    /// Target currency code → units per 1 unit of base
    pub rates: BTreeMap<String, f64>,
    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRates {
    /// Rate for a single target currency, if present in the snapshot.
    #[must_use]
    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.rates.get(&currency.to_uppercase()).copied()
    }
}
