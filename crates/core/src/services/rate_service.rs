use chrono::Utc;
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::rates::ExchangeRates;
use crate::providers::exchange_rate_api::ExchangeRateApiProvider;
use crate::providers::traits::RateProvider;

/// Currencies shown alongside the base, matching the app's rate panel.
const DISPLAY_CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "JPY", "CNY"];

/// Fetches and holds exchange-rate snapshots for the wallet's currency.
///
/// Fully decoupled from the ledger: a failed refresh surfaces an error to
/// the caller and keeps the previous snapshot, it never touches wallet
/// state. Periodic polling (and stopping it on teardown) is the embedding
/// UI's job — this service only exposes a single `refresh` future.
pub struct RateService {
    provider: Box<dyn RateProvider>,
    latest: Option<ExchangeRates>,
}

impl RateService {
    /// Build with a custom provider (tests inject mocks here).
    pub fn new(provider: Box<dyn RateProvider>) -> Self {
        Self {
            provider,
            latest: None,
        }
    }

    /// Build with the default HTTP provider.
    pub fn with_default_provider() -> Self {
        Self::new(Box::new(ExchangeRateApiProvider::new()))
    }

    /// Fetch fresh rates for `base`, keeping only the display currencies
    /// (minus the base itself). On success the snapshot is retained and
    /// returned; on failure the previous snapshot stays in place.
    pub async fn refresh(&mut self, base: &str) -> Result<&ExchangeRates, CoreError> {
        let base = base.trim().to_uppercase();
        if base.is_empty() {
            return Err(CoreError::Validation(
                "Base currency must not be empty".into(),
            ));
        }

        let all_rates = self.provider.latest_rates(&base).await?;

        let mut rates = BTreeMap::new();
        for code in DISPLAY_CURRENCIES {
            if code == base {
                continue;
            }
            if let Some(rate) = all_rates.get(code) {
                rates.insert(code.to_string(), *rate);
            }
        }

        let snapshot = ExchangeRates {
            base,
            rates,
            fetched_at: Utc::now(),
        };
        Ok(self.latest.insert(snapshot))
    }

    /// Most recent successful snapshot, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&ExchangeRates> {
        self.latest.as_ref()
    }

    /// Name of the underlying provider (for logs/errors).
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
