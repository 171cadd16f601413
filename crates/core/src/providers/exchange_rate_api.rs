use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::RateProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://api.exchangerate-api.com/v4";

/// exchangerate-api.com provider for fiat currency exchange rates.
///
/// - **Free**: No API key required for the v4 latest endpoint.
/// - **Endpoint**: `/latest/{BASE}` returns all rates against the base.
pub struct ExchangeRateApiProvider {
    client: Client,
}

impl ExchangeRateApiProvider {
    pub fn new() -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for ExchangeRateApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── API response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct LatestResponse {
    rates: HashMap<String, f64>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        "ExchangeRateApi"
    }

    async fn latest_rates(&self, base: &str) -> Result<HashMap<String, f64>, CoreError> {
        let base = base.to_uppercase();
        let url = format!("{BASE_URL}/latest/{base}");

        let resp: LatestResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "ExchangeRateApi".into(),
                message: format!("Failed to parse rates for base {base}: {e}"),
            })?;

        if resp.rates.is_empty() {
            return Err(CoreError::Api {
                provider: "ExchangeRateApi".into(),
                message: format!("No rates returned for base {base}"),
            });
        }

        Ok(resp.rates)
    }
}
