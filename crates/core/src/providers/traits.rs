use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;

/// Trait abstraction for exchange-rate providers.
///
/// The shipped implementation talks to exchangerate-api.com; if that API
/// stops working or changes, only that one implementation is replaced —
/// the rest of the codebase (and every test, via mocks) is untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest rates for a base currency: target code → units per 1 base.
    async fn latest_rates(&self, base: &str) -> Result<HashMap<String, f64>, CoreError>;
}
