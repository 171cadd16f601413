use thiserror::Error;

/// Unified error type for the entire expense-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Nothing in here is fatal: every error leaves the wallet in its
/// last-known-good state.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger / Business Logic ─────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    // ── Import / Export ─────────────────────────────────────────────
    #[error("Invalid import payload: {0}")]
    Import(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Persistence ─────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        CoreError::Network(e.to_string())
    }
}
