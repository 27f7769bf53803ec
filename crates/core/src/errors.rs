use thiserror::Error;

/// Unified error type for the entire pos-analytics-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The aggregation operations themselves never fail: empty input, missing
/// payment methods and a zero growth baseline all resolve to defined values.
/// Errors only come from configuration, record validation and JSON interchange.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid analytics settings: {0}")]
    InvalidSettings(String),

    // ── Input records ───────────────────────────────────────────────
    #[error("Transaction validation failed: {0}")]
    ValidationError(String),

    // ── JSON interchange ────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
