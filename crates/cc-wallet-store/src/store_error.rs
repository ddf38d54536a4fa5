use cc_wallet_types::ParseError;
use thiserror::Error;

/// An error that can occur while reading from or writing to a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error occurred while interacting with the SQLite database.
    #[error("sqlite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored value could not be encoded or decoded as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored identifier could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The requested record was not found in the store.
    #[error("record not found")]
    NotFound,

    /// A stored transaction status was not recognized.
    #[error("invalid transaction status {0:?}")]
    InvalidStatus(String),
}
