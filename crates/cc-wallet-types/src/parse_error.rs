use thiserror::Error;

/// Errors you can get while parsing identifiers and hex encoded values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The value was not valid hex.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded value had the wrong length.
    #[error("wrong length, expected {expected} bytes but found {found}")]
    WrongLength { expected: usize, found: usize },

    /// A coin id was missing the `:` between the txid and output index.
    #[error("missing separator in coin id {0:?}")]
    MissingSeparator(String),

    /// The output index of a coin id was not a valid number.
    #[error("invalid output index {0:?}")]
    InvalidOutputIndex(String),
}
