use std::future::Future;

use cc_wallet_types::Txid;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// What the wallet knows about the state of a transaction on chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum TxStatus {
    #[default]
    Unknown,
    Unconfirmed,
    Confirmed {
        height: u32,
    },
    Invalid,
}

impl TxStatus {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed { .. } => "confirmed",
            Self::Invalid => "invalid",
        }
    }

    pub(crate) fn height(self) -> Option<u32> {
        match self {
            Self::Confirmed { height } => Some(height),
            _ => None,
        }
    }

    pub(crate) fn from_parts(name: &str, height: Option<u32>) -> Result<Self, StoreError> {
        Ok(match (name, height) {
            ("unknown", _) => Self::Unknown,
            ("unconfirmed", _) => Self::Unconfirmed,
            ("confirmed", Some(height)) => Self::Confirmed { height },
            ("invalid", _) => Self::Invalid,
            _ => return Err(StoreError::InvalidStatus(name.to_string())),
        })
    }
}

/// A serialized transaction along with its last known status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTxRecord {
    pub txid: Txid,
    pub raw: Vec<u8>,
    pub status: TxStatus,
}

impl RawTxRecord {
    pub fn new(txid: Txid, raw: Vec<u8>, status: TxStatus) -> Self {
        Self { txid, raw, status }
    }
}

/// Keeps the raw transactions relevant to the wallet.
pub trait RawTxStore {
    /// Adds a transaction, replacing any earlier record with the same id.
    fn add_raw_tx(&self, record: RawTxRecord)
        -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Gets a transaction by its id.
    fn raw_tx(
        &self,
        txid: Txid,
    ) -> impl Future<Output = Result<Option<RawTxRecord>, StoreError>> + Send;

    /// Updates the status of a known transaction.
    fn set_tx_status(
        &self,
        txid: Txid,
        status: TxStatus,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Gets every transaction, in the order they were added.
    fn raw_txs(&self) -> impl Future<Output = Result<Vec<RawTxRecord>, StoreError>> + Send;
}
