use serde::{Deserialize, Serialize};

use crate::{CoinId, Script, Txid};

/// The raw record of an unspent output, as exchanged with storage and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawCoin {
    pub txid: Txid,
    pub oidx: u32,
    pub value: u64,
    pub script: Script,
}

impl RawCoin {
    pub fn new(txid: Txid, oidx: u32, value: u64, script: Script) -> Self {
        Self {
            txid,
            oidx,
            value,
            script,
        }
    }

    pub fn coin_id(&self) -> CoinId {
        CoinId::new(self.txid, self.oidx)
    }
}
