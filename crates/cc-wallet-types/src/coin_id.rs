use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ParseError, Txid};

/// Identifies a single transaction output by its transaction id and output index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoinId {
    pub txid: Txid,
    pub oidx: u32,
}

impl CoinId {
    pub const fn new(txid: Txid, oidx: u32) -> Self {
        Self { txid, oidx }
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.oidx)
    }
}

impl FromStr for CoinId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((txid, oidx)) = s.split_once(':') else {
            return Err(ParseError::MissingSeparator(s.to_string()));
        };

        let oidx = oidx
            .parse()
            .map_err(|_| ParseError::InvalidOutputIndex(oidx.to_string()))?;

        Ok(Self::new(txid.parse()?, oidx))
    }
}
