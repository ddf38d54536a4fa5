use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The point after which a freeze no longer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreezeExpiry {
    /// Expires once the chain reaches this block height.
    Height(u32),

    /// Expires at this unix timestamp, in seconds.
    Timestamp(u64),

    /// Expires once this much time has passed since the freeze was applied.
    Duration(Duration),
}

/// Options passed along when freezing a coin.
///
/// How an expiry is interpreted is up to the coin authority that owns the freeze state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreezeOptions {
    pub expiry: Option<FreezeExpiry>,
}

impl FreezeOptions {
    /// A freeze which stays in place until the coin is unfrozen.
    pub const fn indefinite() -> Self {
        Self { expiry: None }
    }

    pub const fn until_height(height: u32) -> Self {
        Self {
            expiry: Some(FreezeExpiry::Height(height)),
        }
    }

    pub const fn until_timestamp(timestamp: u64) -> Self {
        Self {
            expiry: Some(FreezeExpiry::Timestamp(timestamp)),
        }
    }

    pub const fn for_duration(duration: Duration) -> Self {
        Self {
            expiry: Some(FreezeExpiry::Duration(duration)),
        }
    }
}
