use std::future::Future;

use cc_wallet_types::{CoinId, FreezeOptions};

use crate::StoreError;

/// Keeps the freeze expiry of frozen coins.
pub trait LockTimeStore {
    /// Records a freeze for the coin, replacing any earlier one.
    fn set_lock_time(
        &self,
        coin_id: CoinId,
        options: FreezeOptions,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Gets the freeze recorded for the coin.
    fn lock_time(
        &self,
        coin_id: CoinId,
    ) -> impl Future<Output = Result<Option<FreezeOptions>, StoreError>> + Send;

    /// Removes the freeze for the coin, returning whether there was one.
    fn remove_lock_time(
        &self,
        coin_id: CoinId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Gets every recorded freeze, in the order they were first recorded.
    fn lock_times(
        &self,
    ) -> impl Future<Output = Result<Vec<(CoinId, FreezeOptions)>, StoreError>> + Send;
}
