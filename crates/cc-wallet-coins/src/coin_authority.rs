use std::future::Future;

use cc_wallet_types::{CoinId, ColorValue, FreezeOptions};

/// Owns the ground truth for the blockchain and freeze state of coins.
///
/// The state predicates are answered synchronously from the authority's current view.
/// Freezing and color resolution may need a round trip, so they return futures.
pub trait CoinAuthority: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the transaction that created the coin is known and valid.
    fn is_coin_valid(&self, coin_id: CoinId) -> Result<bool, Self::Error>;

    /// Whether the coin is confirmed deeply enough to be spent.
    fn is_coin_available(&self, coin_id: CoinId) -> Result<bool, Self::Error>;

    /// Whether the coin has been spent.
    fn is_coin_spent(&self, coin_id: CoinId) -> Result<bool, Self::Error>;

    /// Whether the coin is currently frozen.
    fn is_coin_frozen(&self, coin_id: CoinId) -> Result<bool, Self::Error>;

    /// Freezes the coin, optionally until the expiry given in the options.
    fn freeze_coin(
        &self,
        coin_id: CoinId,
        options: FreezeOptions,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Releases a freeze on the coin.
    fn unfreeze_coin(&self, coin_id: CoinId) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Resolves the dominant color of the coin and the amount of it the coin carries.
    fn coin_color_value(
        &self,
        coin_id: CoinId,
    ) -> impl Future<Output = Result<ColorValue, Self::Error>> + Send;
}
