use crate::{Coin, CoinAuthority};

/// Supplies snapshots of the candidate coins a query runs over.
pub trait CoinSetProvider: Send + Sync {
    type Authority: CoinAuthority;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Gets every coin known to the provider.
    fn coins(&self) -> Result<Vec<Coin<Self::Authority>>, Self::Error>;

    /// Gets the coins associated with any of the given addresses.
    fn coins_for_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<Coin<Self::Authority>>, Self::Error>;
}
