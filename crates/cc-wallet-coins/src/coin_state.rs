use std::{fmt, future::Future, sync::Arc};

use cc_wallet_types::{CoinId, ColorValue, FreezeOptions};

use crate::CoinAuthority;

/// The state queries and commands available for a single coin.
pub trait CoinState {
    type Error;

    fn is_valid(&self) -> Result<bool, Self::Error>;

    fn is_available(&self) -> Result<bool, Self::Error>;

    fn is_spent(&self) -> Result<bool, Self::Error>;

    fn is_frozen(&self) -> Result<bool, Self::Error>;

    fn freeze(&self, options: FreezeOptions)
        -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn unfreeze(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn color_value(&self) -> impl Future<Output = Result<ColorValue, Self::Error>> + Send;
}

/// Binds a coin's identity to the authority that owns its state.
pub struct AuthorityBinding<A> {
    authority: Arc<A>,
    coin_id: CoinId,
}

impl<A> AuthorityBinding<A> {
    pub fn new(authority: Arc<A>, coin_id: CoinId) -> Self {
        Self { authority, coin_id }
    }

    pub fn authority(&self) -> &Arc<A> {
        &self.authority
    }

    pub fn coin_id(&self) -> CoinId {
        self.coin_id
    }
}

impl<A> Clone for AuthorityBinding<A> {
    fn clone(&self) -> Self {
        Self {
            authority: Arc::clone(&self.authority),
            coin_id: self.coin_id,
        }
    }
}

impl<A> fmt::Debug for AuthorityBinding<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorityBinding")
            .field("coin_id", &self.coin_id)
            .finish_non_exhaustive()
    }
}

impl<A> CoinState for AuthorityBinding<A>
where
    A: CoinAuthority,
{
    type Error = A::Error;

    fn is_valid(&self) -> Result<bool, Self::Error> {
        self.authority.is_coin_valid(self.coin_id)
    }

    fn is_available(&self) -> Result<bool, Self::Error> {
        self.authority.is_coin_available(self.coin_id)
    }

    fn is_spent(&self) -> Result<bool, Self::Error> {
        self.authority.is_coin_spent(self.coin_id)
    }

    fn is_frozen(&self) -> Result<bool, Self::Error> {
        self.authority.is_coin_frozen(self.coin_id)
    }

    fn freeze(
        &self,
        options: FreezeOptions,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        self.authority.freeze_coin(self.coin_id, options)
    }

    fn unfreeze(&self) -> impl Future<Output = Result<(), Self::Error>> + Send {
        self.authority.unfreeze_coin(self.coin_id)
    }

    fn color_value(&self) -> impl Future<Output = Result<ColorValue, Self::Error>> + Send {
        self.authority.coin_color_value(self.coin_id)
    }
}
