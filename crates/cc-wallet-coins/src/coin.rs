use std::{fmt, sync::Arc};

use cc_wallet_types::{CoinId, ColorValue, FreezeOptions, RawCoin, Script, Txid};
use tracing::debug;

use crate::{AuthorityBinding, CoinAuthority, CoinError, CoinState};

/// An unspent output tracked by the wallet.
///
/// A coin only carries its raw fields. Everything else about it, such as whether it is
/// spent or frozen, is asked of the bound [`CoinAuthority`] every time and never cached.
pub struct Coin<A> {
    raw: RawCoin,
    binding: Option<AuthorityBinding<A>>,
}

impl<A> Coin<A> {
    /// Creates a coin from its raw record, bound to the authority if one is given.
    pub fn new(raw: RawCoin, authority: Option<Arc<A>>) -> Self {
        let binding = authority.map(|authority| AuthorityBinding::new(authority, raw.coin_id()));
        Self { raw, binding }
    }

    pub fn bound(raw: RawCoin, authority: Arc<A>) -> Self {
        Self::new(raw, Some(authority))
    }

    /// Creates a coin which can only report its raw fields.
    pub fn unbound(raw: RawCoin) -> Self {
        Self::new(raw, None)
    }

    pub fn id(&self) -> CoinId {
        self.raw.coin_id()
    }

    pub fn txid(&self) -> Txid {
        self.raw.txid
    }

    pub fn oidx(&self) -> u32 {
        self.raw.oidx
    }

    pub fn value(&self) -> u64 {
        self.raw.value
    }

    pub fn script(&self) -> &Script {
        &self.raw.script
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn to_raw_record(&self) -> RawCoin {
        self.raw.clone()
    }

    fn binding<E>(&self) -> Result<&AuthorityBinding<A>, CoinError<E>> {
        self.binding.as_ref().ok_or(CoinError::NoAuthorityBound)
    }
}

impl<A> Coin<A>
where
    A: CoinAuthority,
{
    pub fn is_valid(&self) -> Result<bool, CoinError<A::Error>> {
        self.binding()?.is_valid().map_err(CoinError::Authority)
    }

    /// Whether the coin is confirmed, and therefore available to spend.
    pub fn is_available(&self) -> Result<bool, CoinError<A::Error>> {
        self.binding()?.is_available().map_err(CoinError::Authority)
    }

    pub fn is_spent(&self) -> Result<bool, CoinError<A::Error>> {
        self.binding()?.is_spent().map_err(CoinError::Authority)
    }

    pub fn is_frozen(&self) -> Result<bool, CoinError<A::Error>> {
        self.binding()?.is_frozen().map_err(CoinError::Authority)
    }

    pub async fn freeze(&self, options: FreezeOptions) -> Result<(), CoinError<A::Error>> {
        let binding = self.binding()?;
        debug!(coin = %self, ?options, "freezing coin");
        binding.freeze(options).await.map_err(CoinError::Authority)
    }

    pub async fn unfreeze(&self) -> Result<(), CoinError<A::Error>> {
        let binding = self.binding()?;
        debug!(coin = %self, "unfreezing coin");
        binding.unfreeze().await.map_err(CoinError::Authority)
    }

    /// Resolves the dominant color of the coin.
    pub async fn color_value(&self) -> Result<ColorValue, CoinError<A::Error>> {
        self.binding()?
            .color_value()
            .await
            .map_err(CoinError::Authority)
    }
}

impl<A> Clone for Coin<A> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            binding: self.binding.clone(),
        }
    }
}

impl<A> fmt::Debug for Coin<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coin")
            .field("raw", &self.raw)
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<A> fmt::Display for Coin<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.raw.txid, self.raw.oidx)
    }
}
