use std::{fmt, sync::Arc, time::Duration};

use cc_wallet_coins::{Coin, CoinAuthority, CoinQuery, CoinSetProvider};
use cc_wallet_store::{LockTimeStore, MemoryStore};
use cc_wallet_types::{CoinId, ColorValue, FreezeExpiry, FreezeOptions, RawCoin, Script, Txid};
use indexmap::IndexMap;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{SimulatorConfig, SimulatorError};

#[derive(Debug, Clone)]
struct SimulatedCoin {
    raw: RawCoin,
    address: String,
    valid: bool,
    confirmed_at: Option<u32>,
    spent: bool,
    color_value: ColorValue,
    color_delay: Duration,
    color_fails: bool,
}

#[derive(Debug)]
struct SimulatorData {
    rng: ChaCha8Rng,
    height: u32,
    timestamp: u64,
    coins: IndexMap<CoinId, SimulatedCoin>,
    freezes: IndexMap<CoinId, FreezeOptions>,
    offline: bool,
}

impl SimulatorData {
    fn coin(&self, coin_id: CoinId) -> Result<&SimulatedCoin, SimulatorError> {
        self.coins
            .get(&coin_id)
            .ok_or(SimulatorError::UnknownCoin(coin_id))
    }

    fn coin_mut(&mut self, coin_id: CoinId) -> Result<&mut SimulatedCoin, SimulatorError> {
        self.coins
            .get_mut(&coin_id)
            .ok_or(SimulatorError::UnknownCoin(coin_id))
    }

    /// Durations are turned into timestamps, so the freeze expires at a fixed point.
    fn resolve_expiry(&self, options: FreezeOptions) -> FreezeOptions {
        match options.expiry {
            Some(FreezeExpiry::Duration(duration)) => {
                FreezeOptions::until_timestamp(self.timestamp.saturating_add(duration.as_secs()))
            }
            _ => options,
        }
    }

    fn is_frozen(&self, coin_id: CoinId) -> bool {
        let Some(options) = self.freezes.get(&coin_id) else {
            return false;
        };

        match options.expiry {
            None | Some(FreezeExpiry::Duration(_)) => true,
            Some(FreezeExpiry::Height(height)) => self.height < height,
            Some(FreezeExpiry::Timestamp(timestamp)) => self.timestamp < timestamp,
        }
    }
}

struct SimulatorInner<S> {
    config: SimulatorConfig,
    data: Mutex<SimulatorData>,
    lock_times: Arc<S>,
}

/// An in-memory coin universe, which acts as both the coin authority and the coin provider.
///
/// This is a cheap handle, so clones share the same state. Freezes are written through to
/// the lock time store, and can be restored from it with [`CoinSimulator::load_freezes`].
pub struct CoinSimulator<S = MemoryStore>(Arc<SimulatorInner<S>>);

impl CoinSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_lock_time_store(config, Arc::new(MemoryStore::new()))
    }
}

impl Default for CoinSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl<S> CoinSimulator<S> {
    pub fn with_lock_time_store(config: SimulatorConfig, lock_times: Arc<S>) -> Self {
        let data = SimulatorData {
            rng: ChaCha8Rng::seed_from_u64(0),
            height: config.height,
            timestamp: config.timestamp,
            coins: IndexMap::new(),
            freezes: IndexMap::new(),
            offline: false,
        };

        Self(Arc::new(SimulatorInner {
            config,
            data: Mutex::new(data),
            lock_times,
        }))
    }

    pub fn config(&self) -> SimulatorConfig {
        self.0.config
    }

    pub fn lock_times(&self) -> &Arc<S> {
        &self.0.lock_times
    }

    pub fn height(&self) -> u32 {
        self.0.data.lock().height
    }

    pub fn timestamp(&self) -> u64 {
        self.0.data.lock().timestamp
    }

    /// Creates a valid coin, confirmed at the current height.
    pub fn mint(&self, address: &str, value: u64, color_value: ColorValue) -> CoinId {
        let height = self.height();
        self.insert(address, value, color_value, Some(height))
    }

    /// Creates a valid coin which hasn't been confirmed yet.
    pub fn mint_unconfirmed(&self, address: &str, value: u64, color_value: ColorValue) -> CoinId {
        self.insert(address, value, color_value, None)
    }

    fn insert(
        &self,
        address: &str,
        value: u64,
        color_value: ColorValue,
        confirmed_at: Option<u32>,
    ) -> CoinId {
        let mut data = self.0.data.lock();

        let txid = Txid::new(data.rng.gen());
        let raw = RawCoin::new(txid, 0, value, Script::new(address.as_bytes().to_vec()));
        let coin_id = raw.coin_id();

        data.coins.insert(
            coin_id,
            SimulatedCoin {
                raw,
                address: address.to_string(),
                valid: true,
                confirmed_at,
                spent: false,
                color_value,
                color_delay: Duration::ZERO,
                color_fails: false,
            },
        );

        debug!(%coin_id, address, value, ?color_value, "minted coin");

        coin_id
    }

    fn update(
        &self,
        coin_id: CoinId,
        f: impl FnOnce(&mut SimulatedCoin),
    ) -> Result<(), SimulatorError> {
        f(self.0.data.lock().coin_mut(coin_id)?);
        Ok(())
    }

    /// Confirms the coin at the current height.
    pub fn confirm(&self, coin_id: CoinId) -> Result<(), SimulatorError> {
        let height = self.height();
        self.update(coin_id, |coin| coin.confirmed_at = Some(height))
    }

    pub fn spend(&self, coin_id: CoinId) -> Result<(), SimulatorError> {
        self.update(coin_id, |coin| coin.spent = true)
    }

    /// Marks the transaction that created the coin as invalid.
    pub fn invalidate(&self, coin_id: CoinId) -> Result<(), SimulatorError> {
        self.update(coin_id, |coin| coin.valid = false)
    }

    pub fn set_color_delay(&self, coin_id: CoinId, delay: Duration) -> Result<(), SimulatorError> {
        self.update(coin_id, |coin| coin.color_delay = delay)
    }

    pub fn fail_color_lookup(&self, coin_id: CoinId, fail: bool) -> Result<(), SimulatorError> {
        self.update(coin_id, |coin| coin.color_fails = fail)
    }

    pub fn set_provider_offline(&self, offline: bool) {
        self.0.data.lock().offline = offline;
    }

    pub fn advance_blocks(&self, blocks: u32) {
        let mut data = self.0.data.lock();
        data.height = data.height.saturating_add(blocks);
    }

    pub fn advance_time(&self, duration: Duration) {
        let mut data = self.0.data.lock();
        data.timestamp = data.timestamp.saturating_add(duration.as_secs());
    }

    /// Starts a query over the simulated coins.
    pub fn query(&self) -> CoinQuery<Self> {
        CoinQuery::new(Arc::new(self.clone()))
    }

    fn snapshot(&self, filter: impl Fn(&str) -> bool) -> Result<Vec<Coin<Self>>, SimulatorError> {
        let data = self.0.data.lock();

        if data.offline {
            return Err(SimulatorError::ProviderOffline);
        }

        let authority = Arc::new(self.clone());

        Ok(data
            .coins
            .values()
            .filter(|coin| filter(&coin.address))
            .map(|coin| Coin::bound(coin.raw.clone(), Arc::clone(&authority)))
            .collect())
    }
}

impl<S> CoinSimulator<S>
where
    S: LockTimeStore,
{
    /// Replaces the in-memory freezes with the ones held by the lock time store.
    pub async fn load_freezes(&self) -> Result<usize, SimulatorError> {
        let lock_times = self.0.lock_times.lock_times().await?;

        let mut data = self.0.data.lock();
        let freezes: IndexMap<CoinId, FreezeOptions> = lock_times
            .into_iter()
            .map(|(coin_id, options)| (coin_id, data.resolve_expiry(options)))
            .collect();
        data.freezes = freezes;

        debug!(count = data.freezes.len(), "loaded freezes");

        Ok(data.freezes.len())
    }
}

impl<S> Clone for CoinSimulator<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S> fmt::Debug for CoinSimulator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinSimulator")
            .field("config", &self.0.config)
            .field("data", &*self.0.data.lock())
            .finish_non_exhaustive()
    }
}

impl<S> CoinAuthority for CoinSimulator<S>
where
    S: LockTimeStore + Send + Sync + 'static,
{
    type Error = SimulatorError;

    fn is_coin_valid(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        Ok(self.0.data.lock().coin(coin_id)?.valid)
    }

    fn is_coin_available(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        let data = self.0.data.lock();
        let confirmations = self.0.config.confirmations;

        Ok(data.coin(coin_id)?.confirmed_at.is_some_and(|confirmed_at| {
            data.height.saturating_sub(confirmed_at).saturating_add(1) >= confirmations
        }))
    }

    fn is_coin_spent(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        Ok(self.0.data.lock().coin(coin_id)?.spent)
    }

    fn is_coin_frozen(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        let data = self.0.data.lock();
        data.coin(coin_id)?;
        Ok(data.is_frozen(coin_id))
    }

    async fn freeze_coin(&self, coin_id: CoinId, options: FreezeOptions) -> Result<(), Self::Error> {
        let options = {
            let data = self.0.data.lock();
            data.coin(coin_id)?;
            data.resolve_expiry(options)
        };

        self.0.lock_times.set_lock_time(coin_id, options).await?;
        self.0.data.lock().freezes.insert(coin_id, options);

        debug!(%coin_id, ?options, "froze coin");

        Ok(())
    }

    async fn unfreeze_coin(&self, coin_id: CoinId) -> Result<(), Self::Error> {
        self.0.data.lock().coin(coin_id)?;

        self.0.lock_times.remove_lock_time(coin_id).await?;
        self.0.data.lock().freezes.shift_remove(&coin_id);

        debug!(%coin_id, "unfroze coin");

        Ok(())
    }

    async fn coin_color_value(&self, coin_id: CoinId) -> Result<ColorValue, Self::Error> {
        let (color_value, delay, fails) = {
            let data = self.0.data.lock();
            let coin = data.coin(coin_id)?;
            (coin.color_value, coin.color_delay, coin.color_fails)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if fails {
            return Err(SimulatorError::ColorLookup(coin_id));
        }

        Ok(color_value)
    }
}

impl<S> CoinSetProvider for CoinSimulator<S>
where
    S: LockTimeStore + Send + Sync + 'static,
{
    type Authority = Self;
    type Error = SimulatorError;

    fn coins(&self) -> Result<Vec<Coin<Self>>, Self::Error> {
        self.snapshot(|_| true)
    }

    fn coins_for_addresses(&self, addresses: &[String]) -> Result<Vec<Coin<Self>>, Self::Error> {
        self.snapshot(|address| addresses.iter().any(|item| item == address))
    }
}
