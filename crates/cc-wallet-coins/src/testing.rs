use std::{sync::Arc, time::Duration};

use cc_wallet_types::{CoinId, ColorValue, FreezeOptions, RawCoin, Script, Txid};
use indexmap::IndexMap;
use parking_lot::Mutex;
use thiserror::Error;

use crate::{Coin, CoinAuthority, CoinSetProvider};

pub(crate) fn raw_coin(txid_byte: u8, oidx: u32, value: u64) -> RawCoin {
    RawCoin::new(
        Txid::new([txid_byte; 32]),
        oidx,
        value,
        Script::new(vec![0x76, 0xa9, txid_byte]),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum MockError {
    #[error("unknown coin {0}")]
    UnknownCoin(CoinId),

    #[error("color lookup failed for {0}")]
    ColorLookup(CoinId),

    #[error("provider is offline")]
    Offline,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MockState {
    pub(crate) valid: bool,
    pub(crate) available: bool,
    pub(crate) spent: bool,
    pub(crate) freeze: Option<FreezeOptions>,
    pub(crate) color_value: ColorValue,
    pub(crate) color_delay: Duration,
    pub(crate) color_fails: bool,
}

impl MockState {
    pub(crate) fn spendable(color_value: ColorValue) -> Self {
        Self {
            valid: true,
            available: true,
            spent: false,
            freeze: None,
            color_value,
            color_delay: Duration::ZERO,
            color_fails: false,
        }
    }
}

/// Records every call made against it, so tests can check which lookups a query performed.
#[derive(Debug, Default)]
pub(crate) struct MockAuthority {
    states: Mutex<IndexMap<CoinId, MockState>>,
    calls: Mutex<Vec<(&'static str, CoinId)>>,
}

impl MockAuthority {
    pub(crate) fn insert(&self, coin_id: CoinId, state: MockState) {
        self.states.lock().insert(coin_id, state);
    }

    pub(crate) fn update(&self, coin_id: CoinId, f: impl FnOnce(&mut MockState)) {
        if let Some(state) = self.states.lock().get_mut(&coin_id) {
            f(state);
        }
    }

    pub(crate) fn frozen_with(&self, coin_id: CoinId) -> Option<FreezeOptions> {
        self.states.lock().get(&coin_id).and_then(|state| state.freeze)
    }

    pub(crate) fn calls_for(&self, coin_id: CoinId) -> Vec<&'static str> {
        self.calls
            .lock()
            .iter()
            .filter(|(_, id)| *id == coin_id)
            .map(|(name, _)| *name)
            .collect()
    }

    pub(crate) fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(call, _)| *call == name)
            .count()
    }

    fn state(&self, name: &'static str, coin_id: CoinId) -> Result<MockState, MockError> {
        self.calls.lock().push((name, coin_id));
        self.states
            .lock()
            .get(&coin_id)
            .copied()
            .ok_or(MockError::UnknownCoin(coin_id))
    }
}

impl CoinAuthority for MockAuthority {
    type Error = MockError;

    fn is_coin_valid(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        Ok(self.state("is_coin_valid", coin_id)?.valid)
    }

    fn is_coin_available(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        Ok(self.state("is_coin_available", coin_id)?.available)
    }

    fn is_coin_spent(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        Ok(self.state("is_coin_spent", coin_id)?.spent)
    }

    fn is_coin_frozen(&self, coin_id: CoinId) -> Result<bool, Self::Error> {
        Ok(self.state("is_coin_frozen", coin_id)?.freeze.is_some())
    }

    async fn freeze_coin(&self, coin_id: CoinId, options: FreezeOptions) -> Result<(), Self::Error> {
        self.state("freeze_coin", coin_id)?;
        self.update(coin_id, |state| state.freeze = Some(options));
        Ok(())
    }

    async fn unfreeze_coin(&self, coin_id: CoinId) -> Result<(), Self::Error> {
        self.state("unfreeze_coin", coin_id)?;
        self.update(coin_id, |state| state.freeze = None);
        Ok(())
    }

    async fn coin_color_value(&self, coin_id: CoinId) -> Result<ColorValue, Self::Error> {
        let state = self.state("coin_color_value", coin_id)?;
        tokio::time::sleep(state.color_delay).await;

        if state.color_fails {
            return Err(MockError::ColorLookup(coin_id));
        }

        Ok(state.color_value)
    }
}

#[derive(Debug)]
pub(crate) struct MockProvider {
    authority: Arc<MockAuthority>,
    coins: Vec<(String, RawCoin)>,
    offline: bool,
}

impl MockProvider {
    pub(crate) fn new(authority: Arc<MockAuthority>) -> Self {
        Self {
            authority,
            coins: Vec::new(),
            offline: false,
        }
    }

    pub(crate) fn add(&mut self, address: &str, raw: RawCoin, state: MockState) -> CoinId {
        let coin_id = raw.coin_id();
        self.authority.insert(coin_id, state);
        self.coins.push((address.to_string(), raw));
        coin_id
    }

    pub(crate) fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn snapshot(
        &self,
        filter: impl Fn(&str) -> bool,
    ) -> Result<Vec<Coin<MockAuthority>>, MockError> {
        if self.offline {
            return Err(MockError::Offline);
        }

        Ok(self
            .coins
            .iter()
            .filter(|(address, _)| filter(address))
            .map(|(_, raw)| Coin::bound(raw.clone(), self.authority.clone()))
            .collect())
    }
}

impl CoinSetProvider for MockProvider {
    type Authority = MockAuthority;
    type Error = MockError;

    fn coins(&self) -> Result<Vec<Coin<MockAuthority>>, MockError> {
        self.snapshot(|_| true)
    }

    fn coins_for_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<Coin<MockAuthority>>, MockError> {
        self.snapshot(|address| addresses.iter().any(|item| item == address))
    }
}
