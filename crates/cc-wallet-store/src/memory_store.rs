use cc_wallet_types::{CoinId, FreezeOptions, Txid};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{
    AddressRecord, AddressStore, ConfigStore, LockTimeStore, RawTxRecord, RawTxStore, StoreError,
    TxStatus,
};

/// An in-memory implementation of every store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: Mutex<IndexMap<String, Value>>,
    addresses: Mutex<IndexMap<String, AddressRecord>>,
    lock_times: Mutex<IndexMap<CoinId, FreezeOptions>>,
    raw_txs: Mutex<IndexMap<Txid, RawTxRecord>>,
}

impl MemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    async fn config(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.config.lock().get(key).cloned())
    }

    async fn set_config(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.config.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_config(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.config.lock().shift_remove(key).is_some())
    }
}

impl AddressStore for MemoryStore {
    async fn add_address(&self, record: AddressRecord) -> Result<bool, StoreError> {
        let mut addresses = self.addresses.lock();

        if addresses.contains_key(&record.address) {
            return Ok(false);
        }

        addresses.insert(record.address.clone(), record);
        Ok(true)
    }

    async fn addresses(&self, account: u32) -> Result<Vec<AddressRecord>, StoreError> {
        let mut records: Vec<AddressRecord> = self
            .addresses
            .lock()
            .values()
            .filter(|record| record.account == account)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.index);
        Ok(records)
    }

    async fn all_addresses(&self) -> Result<Vec<AddressRecord>, StoreError> {
        Ok(self.addresses.lock().values().cloned().collect())
    }
}

impl LockTimeStore for MemoryStore {
    async fn set_lock_time(
        &self,
        coin_id: CoinId,
        options: FreezeOptions,
    ) -> Result<(), StoreError> {
        self.lock_times.lock().insert(coin_id, options);
        Ok(())
    }

    async fn lock_time(&self, coin_id: CoinId) -> Result<Option<FreezeOptions>, StoreError> {
        Ok(self.lock_times.lock().get(&coin_id).copied())
    }

    async fn remove_lock_time(&self, coin_id: CoinId) -> Result<bool, StoreError> {
        Ok(self.lock_times.lock().shift_remove(&coin_id).is_some())
    }

    async fn lock_times(&self) -> Result<Vec<(CoinId, FreezeOptions)>, StoreError> {
        Ok(self
            .lock_times
            .lock()
            .iter()
            .map(|(coin_id, options)| (*coin_id, *options))
            .collect())
    }
}

impl RawTxStore for MemoryStore {
    async fn add_raw_tx(&self, record: RawTxRecord) -> Result<(), StoreError> {
        self.raw_txs.lock().insert(record.txid, record);
        Ok(())
    }

    async fn raw_tx(&self, txid: Txid) -> Result<Option<RawTxRecord>, StoreError> {
        Ok(self.raw_txs.lock().get(&txid).cloned())
    }

    async fn set_tx_status(&self, txid: Txid, status: TxStatus) -> Result<(), StoreError> {
        let mut raw_txs = self.raw_txs.lock();
        let record = raw_txs.get_mut(&txid).ok_or(StoreError::NotFound)?;
        record.status = status;
        Ok(())
    }

    async fn raw_txs(&self) -> Result<Vec<RawTxRecord>, StoreError> {
        Ok(self.raw_txs.lock().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn coin_id(byte: u8, oidx: u32) -> CoinId {
        CoinId::new(Txid::new([byte; 32]), oidx)
    }

    #[tokio::test]
    async fn test_config() -> anyhow::Result<()> {
        let store = MemoryStore::new();

        assert_eq!(store.config("network").await?, None);

        store.set_config("network", json!("testnet")).await?;
        store.set_config("network", json!("mainnet")).await?;
        assert_eq!(store.config("network").await?, Some(json!("mainnet")));

        assert!(store.remove_config("network").await?);
        assert!(!store.remove_config("network").await?);
        assert_eq!(store.config("network").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_addresses() -> anyhow::Result<()> {
        let store = MemoryStore::new();

        assert!(store.add_address(AddressRecord::new("addr-b", 0, 1)).await?);
        assert!(store.add_address(AddressRecord::new("addr-a", 0, 0)).await?);
        assert!(store.add_address(AddressRecord::new("addr-c", 1, 0)).await?);

        // Adding the same address again doesn't replace the original record.
        assert!(!store.add_address(AddressRecord::new("addr-a", 5, 5)).await?);

        assert_eq!(
            store.addresses(0).await?,
            vec![
                AddressRecord::new("addr-a", 0, 0),
                AddressRecord::new("addr-b", 0, 1)
            ]
        );
        assert_eq!(store.all_addresses().await?.len(), 3);
        assert_eq!(store.all_addresses().await?[0].address, "addr-b");

        Ok(())
    }

    #[tokio::test]
    async fn test_lock_times() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let first = coin_id(1, 0);
        let second = coin_id(2, 1);

        store
            .set_lock_time(first, FreezeOptions::until_height(500))
            .await?;
        store
            .set_lock_time(second, FreezeOptions::for_duration(Duration::from_secs(60)))
            .await?;

        assert_eq!(
            store.lock_time(first).await?,
            Some(FreezeOptions::until_height(500))
        );
        assert_eq!(store.lock_times().await?.len(), 2);

        assert!(store.remove_lock_time(first).await?);
        assert!(!store.remove_lock_time(first).await?);
        assert_eq!(store.lock_time(first).await?, None);
        assert_eq!(
            store.lock_times().await?,
            vec![(
                second,
                FreezeOptions::for_duration(Duration::from_secs(60))
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_raw_txs() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let txid = Txid::new([7; 32]);

        store
            .add_raw_tx(RawTxRecord::new(txid, vec![1, 2, 3], TxStatus::Unconfirmed))
            .await?;
        store
            .set_tx_status(txid, TxStatus::Confirmed { height: 10 })
            .await?;

        let record = store.raw_tx(txid).await?.expect("missing transaction");
        assert_eq!(record.raw, vec![1, 2, 3]);
        assert_eq!(record.status, TxStatus::Confirmed { height: 10 });

        let missing = store
            .set_tx_status(Txid::new([8; 32]), TxStatus::Invalid)
            .await;
        assert!(matches!(missing, Err(StoreError::NotFound)));
        assert_eq!(store.raw_txs().await?.len(), 1);

        Ok(())
    }
}
