pub use cc_wallet_coins as coins;
pub use cc_wallet_store as store;
pub use cc_wallet_test as simulator;
pub use cc_wallet_types as types;

pub mod prelude;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::prelude::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_wallet_flow() -> anyhow::Result<()> {
        let store = Arc::new(SqliteStore::in_memory().await?);
        store.add_address(AddressRecord::new("addr1", 0, 0)).await?;
        store.add_address(AddressRecord::new("addr2", 0, 1)).await?;

        let sim = CoinSimulator::with_lock_time_store(SimulatorConfig::default(), store.clone());
        let gold = ColorId::new(7);

        let first = sim.mint("addr1", 600, ColorValue::new(gold, 6));
        let second = sim.mint("addr2", 400, ColorValue::new(gold, 4));
        sim.mint("addr3", 900, ColorValue::new(gold, 9));
        sim.mint("addr1", 100, ColorValue::uncolored(100));

        let addresses: Vec<String> = store
            .addresses(0)
            .await?
            .into_iter()
            .map(|record| record.address)
            .collect();

        let query = sim.query().only_addresses(addresses)?.only_colored_as([gold])?;

        let coins = query.coins().await?;
        assert_eq!(
            coins.iter().map(Coin::id).collect::<Vec<_>>(),
            vec![first, second]
        );
        let totals: Vec<_> = coins.color_totals().await?.into_iter().collect();
        assert_eq!(totals, vec![(gold, 10)]);

        sim.freeze_coin(first, FreezeOptions::until_height(sim.height() + 1))
            .await?;
        assert_eq!(query.coins().await?.len(), 1);
        assert_eq!(query.include_frozen().coins().await?.len(), 2);

        sim.advance_blocks(1);
        assert_eq!(query.coins().await?.len(), 2);

        Ok(())
    }
}
