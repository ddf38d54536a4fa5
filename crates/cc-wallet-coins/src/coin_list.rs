use std::{fmt, slice, vec};

use cc_wallet_types::{ColorId, ColorValue};
use futures_util::future::try_join_all;
use indexmap::IndexMap;

use crate::{Coin, CoinAuthority, CoinLookupError};

/// The ordered result of a [`CoinQuery`](crate::CoinQuery).
///
/// Coins keep the order in which they were discovered, and the list can't be changed
/// once it has been built.
pub struct CoinList<A> {
    coins: Vec<Coin<A>>,
}

impl<A> CoinList<A> {
    pub fn new(coins: Vec<Coin<A>>) -> Self {
        Self { coins }
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Coin<A>> {
        self.coins.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Coin<A>> {
        self.coins.iter()
    }

    pub fn into_vec(self) -> Vec<Coin<A>> {
        self.coins
    }

    /// The sum of the raw values of every coin in the list.
    pub fn total_value(&self) -> u128 {
        self.coins
            .iter()
            .fold(0u128, |total, coin| total + u128::from(coin.value()))
    }
}

impl<A> CoinList<A>
where
    A: CoinAuthority,
{
    /// Resolves the color value of every coin, in the same order as the coins.
    pub async fn color_values(&self) -> Result<Vec<ColorValue>, CoinLookupError<A::Error>> {
        try_join_all(self.coins.iter().map(|coin| async move {
            coin.color_value()
                .await
                .map_err(|source| CoinLookupError {
                    coin: coin.id(),
                    source,
                })
        }))
        .await
    }

    /// Sums the color values of the coins per color, in the order each color is first seen.
    pub async fn color_totals(
        &self,
    ) -> Result<IndexMap<ColorId, u128>, CoinLookupError<A::Error>> {
        let mut totals = IndexMap::<ColorId, u128>::new();

        for color_value in self.color_values().await? {
            *totals.entry(color_value.color_id()).or_default() += u128::from(color_value.value());
        }

        Ok(totals)
    }
}

impl<A> Clone for CoinList<A> {
    fn clone(&self) -> Self {
        Self::new(self.coins.clone())
    }
}

impl<A> fmt::Debug for CoinList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.coins).finish()
    }
}

impl<A> IntoIterator for CoinList<A> {
    type Item = Coin<A>;
    type IntoIter = vec::IntoIter<Coin<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.coins.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a CoinList<A> {
    type Item = &'a Coin<A>;
    type IntoIter = slice::Iter<'a, Coin<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.coins.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use crate::{
        testing::{raw_coin, MockAuthority, MockError, MockState},
        CoinError,
    };

    use super::*;

    fn coin_list(
        authority: &Arc<MockAuthority>,
        coins: &[(u8, u64, ColorValue)],
    ) -> CoinList<MockAuthority> {
        CoinList::new(
            coins
                .iter()
                .map(|&(id, value, color_value)| {
                    let raw = raw_coin(id, 0, value);
                    authority.insert(
                        raw.coin_id(),
                        MockState {
                            color_delay: Duration::from_millis(u64::from(10 - id)),
                            ..MockState::spendable(color_value)
                        },
                    );
                    Coin::bound(raw, authority.clone())
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_list() {
        let list = CoinList::<MockAuthority>::new(Vec::new());
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.total_value(), 0);
        assert!(list.get(0).is_none());
    }

    #[tokio::test]
    async fn test_color_totals() -> anyhow::Result<()> {
        let authority = Arc::new(MockAuthority::default());
        let red = ColorId::new(1);
        let list = coin_list(
            &authority,
            &[
                (1, 600, ColorValue::new(red, 5)),
                (2, 1000, ColorValue::uncolored(1000)),
                (3, 600, ColorValue::new(red, 7)),
            ],
        );

        assert_eq!(list.total_value(), 2200);
        assert_eq!(
            list.color_values().await?,
            vec![
                ColorValue::new(red, 5),
                ColorValue::uncolored(1000),
                ColorValue::new(red, 7),
            ]
        );
        let totals: Vec<_> = list.color_totals().await?.into_iter().collect();
        assert_eq!(totals, vec![(red, 12), (ColorId::UNCOLORED, 1000)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_totals_exceeding_u64() -> anyhow::Result<()> {
        let authority = Arc::new(MockAuthority::default());
        let half = u64::MAX / 2 + 1;
        let list = coin_list(
            &authority,
            &[
                (1, half, ColorValue::uncolored(half)),
                (2, half, ColorValue::uncolored(half)),
            ],
        );

        let expected = u128::from(u64::MAX) + 1;
        assert_eq!(list.total_value(), expected);
        assert_eq!(
            list.color_totals().await?,
            IndexMap::from([(ColorId::UNCOLORED, expected)])
        );

        Ok(())
    }

    #[test]
    fn test_iteration_keeps_order() {
        let authority = Arc::new(MockAuthority::default());
        let list = coin_list(
            &authority,
            &[
                (3, 1, ColorValue::uncolored(1)),
                (1, 2, ColorValue::uncolored(2)),
                (2, 3, ColorValue::uncolored(3)),
            ],
        );

        let values: Vec<u64> = (&list).into_iter().map(Coin::value).collect();
        assert_eq!(values, vec![1, 2, 3]);

        let owned: Vec<u64> = list.clone().into_iter().map(|coin| coin.value()).collect();
        assert_eq!(owned, values);
        assert_eq!(list.into_vec().len(), 3);
    }

    #[tokio::test]
    async fn test_color_lookup_error_names_coin() {
        let authority = Arc::new(MockAuthority::default());
        let raw = raw_coin(4, 1, 100);
        let list = CoinList::new(vec![Coin::bound(raw.clone(), authority)]);

        let Err(error) = list.color_values().await else {
            panic!("expected the lookup to fail");
        };
        assert_eq!(error.coin, raw.coin_id());
        assert!(matches!(
            error.source,
            CoinError::Authority(MockError::UnknownCoin(_))
        ));
    }
}
