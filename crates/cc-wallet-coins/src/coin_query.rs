use std::{fmt, sync::Arc};

use cc_wallet_types::ColorId;
use futures_util::future::try_join_all;
use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::{
    Coin, CoinAuthority, CoinError, CoinList, CoinLookupError, CoinQueryError, CoinSetProvider,
    InvalidArgument, QueryError,
};

/// The criteria a [`CoinQuery`] filters by.
///
/// The defaults describe coins that are spendable right now, in any color.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoinQueryCriteria {
    /// Only keep coins whose dominant color is in this set.
    pub only_colored_as: Option<IndexSet<ColorId>>,

    /// Only fetch coins associated with these addresses.
    pub only_addresses: Option<Vec<String>>,

    pub include_spent: bool,
    pub only_spent: bool,
    pub include_unconfirmed: bool,
    pub only_unconfirmed: bool,
    pub include_frozen: bool,
    pub only_frozen: bool,
}

impl CoinQueryCriteria {
    /// Checks the coin against the validity, spent, confirmation and freeze gates in turn.
    ///
    /// Stops at the first gate the coin fails, so no further lookups are made for it.
    pub fn admits<A>(&self, coin: &Coin<A>) -> Result<bool, CoinError<A::Error>>
    where
        A: CoinAuthority,
    {
        if !coin.is_valid()? {
            return Ok(false);
        }

        let spent = AxisFilter::new(self.include_spent, self.only_spent);
        if !spent.admits(|| coin.is_spent())? {
            return Ok(false);
        }

        let unconfirmed = AxisFilter::new(self.include_unconfirmed, self.only_unconfirmed);
        if !unconfirmed.admits(|| coin.is_available().map(|available| !available))? {
            return Ok(false);
        }

        let frozen = AxisFilter::new(self.include_frozen, self.only_frozen);
        frozen.admits(|| coin.is_frozen())
    }

    /// Whether the coin's color passes the color gate.
    pub fn admits_color(&self, color_id: ColorId) -> bool {
        match &self.only_colored_as {
            Some(color_ids) => color_ids.contains(&color_id),
            None => true,
        }
    }
}

/// How a query treats coins that have a given property, such as being spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisFilter {
    Exclude,
    Include,
    Only,
}

impl AxisFilter {
    fn new(include: bool, only: bool) -> Self {
        if only {
            Self::Only
        } else if include {
            Self::Include
        } else {
            Self::Exclude
        }
    }

    /// The property is only looked up if the outcome depends on it.
    fn admits<E>(self, has_property: impl FnOnce() -> Result<bool, E>) -> Result<bool, E> {
        match self {
            Self::Include => Ok(true),
            Self::Exclude => has_property().map(|has| !has),
            Self::Only => has_property(),
        }
    }
}

/// An immutable, chainable query over the coins supplied by a [`CoinSetProvider`].
///
/// Every builder method leaves `self` untouched and returns a new query with its own copy
/// of the criteria, so a query can be kept around, extended in several directions, and
/// executed any number of times.
pub struct CoinQuery<P> {
    provider: Arc<P>,
    criteria: CoinQueryCriteria,
}

impl<P> CoinQuery<P> {
    /// Creates a query for the coins that are currently spendable, in any color.
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_criteria(provider, CoinQueryCriteria::default())
    }

    pub fn with_criteria(provider: Arc<P>, criteria: CoinQueryCriteria) -> Self {
        Self { provider, criteria }
    }

    pub fn criteria(&self) -> &CoinQueryCriteria {
        &self.criteria
    }

    fn extend(&self, update: impl FnOnce(&mut CoinQueryCriteria)) -> Self {
        let mut criteria = self.criteria.clone();
        update(&mut criteria);
        Self::with_criteria(Arc::clone(&self.provider), criteria)
    }

    /// Only keeps coins colored as one of the given colors.
    ///
    /// This replaces any color restriction set earlier in the chain.
    pub fn only_colored_as<I>(&self, color_ids: I) -> Result<Self, InvalidArgument>
    where
        I: IntoIterator,
        I::Item: Into<ColorId>,
    {
        let color_ids: IndexSet<ColorId> = color_ids.into_iter().map(Into::into).collect();

        if color_ids.is_empty() {
            return Err(InvalidArgument::NoColorIds);
        }

        Ok(self.extend(|criteria| criteria.only_colored_as = Some(color_ids)))
    }

    /// Only fetches coins associated with the given addresses.
    ///
    /// This replaces any address restriction set earlier in the chain.
    pub fn only_addresses<I>(&self, addresses: I) -> Result<Self, InvalidArgument>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let unique: IndexSet<String> = addresses.into_iter().map(Into::into).collect();

        if unique.is_empty() {
            return Err(InvalidArgument::NoAddresses);
        }

        Ok(self.extend(|criteria| criteria.only_addresses = Some(unique.into_iter().collect())))
    }

    /// Also returns spent coins.
    #[must_use]
    pub fn include_spent(&self) -> Self {
        self.extend(|criteria| criteria.include_spent = true)
    }

    /// Only returns spent coins.
    #[must_use]
    pub fn only_spent(&self) -> Self {
        self.extend(|criteria| criteria.only_spent = true)
    }

    /// Also returns coins which aren't confirmed deeply enough to spend.
    #[must_use]
    pub fn include_unconfirmed(&self) -> Self {
        self.extend(|criteria| criteria.include_unconfirmed = true)
    }

    /// Only returns coins which aren't confirmed deeply enough to spend.
    #[must_use]
    pub fn only_unconfirmed(&self) -> Self {
        self.extend(|criteria| criteria.only_unconfirmed = true)
    }

    /// Also returns frozen coins.
    #[must_use]
    pub fn include_frozen(&self) -> Self {
        self.extend(|criteria| criteria.include_frozen = true)
    }

    /// Only returns frozen coins.
    #[must_use]
    pub fn only_frozen(&self) -> Self {
        self.extend(|criteria| criteria.only_frozen = true)
    }
}

impl<P> CoinQuery<P>
where
    P: CoinSetProvider,
{
    /// Runs the query against the provider's current set of coins.
    ///
    /// The coins are returned in the order the provider listed them. Any failure, whether
    /// from the provider or from a lookup for one of the coins, fails the whole query.
    pub async fn coins(&self) -> Result<CoinList<P::Authority>, CoinQueryError<P>> {
        let candidates = match &self.criteria.only_addresses {
            Some(addresses) => self.provider.coins_for_addresses(addresses),
            None => self.provider.coins(),
        }
        .map_err(QueryError::Provider)?;

        let candidate_count = candidates.len();
        let mut survivors = Vec::with_capacity(candidate_count);

        for coin in candidates {
            let admitted = self
                .criteria
                .admits(&coin)
                .map_err(|source| CoinLookupError {
                    coin: coin.id(),
                    source,
                })?;

            if admitted {
                survivors.push(coin);
            } else {
                trace!(coin = %coin, "coin rejected by state gates");
            }
        }

        debug!(
            candidates = candidate_count,
            survivors = survivors.len(),
            "applied coin state gates"
        );

        if self.criteria.only_colored_as.is_none() {
            return Ok(CoinList::new(survivors));
        }

        let color_values = try_join_all(survivors.iter().map(|coin| async move {
            coin.color_value()
                .await
                .map_err(|source| CoinLookupError {
                    coin: coin.id(),
                    source,
                })
        }))
        .await?;

        let coins: Vec<_> = survivors
            .into_iter()
            .zip(color_values)
            .filter(|(_, color_value)| self.criteria.admits_color(color_value.color_id()))
            .map(|(coin, _)| coin)
            .collect();

        debug!(survivors = coins.len(), "applied color gate");

        Ok(CoinList::new(coins))
    }
}

impl<P> Clone for CoinQuery<P> {
    fn clone(&self) -> Self {
        Self::with_criteria(Arc::clone(&self.provider), self.criteria.clone())
    }
}

impl<P> fmt::Debug for CoinQuery<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinQuery")
            .field("criteria", &self.criteria)
            .finish_non_exhaustive()
    }
}
