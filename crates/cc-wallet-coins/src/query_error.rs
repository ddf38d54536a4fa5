use cc_wallet_types::CoinId;
use thiserror::Error;

use crate::{CoinAuthority, CoinError, CoinSetProvider};

/// A builder method on [`CoinQuery`](crate::CoinQuery) was given input it can't use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("expected at least one color id")]
    NoColorIds,

    #[error("expected at least one address")]
    NoAddresses,
}

/// A lookup for a specific coin failed.
#[derive(Debug, Error)]
#[error("failed to look up coin {coin}: {source}")]
pub struct CoinLookupError<E> {
    pub coin: CoinId,
    #[source]
    pub source: CoinError<E>,
}

/// An error which aborted the execution of a coin query.
#[derive(Debug, Error)]
pub enum QueryError<P, A> {
    /// The candidate coins could not be fetched from the provider.
    #[error("failed to fetch candidate coins: {0}")]
    Provider(#[source] P),

    /// The state or color of one of the candidate coins could not be resolved.
    #[error(transparent)]
    Coin(#[from] CoinLookupError<A>),
}

/// The error type of [`CoinQuery::coins`](crate::CoinQuery::coins) for a given provider.
pub type CoinQueryError<P> = QueryError<
    <P as CoinSetProvider>::Error,
    <<P as CoinSetProvider>::Authority as CoinAuthority>::Error,
>;
