use thiserror::Error;

/// An error returned by a state query or command on a [`Coin`](crate::Coin).
#[derive(Debug, Error)]
pub enum CoinError<E> {
    /// The coin was created without a coin authority, so it has no state to report.
    #[error("no coin authority is bound to this coin")]
    NoAuthorityBound,

    /// The coin authority failed; the error is passed through untouched.
    #[error("coin authority error: {0}")]
    Authority(#[source] E),
}

impl<E> CoinError<E> {
    /// Returns the authority's error, if that is where the failure came from.
    pub fn authority_error(&self) -> Option<&E> {
        match self {
            Self::NoAuthorityBound => None,
            Self::Authority(error) => Some(error),
        }
    }
}
