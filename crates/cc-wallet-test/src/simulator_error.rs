use cc_wallet_store::StoreError;
use cc_wallet_types::CoinId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("unknown coin {0}")]
    UnknownCoin(CoinId),

    #[error("the simulated coin provider is offline")]
    ProviderOffline,

    #[error("color lookup failed for coin {0}")]
    ColorLookup(CoinId),

    #[error("lock time store error: {0}")]
    Store(#[from] StoreError),
}
