pub use cc_wallet_coins::{
    AuthorityBinding, Coin, CoinAuthority, CoinError, CoinList, CoinLookupError, CoinQuery,
    CoinQueryCriteria, CoinQueryError, CoinSetProvider, CoinState, InvalidArgument, QueryError,
};
pub use cc_wallet_store::{
    AddressRecord, AddressStore, ConfigStore, LockTimeStore, MemoryStore, RawTxRecord,
    RawTxStore, SqliteStore, SqliteStoreOptions, StoreError, TxStatus,
};
pub use cc_wallet_test::{CoinSimulator, SimulatorConfig, SimulatorError};
pub use cc_wallet_types::{
    CoinId, ColorId, ColorValue, FreezeExpiry, FreezeOptions, ParseError, RawCoin, Script, Txid,
};
