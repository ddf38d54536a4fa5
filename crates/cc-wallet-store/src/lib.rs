mod address_store;
mod config_store;
mod lock_time_store;
mod memory_store;
mod raw_tx_store;
mod sqlite_store;
mod store_error;

pub use address_store::*;
pub use config_store::*;
pub use lock_time_store::*;
pub use memory_store::*;
pub use raw_tx_store::*;
pub use sqlite_store::*;
pub use store_error::*;
