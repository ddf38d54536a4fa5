use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::StoreError;

/// An address derived by the wallet, along with where it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRecord {
    pub address: String,
    pub account: u32,
    pub index: u32,
}

impl AddressRecord {
    pub fn new(address: impl Into<String>, account: u32, index: u32) -> Self {
        Self {
            address: address.into(),
            account,
            index,
        }
    }
}

/// Keeps track of the addresses that belong to the wallet.
pub trait AddressStore {
    /// Adds an address, returning false if it was already known.
    fn add_address(
        &self,
        record: AddressRecord,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Gets the addresses of an account, ordered by derivation index.
    fn addresses(
        &self,
        account: u32,
    ) -> impl Future<Output = Result<Vec<AddressRecord>, StoreError>> + Send;

    /// Gets every address, in the order they were added.
    fn all_addresses(&self) -> impl Future<Output = Result<Vec<AddressRecord>, StoreError>> + Send;
}
