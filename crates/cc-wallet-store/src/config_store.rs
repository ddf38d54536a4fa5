use std::future::Future;

use serde_json::Value;

use crate::StoreError;

/// Keeps wallet configuration as JSON values under string keys.
pub trait ConfigStore {
    /// Gets the value stored under a key.
    fn config(&self, key: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Stores a value, replacing any previous value for the key.
    fn set_config(
        &self,
        key: &str,
        value: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes a key, returning whether it was present.
    fn remove_config(&self, key: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
