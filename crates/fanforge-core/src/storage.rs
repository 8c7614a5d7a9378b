//! Durable key-value storage trait.
//!
//! The project repository persists its entire project list as one
//! serialized blob under a single fixed key of this medium. The trait is
//! deliberately minimal so storage backends stay interchangeable.

use crate::error::Result;

/// A durable string key-value medium.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// May fail with a persistence error if the medium rejects the write
    /// (e.g. quota exceeded).
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
