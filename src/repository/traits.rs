//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for local key/value storage.
//! Implementations can use SQLite, in-memory maps, browser localStorage, etc.

use crate::domain::DomainResult;

/// Synchronous string key/value storage
///
/// Values are opaque text (JSON in practice). Failures are reported as
/// `DomainError::Persistence`.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Insert or replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> DomainResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> DomainResult<()>;
}
