//! Repository Layer
//!
//! Key/value storage abstractions, backends, and the persistence gateway.

mod gateway;
mod memory;
mod traits;

#[cfg(not(target_arch = "wasm32"))]
mod db;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web_storage;


pub use gateway::{PersistenceGateway, CATALOG_KEY, ITEMS_KEY};
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

#[cfg(not(target_arch = "wasm32"))]
pub use db::SqliteStore;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web_storage::WebStorage;
