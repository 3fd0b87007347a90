//! Store Layer
//!
//! In-memory stores that own the application's mutable state.

mod catalog_store;
mod ids;
mod item_store;
mod transfer;

pub use catalog_store::CatalogStore;
pub use ids::IdGenerator;
pub use item_store::ItemStore;
pub use transfer::apply_selection;
