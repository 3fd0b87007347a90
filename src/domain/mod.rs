//! Domain Layer
//!
//! Contains all domain entities, templates and derived-state functions.
//! No storage concerns live here.

mod catalog;
mod entity;
mod filter;
mod image;
mod item;
mod material;
pub mod progress;
pub mod templates;

pub use catalog::{Catalog, CatalogMaterial, Category};
pub use entity::{position_of, DomainError, DomainResult, Entity};
pub use filter::{BucketCounts, ItemFilter};
pub use image::{
    check_image_reference, default_item_image, encode_data_uri, inspect_data_uri,
    is_placeholder_image, load_image_file, validate_image, MAX_IMAGE_BYTES,
};
pub use item::{
    Element, Item, ItemDraft, ItemField, ItemFields, ItemId, ItemType, DEFAULT_CURRENT_LEVEL,
    DEFAULT_TARGET_LEVEL,
};
pub use material::{coerce_count, CountField, MaterialEdit, MaterialRequirement};
