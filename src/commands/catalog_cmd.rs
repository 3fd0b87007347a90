//! Catalog Commands
//!
//! Library add/remove, the multi-select, and applying it to an item.

use crate::domain::{CatalogMaterial, DomainResult, ItemId};
use crate::store;
use crate::AppState;

impl AppState {
    /// Add a material to a category; returns the new entry's id
    pub fn add_catalog_entry(
        &mut self,
        category: &str,
        name: &str,
        image: Option<String>,
    ) -> DomainResult<String> {
        let max = self.config.max_image_bytes;
        let id = self.catalog.add_entry(category, name, image, max)?.id.clone();
        self.persist_catalog();
        Ok(id)
    }

    /// Remove a material; `Ok(false)` if it was not in the category
    pub fn remove_catalog_entry(&mut self, category: &str, id: &str) -> DomainResult<bool> {
        if self.catalog.remove_entry(category, id)?.is_none() {
            return Ok(false);
        }
        self.persist_catalog();
        Ok(true)
    }

    pub fn catalog_entries(&self, category: &str) -> DomainResult<&[CatalogMaterial]> {
        self.catalog.entries(category)
    }

    /// Select or deselect a catalog entry. The selection is never persisted.
    pub fn toggle_catalog_selection(&mut self, id: &str) -> bool {
        let selected = self.catalog.toggle_selection(id);
        self.revision += 1;
        selected
    }

    pub fn clear_catalog_selection(&mut self) {
        self.catalog.clear_selection();
        self.revision += 1;
    }

    /// Copy the selected catalog materials onto an item's checklist.
    /// Returns the number of rows added, `None` if the item is gone.
    pub fn apply_selection(&mut self, item_id: ItemId) -> Option<usize> {
        let added = store::apply_selection(&mut self.items, &mut self.catalog, item_id)?;
        self.persist_items();
        Some(added)
    }
}
