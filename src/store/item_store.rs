//! Item Store
//!
//! Ordered collection of tracked items. Insertion order is display order
//! within each bucket. Operations on an unknown id are no-ops and report
//! that through their return value.

use log::{debug, info, warn};

use super::ids::IdGenerator;
use crate::domain::{
    coerce_count, position_of, BucketCounts, CountField, DomainResult, Item, ItemDraft, ItemField,
    ItemFilter, ItemId, ItemType, MaterialEdit, MaterialRequirement,
};

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    ids: IdGenerator,
}

impl ItemStore {
    /// Wrap loaded items. Duplicate ids are reassigned so every id stays
    /// unique, and weapons saved with an element lose it.
    pub fn new(items: Vec<Item>) -> Self {
        let mut ids = IdGenerator::new();
        for item in &items {
            ids.observe(item.id);
        }

        let mut store = Self {
            items: Vec::with_capacity(items.len()),
            ids,
        };
        for mut item in items {
            if store.get(item.id).is_some() {
                let fresh = store.ids.next();
                warn!("Duplicate item id {} reassigned to {}", item.id, fresh);
                item.id = fresh;
            }
            if item.item_type == ItemType::Weapon && item.element.is_some() {
                warn!("Weapon {} '{}' had an element, cleared", item.id, item.name);
                item.element = None;
            }
            store.items.push(item);
        }
        store
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        position_of(&self.items, &id).map(|index| &self.items[index])
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        let index = position_of(&self.items, &id)?;
        self.items.get_mut(index)
    }

    /// Validate the draft, assign an id, generate the checklist, append
    pub fn create(&mut self, draft: ItemDraft, max_image_bytes: u64) -> DomainResult<&Item> {
        let fields = draft.validate(max_image_bytes)?;
        let item = Item::new(self.ids.next(), fields);
        info!(
            "Created item {} '{}' with {} materials",
            item.id,
            item.name,
            item.materials().len()
        );
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Merge an edit onto an existing item. `Ok(None)` if the id is unknown.
    pub fn update(
        &mut self,
        id: ItemId,
        draft: ItemDraft,
        max_image_bytes: u64,
    ) -> DomainResult<Option<&Item>> {
        let Some(index) = position_of(&self.items, &id) else {
            debug!("Update skipped, item {} not found", id);
            return Ok(None);
        };
        let fields = draft.validate(max_image_bytes)?;
        let item = &mut self.items[index];
        item.merge(fields);
        info!("Updated item {}", id);
        Ok(Some(&*item))
    }

    pub fn delete(&mut self, id: ItemId) -> Option<Item> {
        let index = position_of(&self.items, &id)?;
        let removed = self.items.remove(index);
        info!("Deleted item {} '{}'", removed.id, removed.name);
        Some(removed)
    }

    /// Flip the completed flag; returns the new value
    pub fn toggle_completed(&mut self, id: ItemId) -> Option<bool> {
        let item = self.get_mut(id)?;
        item.completed = !item.completed;
        Some(item.completed)
    }

    /// Set a scalar field from raw input (integer coercion, invalid -> 0)
    pub fn set_field(&mut self, id: ItemId, field: ItemField, raw: &str) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.set_field(field, coerce_count(raw));
                true
            }
            None => false,
        }
    }

    /// Drop handler: put the item in the completed or in-progress bucket
    pub fn move_to_bucket(&mut self, id: ItemId, completed: bool) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.completed = completed;
                true
            }
            None => false,
        }
    }

    pub fn filter(&self, filter: &ItemFilter) -> Vec<&Item> {
        filter.apply(&self.items)
    }

    pub fn count_buckets(&self, filter: &ItemFilter) -> BucketCounts {
        filter.count_buckets(&self.items)
    }

    // ========================
    // Checklist editing
    // ========================

    pub fn add_material_row(&mut self, id: ItemId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.materials_mut().push(MaterialRequirement::blank());
                true
            }
            None => false,
        }
    }

    pub fn remove_material(&mut self, id: ItemId, index: usize) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        let materials = item.materials_mut();
        if index >= materials.len() {
            return false;
        }
        materials.remove(index);
        true
    }

    pub fn set_material_count(&mut self, id: ItemId, index: usize, field: CountField, raw: &str) -> bool {
        let Some(row) = self
            .get_mut(id)
            .and_then(|item| item.materials_mut().get_mut(index))
        else {
            return false;
        };
        row.set_count(field, coerce_count(raw));
        true
    }

    /// Apply the checklist editor's rows positionally.
    ///
    /// Existing rows keep their image; extra edits become new rows; rows left
    /// beyond the edit list are untouched. Rows whose name ends up blank are
    /// dropped.
    pub fn save_material_edits(&mut self, id: ItemId, edits: Vec<MaterialEdit>) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        let materials = item.materials_mut();

        for (index, edit) in edits.into_iter().enumerate() {
            let name = edit.name.trim().to_string();
            match materials.get_mut(index) {
                Some(row) => {
                    row.name = name;
                    row.required = edit.required;
                    row.obtained = edit.obtained;
                }
                None => materials.push(MaterialRequirement {
                    obtained: edit.obtained,
                    ..MaterialRequirement::new(name, edit.required)
                }),
            }
        }

        materials.retain(|row| !row.name.trim().is_empty());
        true
    }
}
