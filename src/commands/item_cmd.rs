//! Item Commands
//!
//! Item CRUD, bucket moves, checklist editing and the filtered views.

use std::path::Path;

use log::debug;

use crate::domain::{
    load_image_file, BucketCounts, CountField, DomainResult, Item, ItemDraft, ItemField,
    ItemFilter, ItemId, MaterialEdit,
};
use crate::AppState;

impl AppState {
    /// Create an item from the add form; returns its id
    pub fn create_item(&mut self, draft: ItemDraft) -> DomainResult<ItemId> {
        let max = self.config.max_image_bytes;
        let id = self.items.create(draft, max)?.id;
        self.persist_items();
        Ok(id)
    }

    /// Apply the edit form; `Ok(false)` if the item no longer exists
    pub fn update_item(&mut self, id: ItemId, draft: ItemDraft) -> DomainResult<bool> {
        let max = self.config.max_image_bytes;
        if self.items.update(id, draft, max)?.is_none() {
            return Ok(false);
        }
        self.persist_items();
        Ok(true)
    }

    pub fn delete_item(&mut self, id: ItemId) -> bool {
        if self.items.delete(id).is_none() {
            debug!("delete_item: {} not found", id);
            return false;
        }
        if self.editing_item == Some(id) {
            self.editing_item = None;
        }
        self.persist_items();
        true
    }

    /// Flip completion; returns the new state
    pub fn toggle_item(&mut self, id: ItemId) -> Option<bool> {
        let completed = self.items.toggle_completed(id)?;
        self.persist_items();
        Some(completed)
    }

    /// Level ladder / rarity change from the item card
    pub fn set_item_field(&mut self, id: ItemId, field: &str, raw: &str) -> DomainResult<bool> {
        let field: ItemField = field.parse()?;
        Ok(self.items.set_field(id, field, raw) && self.persisted_items())
    }

    /// Drop an item into the completed or in-progress bucket
    pub fn move_to_bucket(&mut self, id: ItemId, completed: bool) -> bool {
        self.items.move_to_bucket(id, completed) && self.persisted_items()
    }

    // ========================
    // Edit dialog
    // ========================

    /// Open the edit dialog on an item
    pub fn begin_edit(&mut self, id: ItemId) -> Option<&Item> {
        if self.items.get(id).is_none() {
            debug!("begin_edit: {} not found", id);
            return None;
        }
        self.editing_item = Some(id);
        self.revision += 1;
        self.items.get(id)
    }

    pub fn editing_item(&self) -> Option<&Item> {
        self.editing_item.and_then(|id| self.items.get(id))
    }

    pub fn close_edit(&mut self) {
        if self.editing_item.take().is_some() {
            self.revision += 1;
        }
    }

    /// Read an image file for the form's preview, as a data URI
    pub fn load_image(&self, path: &Path) -> DomainResult<String> {
        load_image_file(path, self.config.max_image_bytes)
    }

    // ========================
    // Checklist
    // ========================

    pub fn add_material_row(&mut self, id: ItemId) -> bool {
        self.items.add_material_row(id) && self.persisted_items()
    }

    pub fn remove_material(&mut self, id: ItemId, index: usize) -> bool {
        self.items.remove_material(id, index) && self.persisted_items()
    }

    /// Inline count edit; `field` is `required` or `obtained`
    pub fn set_material_count(
        &mut self,
        id: ItemId,
        index: usize,
        field: &str,
        raw: &str,
    ) -> DomainResult<bool> {
        let field: CountField = field.parse()?;
        Ok(self.items.set_material_count(id, index, field, raw) && self.persisted_items())
    }

    pub fn save_material_edits(&mut self, id: ItemId, edits: Vec<MaterialEdit>) -> bool {
        self.items.save_material_edits(id, edits) && self.persisted_items()
    }

    // ========================
    // Views
    // ========================

    /// Switch the toolbar filter; an unknown key leaves the current one
    pub fn set_filter(&mut self, key: &str) -> DomainResult<()> {
        let filter: ItemFilter = key.parse()?;
        if filter != self.filter {
            self.filter = filter;
            self.revision += 1;
        }
        Ok(())
    }

    pub fn filter(&self) -> ItemFilter {
        self.filter
    }

    pub fn visible_items(&self) -> Vec<&Item> {
        self.items.filter(&self.filter)
    }

    pub fn bucket_counts(&self) -> BucketCounts {
        self.items.count_buckets(&self.filter)
    }

    pub fn completion(&self, id: ItemId) -> Option<u8> {
        self.items.get(id).map(Item::completion)
    }

    /// Flush after a successful store change; always true
    fn persisted_items(&mut self) -> bool {
        self.persist_items();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::domain::{DomainError, Element, ItemDraft, ItemType, MaterialEdit};
    use crate::repository::{MemoryStore, ITEMS_KEY};
    use crate::AppState;

    fn state() -> AppState {
        AppState::with_store(AppConfig::default(), Box::new(MemoryStore::new()))
    }

    fn amber() -> ItemDraft {
        ItemDraft {
            element: Some(Element::Pyro),
            include_ascension: true,
            include_talent: true,
            ..ItemDraft::new("Amber", ItemType::Character, 4)
        }
    }

    #[test]
    fn test_create_persists_and_bumps_revision() {
        let mut state = state();
        let before = state.revision();

        let id = state.create_item(amber()).unwrap();

        assert!(state.revision() > before);
        let saved = state.persisted(ITEMS_KEY).unwrap();
        assert!(saved.contains("\"name\":\"Amber\""));
        assert_eq!(state.items().get(id).unwrap().materials().len(), 8);
    }

    #[test]
    fn test_validation_error_changes_nothing() {
        let mut state = state();
        let before = state.revision();

        let err = state.create_item(ItemDraft::default()).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(state.revision(), before);
        assert!(state.persisted(ITEMS_KEY).is_none());
    }

    #[test]
    fn test_missing_ids_are_silent_noops() {
        let mut state = state();
        state.create_item(amber()).unwrap();
        let saved = state.persisted(ITEMS_KEY);
        let revision = state.revision();

        assert!(!state.delete_item(1));
        assert_eq!(state.toggle_item(1), None);
        assert!(!state.update_item(1, amber()).unwrap());
        assert!(!state.move_to_bucket(1, true));
        assert!(!state.set_item_field(1, "currentLevel", "40").unwrap());
        assert!(!state.add_material_row(1));

        assert_eq!(state.persisted(ITEMS_KEY), saved);
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn test_failed_save_keeps_mutation() {
        let mut state = AppState::with_store(AppConfig::default(), Box::new(MemoryStore::with_quota(10)));

        let id = state.create_item(amber()).unwrap();

        assert!(state.items().get(id).is_some());
        assert!(state.persisted(ITEMS_KEY).is_none());
        assert_eq!(state.toggle_item(id), Some(true));
    }

    #[test]
    fn test_filter_and_buckets() {
        let mut state = state();
        let amber = state.create_item(amber()).unwrap();
        state
            .create_item(ItemDraft::new("Skyward Harp", ItemType::Weapon, 5))
            .unwrap();
        state.move_to_bucket(amber, true);

        assert_eq!(state.visible_items().len(), 1);
        assert_eq!(state.bucket_counts().in_progress, 1);

        state.set_filter("completed").unwrap();
        assert_eq!(state.visible_items()[0].id, amber);
        assert_eq!(state.bucket_counts().completed, 1);
        assert_eq!(state.bucket_counts().in_progress, 0);

        state.set_filter("pyro").unwrap();
        assert!(state.visible_items().is_empty());

        let err = state.set_filter("hydro-9").unwrap_err();
        assert!(matches!(err, DomainError::InvalidFilter(_)));
        assert_eq!(state.filter().key(), "pyro");
    }

    #[test]
    fn test_edit_dialog_cleared_on_delete() {
        let mut state = state();
        let id = state.create_item(amber()).unwrap();

        assert_eq!(state.begin_edit(id).unwrap().name, "Amber");
        assert!(state.begin_edit(id + 1).is_none());
        assert_eq!(state.editing_item().unwrap().id, id);

        assert!(state.delete_item(id));
        assert!(state.editing_item().is_none());
    }

    #[test]
    fn test_checklist_editing_updates_completion() {
        let mut state = state();
        let id = state.create_item(ItemDraft::new("Bennett", ItemType::Character, 4)).unwrap();
        assert_eq!(state.completion(id), Some(100));

        assert!(state.save_material_edits(
            id,
            vec![
                MaterialEdit::from_raw("Windwheel Aster", "10", "5"),
                MaterialEdit::from_raw("", "3", "3"),
            ],
        ));
        assert_eq!(state.items().get(id).unwrap().materials().len(), 1);
        assert_eq!(state.completion(id), Some(50));

        assert!(state.set_material_count(id, 0, "obtained", "12").unwrap());
        assert_eq!(state.completion(id), Some(100));
        assert!(state.set_material_count(id, 0, "bogus", "1").is_err());

        assert!(state.remove_material(id, 0));
        assert!(!state.remove_material(id, 0));
    }

    #[test]
    fn test_set_item_field_coerces() {
        let mut state = state();
        let id = state.create_item(amber()).unwrap();

        assert!(state.set_item_field(id, "targetLevel", "80").unwrap());
        assert!(state.set_item_field(id, "currentLevel", "abc").unwrap());
        let item = state.items().get(id).unwrap();
        assert_eq!(item.target_level, 80);
        assert_eq!(item.current_level, 0);

        assert!(state.set_item_field(id, "name", "x").is_err());
    }
}
