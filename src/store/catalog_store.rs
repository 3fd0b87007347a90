//! Catalog Store
//!
//! User-editable materials library plus the transient multi-select used to
//! copy entries onto an item's checklist. The selection is never persisted.

use log::{debug, info};

use super::ids::IdGenerator;
use crate::domain::{
    check_image_reference, position_of, Catalog, CatalogMaterial, Category, DomainError,
    DomainResult,
};

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    catalog: Catalog,
    selection: Vec<String>,
    ids: IdGenerator,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Entries of a category given by its key
    pub fn entries(&self, category: &str) -> DomainResult<&[CatalogMaterial]> {
        let category: Category = category.parse()?;
        Ok(self.catalog.entries(category))
    }

    /// Replace an empty library with the built-in one. Returns entries added.
    pub fn seed_defaults(&mut self) -> usize {
        if !self.catalog.is_empty() {
            return 0;
        }
        self.catalog = Catalog::builtin();
        info!("Seeded catalog with {} built-in materials", self.catalog.len());
        self.catalog.len()
    }

    /// Append a new entry to `category`, with a fresh id unique across all categories
    pub fn add_entry(
        &mut self,
        category: &str,
        name: &str,
        image: Option<String>,
        max_image_bytes: u64,
    ) -> DomainResult<&CatalogMaterial> {
        let category: Category = category.parse()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Material name is required"));
        }
        let image = image.map(|image| image.trim().to_string()).filter(|image| !image.is_empty());
        if let Some(image) = &image {
            check_image_reference(image, max_image_bytes)?;
        }

        let id = loop {
            let candidate = self.ids.next().to_string();
            if self.catalog.find(&candidate).is_none() {
                break candidate;
            }
        };

        info!("Added catalog material {} '{}' to {}", id, name, category.key());
        let entries = self.catalog.entries_mut(category);
        entries.push(CatalogMaterial::new(id, name, image));
        Ok(&entries[entries.len() - 1])
    }

    /// Remove by id from `category`; `Ok(None)` if it was not there
    pub fn remove_entry(&mut self, category: &str, id: &str) -> DomainResult<Option<CatalogMaterial>> {
        let category: Category = category.parse()?;
        let entries = self.catalog.entries_mut(category);
        let Some(index) = position_of(entries, &id.to_string()) else {
            debug!("Catalog material {} not in {}", id, category.key());
            return Ok(None);
        };

        let removed = entries.remove(index);
        self.selection.retain(|selected| selected != id);
        info!("Removed catalog material {} '{}'", removed.id, removed.name);
        Ok(Some(removed))
    }

    pub fn find(&self, id: &str) -> Option<&CatalogMaterial> {
        self.catalog.find(id)
    }

    // ========================
    // Selection
    // ========================

    /// Select or deselect an entry; returns whether it is now selected
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if let Some(index) = self.selection.iter().position(|selected| selected == id) {
            self.selection.remove(index);
            false
        } else {
            self.selection.push(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|selected| selected == id)
    }

    /// Selected ids in the order they were picked
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{encode_data_uri, MAX_IMAGE_BYTES};

    #[test]
    fn test_add_entry_assigns_unique_ids() {
        let mut store = CatalogStore::default();
        let a = store
            .add_entry("talent-books", "Teachings of Prosperity", None, MAX_IMAGE_BYTES)
            .unwrap()
            .id
            .clone();
        let b = store
            .add_entry("others", "  Hero's Wit ", None, MAX_IMAGE_BYTES)
            .unwrap()
            .id
            .clone();

        assert_ne!(a, b);
        assert_eq!(store.find(&b).unwrap().name, "Hero's Wit");
        assert_eq!(store.entries("talent-books").unwrap().len(), 1);
    }

    #[test]
    fn test_add_entry_rejects_unknown_category() {
        let mut store = CatalogStore::default();
        let err = store.add_entry("potions", "Sweet Madame", None, MAX_IMAGE_BYTES).unwrap_err();
        assert_eq!(err, DomainError::InvalidCategory("potions".to_string()));
        assert!(store.catalog().is_empty());
    }

    #[test]
    fn test_add_entry_validates_name_and_image() {
        let mut store = CatalogStore::default();
        assert!(store.add_entry("others", "   ", None, MAX_IMAGE_BYTES).is_err());

        let text = encode_data_uri("text/plain", b"nope");
        assert!(store.add_entry("others", "Mora", Some(text), MAX_IMAGE_BYTES).is_err());

        let icon = encode_data_uri("image/png", &[1, 2, 3]);
        let entry = store.add_entry("others", "Mora", Some(icon.clone()), MAX_IMAGE_BYTES).unwrap();
        assert_eq!(entry.image, Some(icon));
    }

    #[test]
    fn test_remove_entry() {
        let mut store = CatalogStore::new(Catalog::builtin());
        store.toggle_selection("wolfhook");

        let removed = store.remove_entry("local-specialties", "wolfhook").unwrap().unwrap();
        assert_eq!(removed.name, "Wolfhook");
        assert!(store.find("wolfhook").is_none());
        assert!(store.selection().is_empty());

        assert!(store.remove_entry("local-specialties", "wolfhook").unwrap().is_none());
        // wrong category leaves the entry alone
        assert!(store.remove_entry("others", "cecilia").unwrap().is_none());
        assert!(store.find("cecilia").is_some());
        assert!(store.remove_entry("potions", "cecilia").is_err());
    }

    #[test]
    fn test_seed_defaults_only_when_empty() {
        let mut store = CatalogStore::default();
        assert_eq!(store.seed_defaults(), 46);
        assert_eq!(store.seed_defaults(), 0);

        let mut custom = CatalogStore::default();
        custom.add_entry("others", "Mora", None, MAX_IMAGE_BYTES).unwrap();
        assert_eq!(custom.seed_defaults(), 0);
        assert_eq!(custom.catalog().len(), 1);
    }

    #[test]
    fn test_toggle_selection_keeps_pick_order() {
        let mut store = CatalogStore::new(Catalog::builtin());
        assert!(store.toggle_selection("cecilia"));
        assert!(store.toggle_selection("agnidus_agate"));
        assert!(store.toggle_selection("valberry"));
        assert!(!store.toggle_selection("agnidus_agate"));

        assert_eq!(store.selection(), ["cecilia".to_string(), "valberry".to_string()]);
        assert!(store.is_selected("valberry"));

        store.clear_selection();
        assert!(store.selection().is_empty());
    }
}
