//! Catalog-to-Item Transfer
//!
//! Copies the staged catalog selection onto an item's checklist.

use log::{debug, info};

use super::catalog_store::CatalogStore;
use super::item_store::ItemStore;
use crate::domain::{ItemId, MaterialRequirement};

/// Append one `required = 1` row per selected catalog entry whose name is not
/// already on the item. Unresolved ids and name duplicates are skipped.
///
/// Returns the number of rows appended, or `None` when the item does not
/// exist (the selection is then left as it was).
pub fn apply_selection(items: &mut ItemStore, catalog: &mut CatalogStore, item_id: ItemId) -> Option<usize> {
    let Some(item) = items.get_mut(item_id) else {
        debug!("apply_selection: item {} not found", item_id);
        return None;
    };

    let materials = item.materials_mut();
    let mut added = 0;
    for id in catalog.selection() {
        let Some(entry) = catalog.find(id) else {
            debug!("apply_selection: catalog material {} not found", id);
            continue;
        };
        if materials.iter().any(|existing| existing.name == entry.name) {
            continue;
        }
        materials.push(MaterialRequirement::new(entry.name.clone(), 1).with_image(entry.image.clone()));
        added += 1;
    }

    catalog.clear_selection();
    info!("Applied {} catalog material(s) to item {}", added, item_id);
    Some(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, ItemDraft, ItemType, MAX_IMAGE_BYTES};

    fn setup() -> (ItemStore, CatalogStore, ItemId) {
        let mut items = ItemStore::default();
        let id = items
            .create(ItemDraft::new("Amber", ItemType::Character, 4), MAX_IMAGE_BYTES)
            .unwrap()
            .id;
        (items, CatalogStore::new(Catalog::builtin()), id)
    }

    #[test]
    fn test_apply_appends_in_selection_order() {
        let (mut items, mut catalog, id) = setup();
        catalog.toggle_selection("small_lamp_grass");
        catalog.toggle_selection("agnidus_agate");

        assert_eq!(apply_selection(&mut items, &mut catalog, id), Some(2));

        let materials = items.get(id).unwrap().materials();
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].name, "Small Lamp Grass");
        assert_eq!(materials[1].name, "Agnidus Agate");
        assert!(materials.iter().all(|m| m.required == 1 && m.obtained == 0));
        assert!(catalog.selection().is_empty());
    }

    #[test]
    fn test_apply_twice_yields_one_row() {
        let (mut items, mut catalog, id) = setup();

        catalog.toggle_selection("cecilia");
        apply_selection(&mut items, &mut catalog, id);
        catalog.toggle_selection("cecilia");
        assert_eq!(apply_selection(&mut items, &mut catalog, id), Some(0));

        let count = items
            .get(id)
            .unwrap()
            .materials()
            .iter()
            .filter(|m| m.name == "Cecilia")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_apply_skips_unresolved_and_copies_image() {
        let (mut items, mut catalog, id) = setup();
        let icon = "https://example.com/wit.png".to_string();
        let wit = catalog
            .add_entry("others", "Hero's Wit", Some(icon.clone()), MAX_IMAGE_BYTES)
            .unwrap()
            .id
            .clone();
        catalog.toggle_selection("does_not_exist");
        catalog.toggle_selection(&wit);

        assert_eq!(apply_selection(&mut items, &mut catalog, id), Some(1));
        let materials = items.get(id).unwrap().materials();
        assert_eq!(materials[0].image, Some(icon));
    }

    #[test]
    fn test_rows_are_independent_of_catalog() {
        let (mut items, mut catalog, id) = setup();
        catalog.toggle_selection("valberry");
        apply_selection(&mut items, &mut catalog, id);

        items.get_mut(id).unwrap().materials_mut()[0].name = "Renamed".to_string();
        assert_eq!(catalog.find("valberry").unwrap().name, "Valberry");
    }

    #[test]
    fn test_unknown_item_keeps_selection() {
        let (mut items, mut catalog, _) = setup();
        catalog.toggle_selection("valberry");

        assert_eq!(apply_selection(&mut items, &mut catalog, 42), None);
        assert_eq!(catalog.selection(), ["valberry".to_string()]);
    }
}
