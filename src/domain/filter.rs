//! Item Filters
//!
//! Completion status partitions items before any other filter applies:
//! `completed` shows only completed items, every other key shows only
//! in-progress items that also match the key.

use super::entity::{DomainError, DomainResult};
use super::item::{Element, Item, ItemType};

/// Filter selected in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemFilter {
    #[default]
    All,
    InProgress,
    Completed,
    /// `"<type>-<rarity>"`, e.g. `character-5`
    TypeRarity(ItemType, u8),
    Element(Element),
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if *self == ItemFilter::Completed {
            return item.completed;
        }
        if item.completed {
            return false;
        }
        match self {
            ItemFilter::All | ItemFilter::InProgress | ItemFilter::Completed => true,
            ItemFilter::TypeRarity(item_type, rarity) => {
                item.item_type == *item_type && item.rarity == *rarity
            }
            ItemFilter::Element(element) => item.element == Some(*element),
        }
    }

    /// Matching items in store order
    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    /// Item counts shown in the two bucket headers
    pub fn count_buckets(&self, items: &[Item]) -> BucketCounts {
        let matching = items.iter().filter(|item| self.matches(item)).count();
        match self {
            ItemFilter::Completed => BucketCounts {
                in_progress: 0,
                completed: matching,
            },
            _ => BucketCounts {
                in_progress: matching,
                completed: 0,
            },
        }
    }

    pub fn key(&self) -> String {
        match self {
            ItemFilter::All => "all".to_string(),
            ItemFilter::InProgress => "in-progress".to_string(),
            ItemFilter::Completed => "completed".to_string(),
            ItemFilter::TypeRarity(item_type, rarity) => format!("{}-{}", item_type.as_str(), rarity),
            ItemFilter::Element(element) => element.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for ItemFilter {
    type Err = DomainError;

    fn from_str(key: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidFilter(key.to_string());

        match key {
            "all" => Ok(ItemFilter::All),
            "in-progress" => Ok(ItemFilter::InProgress),
            "completed" => Ok(ItemFilter::Completed),
            _ => {
                if let Some((item_type, rarity)) = key.split_once('-') {
                    let item_type = item_type.parse::<ItemType>().map_err(|_| invalid())?;
                    let rarity = rarity.parse::<u8>().map_err(|_| invalid())?;
                    Ok(ItemFilter::TypeRarity(item_type, rarity))
                } else {
                    key.parse::<Element>()
                        .map(ItemFilter::Element)
                        .map_err(|_| invalid())
                }
            }
        }
    }
}

/// Visible item counts per bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BucketCounts {
    pub in_progress: usize,
    pub completed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{ItemDraft, ItemFields};

    fn fields(name: &str, item_type: ItemType, rarity: u8, element: Option<Element>) -> ItemFields {
        ItemDraft {
            element,
            ..ItemDraft::new(name, item_type, rarity)
        }
        .validate(u64::MAX)
        .unwrap()
    }

    fn sample() -> Vec<Item> {
        let mut done = Item::new(3, fields("Diluc", ItemType::Character, 5, Some(Element::Pyro)));
        done.completed = true;
        vec![
            Item::new(1, fields("Amber", ItemType::Character, 4, Some(Element::Pyro))),
            Item::new(2, fields("Favonius Sword", ItemType::Weapon, 4, None)),
            done,
            Item::new(4, fields("Venti", ItemType::Character, 5, Some(Element::Anemo))),
        ]
    }

    fn ids(items: Vec<&Item>) -> Vec<i64> {
        items.into_iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("all".parse::<ItemFilter>().unwrap(), ItemFilter::All);
        assert_eq!("in-progress".parse::<ItemFilter>().unwrap(), ItemFilter::InProgress);
        assert_eq!(
            "weapon-5".parse::<ItemFilter>().unwrap(),
            ItemFilter::TypeRarity(ItemType::Weapon, 5)
        );
        assert_eq!("cryo".parse::<ItemFilter>().unwrap(), ItemFilter::Element(Element::Cryo));
        assert!(matches!("bow-4".parse::<ItemFilter>(), Err(DomainError::InvalidFilter(_))));
        assert!("sparkles".parse::<ItemFilter>().is_err());
    }

    #[test]
    fn test_key_round_trip() {
        for key in ["all", "in-progress", "completed", "character-4", "dendro"] {
            assert_eq!(key.parse::<ItemFilter>().unwrap().key(), key);
        }
    }

    #[test]
    fn test_completed_ignores_other_attributes() {
        let items = sample();
        assert_eq!(ids(ItemFilter::Completed.apply(&items)), vec![3]);
    }

    #[test]
    fn test_other_filters_exclude_completed() {
        let items = sample();
        assert_eq!(ids(ItemFilter::All.apply(&items)), vec![1, 2, 4]);
        assert_eq!(ids(ItemFilter::InProgress.apply(&items)), vec![1, 2, 4]);
        assert_eq!(ids(ItemFilter::Element(Element::Pyro).apply(&items)), vec![1]);
        assert_eq!(
            ids(ItemFilter::TypeRarity(ItemType::Character, 5).apply(&items)),
            vec![4]
        );
    }

    #[test]
    fn test_bucket_counts() {
        let items = sample();
        assert_eq!(
            ItemFilter::All.count_buckets(&items),
            BucketCounts { in_progress: 3, completed: 0 }
        );
        assert_eq!(
            ItemFilter::Completed.count_buckets(&items),
            BucketCounts { in_progress: 0, completed: 1 }
        );
    }
}
