//! Item Entity
//!
//! A tracked character or weapon with its upgrade-material checklist.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::image;
use super::material::MaterialRequirement;
use super::templates;

pub type ItemId = i64;

pub const DEFAULT_CURRENT_LEVEL: u32 = 1;
pub const DEFAULT_TARGET_LEVEL: u32 = 90;

/// Item type determines which material templates apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Character,
    Weapon,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Character => "character",
            ItemType::Weapon => "weapon",
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "character" => Ok(ItemType::Character),
            "weapon" => Ok(ItemType::Weapon),
            other => Err(DomainError::validation(format!("unknown item type '{}'", other))),
        }
    }
}

/// Character element (vision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Anemo,
    Geo,
    Electro,
    Dendro,
    Hydro,
    Pyro,
    Cryo,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::Anemo,
        Element::Geo,
        Element::Electro,
        Element::Dendro,
        Element::Hydro,
        Element::Pyro,
        Element::Cryo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Anemo => "anemo",
            Element::Geo => "geo",
            Element::Electro => "electro",
            Element::Dendro => "dendro",
            Element::Hydro => "hydro",
            Element::Pyro => "pyro",
            Element::Cryo => "cryo",
        }
    }
}

impl std::str::FromStr for Element {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Element::ALL
            .into_iter()
            .find(|element| element.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown element '{}'", s)))
    }
}

fn default_current_level() -> u32 {
    DEFAULT_CURRENT_LEVEL
}

fn default_target_level() -> u32 {
    DEFAULT_TARGET_LEVEL
}

/// A tracked character or weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, creation-timestamp derived
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Star rating
    pub rarity: u8,
    /// Only set for characters
    #[serde(default)]
    pub element: Option<Element>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_current_level")]
    pub current_level: u32,
    #[serde(default = "default_target_level")]
    pub target_level: u32,
    #[serde(default)]
    pub include_ascension: bool,
    #[serde(default)]
    pub include_talent: bool,
    /// Bucket flag, independent of material progress
    #[serde(default)]
    pub completed: bool,
    /// Owned checklist. `None` only for records saved before checklists existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<MaterialRequirement>>,
}

impl Item {
    /// Create a new item, generating its checklist from the templates
    pub fn new(id: ItemId, fields: ItemFields) -> Self {
        let materials = templates::generate(
            fields.item_type,
            fields.rarity,
            fields.include_ascension,
            fields.include_talent,
        );
        let image_url = fields
            .image_url
            .unwrap_or_else(|| image::default_item_image(fields.item_type));

        Self {
            id,
            name: fields.name,
            item_type: fields.item_type,
            rarity: fields.rarity,
            element: fields.element,
            image_url,
            notes: fields.notes,
            current_level: fields.current_level,
            target_level: fields.target_level,
            include_ascension: fields.include_ascension,
            include_talent: fields.include_talent,
            completed: false,
            materials: Some(materials),
        }
    }

    /// Field-by-field merge of an edit.
    ///
    /// `id`, `completed` and an existing checklist are never touched; a record
    /// without a checklist gets one generated from the merged flags.
    pub fn merge(&mut self, fields: ItemFields) {
        let placeholder = image::is_placeholder_image(&self.image_url);

        self.name = fields.name;
        self.item_type = fields.item_type;
        self.rarity = fields.rarity;
        self.element = fields.element;
        self.notes = fields.notes;
        self.current_level = fields.current_level;
        self.target_level = fields.target_level;
        self.include_ascension = fields.include_ascension;
        self.include_talent = fields.include_talent;

        match fields.image_url {
            Some(url) => self.image_url = url,
            None if placeholder || self.image_url.is_empty() => {
                self.image_url = image::default_item_image(self.item_type);
            }
            None => {}
        }

        if self.materials.is_none() {
            self.materials = Some(templates::generate(
                self.item_type,
                self.rarity,
                self.include_ascension,
                self.include_talent,
            ));
        }
    }

    /// Checklist rows (empty for legacy records)
    pub fn materials(&self) -> &[MaterialRequirement] {
        self.materials.as_deref().unwrap_or(&[])
    }

    pub fn materials_mut(&mut self) -> &mut Vec<MaterialRequirement> {
        self.materials.get_or_insert_with(Vec::new)
    }

    pub fn set_field(&mut self, field: ItemField, value: u32) {
        match field {
            ItemField::CurrentLevel => self.current_level = value,
            ItemField::TargetLevel => self.target_level = value,
            ItemField::Rarity => self.rarity = value.min(u8::MAX as u32) as u8,
        }
    }

    /// Percent of required materials obtained
    pub fn completion(&self) -> u8 {
        super::progress::percent(self.materials())
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Scalar fields the item card edits in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    CurrentLevel,
    TargetLevel,
    Rarity,
}

impl std::str::FromStr for ItemField {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "currentLevel" => Ok(ItemField::CurrentLevel),
            "targetLevel" => Ok(ItemField::TargetLevel),
            "rarity" => Ok(ItemField::Rarity),
            other => Err(DomainError::validation(format!("unknown item field '{}'", other))),
        }
    }
}

/// Raw add/edit form submission
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub rarity: Option<u8>,
    pub element: Option<Element>,
    /// `None` keeps the current image (or the placeholder for new items)
    pub image_url: Option<String>,
    pub notes: String,
    pub current_level: Option<u32>,
    pub target_level: Option<u32>,
    pub include_ascension: bool,
    pub include_talent: bool,
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub item_type: ItemType,
    pub rarity: u8,
    pub element: Option<Element>,
    pub image_url: Option<String>,
    pub notes: String,
    pub current_level: u32,
    pub target_level: u32,
    pub include_ascension: bool,
    pub include_talent: bool,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, item_type: ItemType, rarity: u8) -> Self {
        Self {
            name: name.into(),
            item_type: Some(item_type),
            rarity: Some(rarity),
            ..Default::default()
        }
    }

    /// Check required fields and normalize the rest
    pub fn validate(self, max_image_bytes: u64) -> DomainResult<ItemFields> {
        let name = self.name.trim().to_string();
        let (item_type, rarity) = match (name.is_empty(), self.item_type, self.rarity) {
            (false, Some(item_type), Some(rarity)) if rarity > 0 => (item_type, rarity),
            _ => {
                return Err(DomainError::validation(
                    "Please fill in all required fields (Name, Type, Rarity)",
                ))
            }
        };

        let image_url = match self.image_url.map(|url| url.trim().to_string()) {
            Some(url) if !url.is_empty() => {
                image::check_image_reference(&url, max_image_bytes)?;
                Some(url)
            }
            _ => None,
        };

        Ok(ItemFields {
            name,
            item_type,
            rarity,
            // Weapons never carry an element
            element: match item_type {
                ItemType::Character => self.element,
                ItemType::Weapon => None,
            },
            image_url,
            notes: self.notes.trim().to_string(),
            current_level: self.current_level.unwrap_or(DEFAULT_CURRENT_LEVEL),
            target_level: self.target_level.unwrap_or(DEFAULT_TARGET_LEVEL),
            include_ascension: self.include_ascension,
            include_talent: self.include_talent,
        })
    }
}
