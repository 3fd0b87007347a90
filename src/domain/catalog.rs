//! Materials Catalog
//!
//! Reusable material definitions grouped into a fixed set of categories.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::entity::{DomainError, DomainResult, Entity};

/// Fixed catalog categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AscensionGems,
    WeeklyBoss,
    NormalBoss,
    EliteDrops,
    GeneralDrops,
    LocalSpecialties,
    TalentBooks,
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::AscensionGems,
        Category::WeeklyBoss,
        Category::NormalBoss,
        Category::EliteDrops,
        Category::GeneralDrops,
        Category::LocalSpecialties,
        Category::TalentBooks,
        Category::Others,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::AscensionGems => "ascension-gems",
            Category::WeeklyBoss => "weekly-boss",
            Category::NormalBoss => "normal-boss",
            Category::EliteDrops => "elite-drops",
            Category::GeneralDrops => "general-drops",
            Category::LocalSpecialties => "local-specialties",
            Category::TalentBooks => "talent-books",
            Category::Others => "others",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(key: &str) -> DomainResult<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.key() == key)
            .ok_or_else(|| DomainError::InvalidCategory(key.to_string()))
    }
}

/// A reusable material definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMaterial {
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CatalogMaterial {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.filter(|image| !image.is_empty()),
        }
    }
}

impl Entity for CatalogMaterial {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Ids written by earlier versions may be numbers
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "catalog id must be text or a number, got {}",
            other
        ))),
    }
}

/// Category-partitioned catalog. Serializes as an object with all eight keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Catalog {
    pub ascension_gems: Vec<CatalogMaterial>,
    pub weekly_boss: Vec<CatalogMaterial>,
    pub normal_boss: Vec<CatalogMaterial>,
    pub elite_drops: Vec<CatalogMaterial>,
    pub general_drops: Vec<CatalogMaterial>,
    pub local_specialties: Vec<CatalogMaterial>,
    pub talent_books: Vec<CatalogMaterial>,
    pub others: Vec<CatalogMaterial>,
}

impl Catalog {
    pub fn entries(&self, category: Category) -> &[CatalogMaterial] {
        match category {
            Category::AscensionGems => &self.ascension_gems,
            Category::WeeklyBoss => &self.weekly_boss,
            Category::NormalBoss => &self.normal_boss,
            Category::EliteDrops => &self.elite_drops,
            Category::GeneralDrops => &self.general_drops,
            Category::LocalSpecialties => &self.local_specialties,
            Category::TalentBooks => &self.talent_books,
            Category::Others => &self.others,
        }
    }

    pub fn entries_mut(&mut self, category: Category) -> &mut Vec<CatalogMaterial> {
        match category {
            Category::AscensionGems => &mut self.ascension_gems,
            Category::WeeklyBoss => &mut self.weekly_boss,
            Category::NormalBoss => &mut self.normal_boss,
            Category::EliteDrops => &mut self.elite_drops,
            Category::GeneralDrops => &mut self.general_drops,
            Category::LocalSpecialties => &mut self.local_specialties,
            Category::TalentBooks => &mut self.talent_books,
            Category::Others => &mut self.others,
        }
    }

    /// All entries, category by category
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CatalogMaterial)> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.entries(category).iter().map(move |m| (category, m)))
    }

    /// First entry with `id` in any category.
    ///
    /// Ids are assumed unique across categories; entries loaded from storage
    /// are not checked for this.
    pub fn find(&self, id: &str) -> Option<&CatalogMaterial> {
        self.iter().map(|(_, material)| material).find(|material| material.id == id)
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|category| self.entries(*category).is_empty())
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|category| self.entries(*category).len()).sum()
    }

    /// Catalog shipped with the app, used to seed an empty library
    pub fn builtin() -> Self {
        fn rows(entries: &[(&str, &str)]) -> Vec<CatalogMaterial> {
            entries
                .iter()
                .map(|&(id, name)| CatalogMaterial::new(id, name, None))
                .collect()
        }

        Self {
            ascension_gems: rows(&[
                ("vajrada_amethyst", "Vajrada Amethyst"),
                ("varunada_lazurite", "Varunada Lazurite"),
                ("agnidus_agate", "Agnidus Agate"),
                ("nagadus_emerald", "Nagadus Emerald"),
                ("shivada_jade", "Shivada Jade"),
                ("vayuda_turquoise", "Vayuda Turquoise"),
                ("prithiva_topaz", "Prithiva Topaz"),
            ]),
            weekly_boss: rows(&[
                ("dvalins_plume", "Dvalin's Plume"),
                ("dvalins_claw", "Dvalin's Claw"),
                ("dvalins_sigh", "Dvalin's Sigh"),
                ("tail_of_boreas", "Tail of Boreas"),
                ("ring_of_boreas", "Ring of Boreas"),
                ("spirit_locket_of_boreas", "Spirit Locket of Boreas"),
            ]),
            normal_boss: rows(&[
                ("hurricane_seed", "Hurricane Seed"),
                ("lightning_prism", "Lightning Prism"),
                ("basalt_pillar", "Basalt Pillar"),
                ("hoarfrost_core", "Hoarfrost Core"),
                ("cleansing_heart", "Cleansing Heart"),
                ("everflame_seed", "Everflame Seed"),
            ]),
            elite_drops: rows(&[
                ("chaos_device", "Chaos Device"),
                ("chaos_circuit", "Chaos Circuit"),
                ("chaos_core", "Chaos Core"),
                ("mist_flower_corolla", "Mist Flower Corolla"),
                ("flaming_flower_stamen", "Flaming Flower Stamen"),
            ]),
            general_drops: rows(&[
                ("slime_condensate", "Slime Condensate"),
                ("slime_secretions", "Slime Secretions"),
                ("slime_concentrate", "Slime Concentrate"),
                ("hilichurl_mask", "Damaged Mask"),
                ("stained_mask", "Stained Mask"),
                ("ominous_mask", "Ominous Mask"),
            ]),
            local_specialties: rows(&[
                ("calla_lily", "Calla Lily"),
                ("cecilia", "Cecilia"),
                ("dandelion_seed", "Dandelion Seed"),
                ("philanemo_mushroom", "Philanemo Mushroom"),
                ("small_lamp_grass", "Small Lamp Grass"),
                ("valberry", "Valberry"),
                ("wolfhook", "Wolfhook"),
            ]),
            talent_books: rows(&[
                ("teachings_of_freedom", "Teachings of Freedom"),
                ("guide_to_freedom", "Guide to Freedom"),
                ("philosophies_of_freedom", "Philosophies of Freedom"),
                ("teachings_of_resistance", "Teachings of Resistance"),
                ("guide_to_resistance", "Guide to Resistance"),
                ("philosophies_of_resistance", "Philosophies of Resistance"),
            ]),
            others: rows(&[
                ("crown_of_insight", "Crown of Insight"),
                ("dream_solvent", "Dream Solvent"),
                ("dust_of_azoth", "Dust of Azoth"),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
        assert!(matches!(
            "potions".parse::<Category>(),
            Err(DomainError::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_default_is_eight_empty_categories() {
        let json = serde_json::to_value(Catalog::default()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 8);
        for category in Category::ALL {
            assert_eq!(object[category.key()], serde_json::json!([]));
        }
    }

    #[test]
    fn test_missing_categories_default_to_empty() {
        let catalog: Catalog =
            serde_json::from_str(r#"{"others":[{"id":1700000000000,"name":"Sanctifying Essence"}]}"#)
                .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.others[0].id, "1700000000000");
        assert!(catalog.ascension_gems.is_empty());
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 46);
        assert_eq!(catalog.entries(Category::Others).len(), 3);
        assert_eq!(catalog.find("hilichurl_mask").unwrap().name, "Damaged Mask");
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn test_find_scans_all_categories() {
        let mut catalog = Catalog::default();
        catalog
            .entries_mut(Category::TalentBooks)
            .push(CatalogMaterial::new("gold", "Teachings of Gold", None));
        assert_eq!(catalog.find("gold").unwrap().name, "Teachings of Gold");
    }
}
