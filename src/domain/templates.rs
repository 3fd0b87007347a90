//! Material Templates
//!
//! Static checklists applied when an item is created.

use super::item::ItemType;
use super::material::MaterialRequirement;

/// Template row: material name and required count
type TemplateRow = (&'static str, u32);

const CHARACTER_4: &[TemplateRow] = &[
    ("Character EXP Material", 171),
    ("Elemental Gem", 46),
    ("Local Specialty", 168),
    ("Common Enemy Drop", 18),
];

const CHARACTER_5: &[TemplateRow] = &[
    ("Character EXP Material", 171),
    ("Elemental Gem", 46),
    ("Local Specialty", 168),
    ("Common Enemy Drop", 18),
    ("Boss Material", 46),
];

const WEAPON_4: &[TemplateRow] = &[
    ("Weapon EXP Material", 605),
    ("Weapon Ascension Material", 15),
    ("Common Enemy Drop", 23),
];

const WEAPON_5: &[TemplateRow] = &[
    ("Weapon EXP Material", 605),
    ("Weapon Ascension Material", 15),
    ("Elite Enemy Drop", 23),
    ("Weekly Boss Material", 6),
];

/// Shared by every character regardless of rarity
const TALENT: &[TemplateRow] = &[
    ("Talent Book", 114),
    ("Common Enemy Drop", 18),
    ("Weekly Boss Material", 18),
    ("Crown of Insight", 3),
];

/// Ascension template for a `(type, rarity)` pair, if one exists
pub fn ascension_template(item_type: ItemType, rarity: u8) -> Option<&'static [TemplateRow]> {
    match (item_type, rarity) {
        (ItemType::Character, 4) => Some(CHARACTER_4),
        (ItemType::Character, 5) => Some(CHARACTER_5),
        (ItemType::Weapon, 4) => Some(WEAPON_4),
        (ItemType::Weapon, 5) => Some(WEAPON_5),
        _ => None,
    }
}

fn instantiate(rows: &[TemplateRow]) -> impl Iterator<Item = MaterialRequirement> + '_ {
    rows.iter()
        .map(|&(name, required)| MaterialRequirement::new(name, required))
}

/// Build a fresh checklist: ascension rows first, then talent rows.
///
/// Every call returns newly allocated rows with `obtained = 0`; unknown
/// `(type, rarity)` pairs simply contribute nothing.
pub fn generate(
    item_type: ItemType,
    rarity: u8,
    include_ascension: bool,
    include_talent: bool,
) -> Vec<MaterialRequirement> {
    let mut materials = Vec::new();

    if include_ascension {
        if let Some(rows) = ascension_template(item_type, rarity) {
            materials.extend(instantiate(rows));
        }
    }

    if include_talent && item_type == ItemType::Character {
        materials.extend(instantiate(TALENT));
    }

    materials
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_star_character_with_talents() {
        let materials = generate(ItemType::Character, 4, true, true);

        assert_eq!(materials.len(), 8);
        assert!(materials.iter().all(|m| m.obtained == 0));
        assert_eq!(materials[0].name, "Character EXP Material");
        assert_eq!(materials[4].name, "Talent Book");
        assert_eq!(materials[7].name, "Crown of Insight");
    }

    #[test]
    fn test_five_star_character_has_boss_material() {
        let materials = generate(ItemType::Character, 5, true, false);
        assert_eq!(materials.len(), 5);
        assert_eq!(materials[4].name, "Boss Material");
        assert_eq!(materials[4].required, 46);
    }

    #[test]
    fn test_weapons_ignore_talent_flag() {
        let materials = generate(ItemType::Weapon, 5, true, true);
        assert_eq!(materials.len(), 4);
        assert_eq!(materials[3].name, "Weekly Boss Material");

        assert!(generate(ItemType::Weapon, 4, false, true).is_empty());
    }

    #[test]
    fn test_unknown_rarity_contributes_nothing() {
        assert!(generate(ItemType::Character, 3, true, false).is_empty());
        assert_eq!(generate(ItemType::Character, 3, true, true).len(), 4);
    }

    #[test]
    fn test_generated_rows_are_independent() {
        let mut first = generate(ItemType::Character, 4, true, false);
        let second = generate(ItemType::Character, 4, true, false);

        first[0].obtained = 100;
        first[1].name.push_str(" (Agnidus)");

        assert_eq!(second[0].obtained, 0);
        assert_eq!(second[1].name, "Elemental Gem");
    }
}
