//! Static boss catalog: names, respawn delay ranges and map images.
//!
//! Catalog order is the default display order and the tie-break used when
//! sorting rows, and it is the order persisted records are aligned to.

use crate::core::constants::DEFAULT_BOSSES;
use crate::error::{InputError, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterSpec {
    pub name: String,
    pub min_respawn_minutes: u32,
    pub max_respawn_minutes: u32,
    pub map_id: String,
}

impl MonsterSpec {
    pub fn new(name: &str, min_respawn_minutes: u32, max_respawn_minutes: u32, map_id: &str) -> Self {
        Self {
            name: name.to_string(),
            min_respawn_minutes,
            max_respawn_minutes,
            map_id: map_id.to_string(),
        }
    }

    /// Text for the respawn column, e.g. "60 - 70 minutes"
    pub fn delay_label(&self) -> String {
        format!(
            "{} - {} minutes",
            self.min_respawn_minutes, self.max_respawn_minutes
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    monsters: Vec<MonsterSpec>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate names and inverted delay ranges.
    pub fn new(monsters: Vec<MonsterSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for monster in &monsters {
            if !seen.insert(monster.name.as_str()) {
                return Err(InputError::DuplicateMonster(monster.name.clone()).into());
            }
            if monster.min_respawn_minutes > monster.max_respawn_minutes {
                return Err(InputError::InvertedDelay {
                    name: monster.name.clone(),
                    min: monster.min_respawn_minutes,
                    max: monster.max_respawn_minutes,
                }
                .into());
            }
        }
        Ok(Self { monsters })
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MonsterSpec> {
        self.monsters.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.monsters.iter().position(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonsterSpec> {
        self.monsters.iter()
    }
}

impl Default for Catalog {
    /// The nine tracked world bosses.
    fn default() -> Self {
        let monsters = DEFAULT_BOSSES
            .iter()
            .map(|&(name, min, max, map)| MonsterSpec::new(name, min, max, map))
            .collect();
        Self { monsters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_nine_bosses_in_order() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.get(0).unwrap().name, "Golden Thief Bug");
        assert_eq!(catalog.get(8).unwrap().name, "LHZ3");
        assert_eq!(catalog.index_of("Ifrit"), Some(5));
        assert_eq!(catalog.index_of("Baphomet"), None);
    }

    #[test]
    fn test_default_catalog_passes_validation() {
        let monsters: Vec<MonsterSpec> = Catalog::default().iter().cloned().collect();
        assert!(Catalog::new(monsters).is_ok());
    }

    #[test]
    fn test_delay_label() {
        let gtb = MonsterSpec::new("Golden Thief Bug", 60, 70, "map-gtb.png");
        assert_eq!(gtb.delay_label(), "60 - 70 minutes");
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Catalog::new(vec![
            MonsterSpec::new("Ifrit", 660, 670, "a.png"),
            MonsterSpec::new("Ifrit", 1, 2, "b.png"),
        ]);
        assert!(matches!(
            result,
            Err(crate::error::TrackerError::InvalidInput(InputError::DuplicateMonster(_)))
        ));
    }

    #[test]
    fn test_rejects_inverted_delay() {
        let result = Catalog::new(vec![MonsterSpec::new("Broken", 70, 60, "x.png")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_equal_min_max_is_allowed() {
        let catalog = Catalog::new(vec![MonsterSpec::new("Thanatos", 120, 120, "t.png")]);
        assert!(catalog.is_ok());
    }
}
