use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

const UNITS_JSON: &str = include_str!("../assets/units.json");

/// One learnable item: a short run of characters plus its pictograph.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    pub id: String,
    pub text: String,
    pub emoji: String,
}

/// A themed grouping of word entries. `icon` and `color` are presentation
/// hints only; the word order is the order learn mode walks through.
#[derive(Clone, Debug, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub title: String,
    pub icon: String,
    pub color: String,
    pub words: Vec<WordEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    units: Vec<Unit>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse embedded unit data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unit {0} has no words")]
    EmptyUnit(u32),
    #[error("duplicate unit id {0}")]
    DuplicateUnit(u32),
    #[error("duplicate word id \"{0}\"")]
    DuplicateWord(String),
}

pub struct Catalog {
    units: Vec<Unit>,
}

impl Catalog {
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(UNITS_JSON)
    }

    /// Parse and validate a catalog. Word ids must be unique across the
    /// whole catalog — the all-units challenge draws distractors from every
    /// unit combined, so a per-unit uniqueness guarantee is not enough.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        let mut unit_ids: HashSet<u32> = HashSet::new();
        let mut word_ids: HashSet<&str> = HashSet::new();
        for unit in &file.units {
            if !unit_ids.insert(unit.id) {
                return Err(CatalogError::DuplicateUnit(unit.id));
            }
            if unit.words.is_empty() {
                return Err(CatalogError::EmptyUnit(unit.id));
            }
            for word in &unit.words {
                if !word_ids.insert(&word.id) {
                    return Err(CatalogError::DuplicateWord(word.id.clone()));
                }
            }
        }

        Ok(Self { units: file.units })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// All word entries across every unit, in catalog order.
    pub fn all_words(&self) -> Vec<WordEntry> {
        self.units
            .iter()
            .flat_map(|u| u.words.iter().cloned())
            .collect()
    }
}
