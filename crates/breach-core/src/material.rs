use serde::{Deserialize, Serialize};

use crate::constants::MATERIAL_CAPACITY;
use crate::error::BreachError;

/// A single surface material as authored in RON decks.
/// The schema is canonical: `roughness` and `metalness`, no aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Stable material id. Must be below MATERIAL_CAPACITY.
    pub id: u16,
    /// Human-readable name for debug display.
    pub name: String,
    /// RGBA color, 0.0–1.0 per channel.
    pub albedo: [f32; 4],
    /// Microfacet roughness, 0.0 (mirror) to 1.0 (diffuse).
    pub roughness: f32,
    /// Metalness, 0.0 (dielectric) to 1.0 (metal).
    pub metalness: f32,
}

/// Collection of material definitions indexed by id.
#[derive(Debug, Clone, Default)]
pub struct MaterialDeck {
    pub materials: Vec<MaterialDef>,
}

impl MaterialDeck {
    /// Look up a material by id. Returns None if not found.
    pub fn get(&self, id: u16) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Check that every id fits the material table.
    pub fn validate(&self) -> Result<(), BreachError> {
        for m in &self.materials {
            if m.id as usize >= MATERIAL_CAPACITY {
                return Err(BreachError::OutOfRange {
                    table: "material",
                    index: m.id as usize,
                    capacity: MATERIAL_CAPACITY,
                });
            }
        }
        Ok(())
    }
}

/// Parse a RON string into a validated MaterialDeck.
pub fn load_deck_from_str(ron_str: &str) -> Result<MaterialDeck, BreachError> {
    let materials: Vec<MaterialDef> =
        ron::from_str(ron_str).map_err(|e| BreachError::DeckParse(e.to_string()))?;
    let deck = MaterialDeck { materials };
    deck.validate()?;
    Ok(deck)
}
