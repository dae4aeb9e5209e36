#![warn(missing_docs)]
//! Item pack schema + validation helpers.

mod loader;

pub use loader::{builtin_catalog, catalog_from_file, catalog_from_str};

use serde::Deserialize;
use skyjellies_core::{DefinitionError, ItemDefinition, ItemId, ItemKind};
use thiserror::Error;

/// One item as authored in an item pack.
#[derive(Debug, Deserialize)]
pub struct ItemEntry {
    /// Stable numeric id.
    pub id: u16,
    /// Lookup key (e.g., "red_berry").
    pub name: String,
    /// Name shown in slot widgets (defaults to `name`).
    #[serde(default)]
    pub display_name: Option<String>,
    /// Largest quantity per slot.
    #[serde(default = "default_max_stack")]
    pub max_stack_size: u32,
    /// Whether separate pickups merge into one slot.
    #[serde(default = "default_stackable")]
    pub stackable: bool,
    /// Icon handle for the presentation layer.
    #[serde(default)]
    pub icon: Option<String>,
    /// Type-specific data, e.g. `{ "food": { "saturation": 10 } }`.
    #[serde(default)]
    pub kind: ItemKind,
}

fn default_max_stack() -> u32 {
    1
}

fn default_stackable() -> bool {
    true
}

impl ItemEntry {
    /// Convert into a validated catalog definition.
    pub fn into_definition(self) -> Result<ItemDefinition, DefinitionError> {
        let definition = ItemDefinition {
            id: ItemId(self.id),
            display_name: self.display_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            max_stack_size: self.max_stack_size,
            stackable: self.stackable,
            icon: self.icon,
            kind: self.kind,
        };
        definition.validate()?;
        Ok(definition)
    }
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read item pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse item pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// A definition or the catalog as a whole is invalid.
    #[error("invalid item pack: {0}")]
    Definition(#[from] DefinitionError),
}

/// Parse a JSON string into a list of item entries.
pub fn load_items_from_str(input: &str) -> Result<Vec<ItemEntry>, AssetError> {
    Ok(serde_json::from_str(input)?)
}
