use std::fs;
use std::path::Path;

use skyjellies_core::{ItemCatalog, ItemDefinition, ItemId, ItemKind, ToolType};

use crate::AssetError;

/// Load an item catalog from the provided JSON file path.
pub fn catalog_from_file(path: &Path) -> Result<ItemCatalog, AssetError> {
    let data = fs::read_to_string(path)?;
    catalog_from_str(&data)
}

/// Load an item catalog from an in-memory JSON string.
pub fn catalog_from_str(input: &str) -> Result<ItemCatalog, AssetError> {
    let definitions = crate::load_items_from_str(input)?
        .into_iter()
        .map(|entry| entry.into_definition())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ItemCatalog::new(definitions)?)
}

/// Items available when no pack can be loaded.
pub fn builtin_catalog() -> ItemCatalog {
    let definitions = vec![
        ItemDefinition::new(ItemId(1), "red_berry")
            .with_display_name("Red Berry")
            .with_icon("icons/red_berry")
            .with_max_stack(10)
            .with_kind(ItemKind::Food { saturation: 10.0 }),
        ItemDefinition::new(ItemId(2), "pickaxe")
            .with_display_name("Pickaxe")
            .with_icon("icons/pickaxe")
            .non_stackable()
            .with_kind(ItemKind::Tool {
                tool: ToolType::Pickaxe,
            }),
        ItemDefinition::new(ItemId(3), "stone")
            .with_display_name("Stone")
            .with_icon("icons/stone")
            .with_max_stack(64),
    ];
    // Static definitions above are distinct and valid.
    ItemCatalog::new(definitions).unwrap_or_default()
}
