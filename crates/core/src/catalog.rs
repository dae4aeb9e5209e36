//! Read-only item catalog.
//!
//! The catalog owns every [`ItemDefinition`] behind an `Arc`; stacks hold
//! clones of those handles and never mutate them. Iteration order is by id so
//! listings are deterministic.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::item::{DefinitionError, ItemDefinition, ItemId};

/// Registry of item definitions keyed by id and name.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    by_id: BTreeMap<ItemId, Arc<ItemDefinition>>,
    name_to_id: HashMap<String, ItemId>,
}

impl ItemCatalog {
    /// Build a catalog, validating each definition and rejecting duplicates.
    pub fn new(definitions: Vec<ItemDefinition>) -> Result<Self, DefinitionError> {
        let mut catalog = Self::default();
        for def in definitions {
            catalog.insert(def)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, def: ItemDefinition) -> Result<(), DefinitionError> {
        def.validate()?;
        if self.by_id.contains_key(&def.id) {
            return Err(DefinitionError::DuplicateId { id: def.id });
        }
        if self.name_to_id.contains_key(&def.name) {
            return Err(DefinitionError::DuplicateName { name: def.name });
        }
        self.name_to_id.insert(def.name.clone(), def.id);
        self.by_id.insert(def.id, Arc::new(def));
        Ok(())
    }

    /// Look up a definition by id.
    pub fn get(&self, id: ItemId) -> Option<&Arc<ItemDefinition>> {
        self.by_id.get(&id)
    }

    /// Look up a definition by name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<ItemDefinition>> {
        self.name_to_id.get(name).and_then(|id| self.by_id.get(id))
    }

    /// Resolve either a name (`red_berry`) or a numeric id (`3`).
    pub fn resolve(&self, key: &str) -> Result<&Arc<ItemDefinition>, DefinitionError> {
        let key = key.trim();
        if let Some(def) = self.by_name(key) {
            return Ok(def);
        }
        key.parse::<u16>()
            .ok()
            .and_then(|raw| self.get(ItemId(raw)))
            .ok_or_else(|| DefinitionError::UnknownItem(key.to_string()))
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> {
        self.by_id.values()
    }
}
