//! Item definitions - the immutable catalog entries every stack refers to

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Item identifier referencing the item catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u16);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// Tool with no specialised use yet
    #[default]
    None,
    /// Pickaxe - breaks island rock
    Pickaxe,
}

/// Type-specific data carried by an item definition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Plain collectible with no extra behaviour
    #[default]
    Generic,
    /// Something a jelly can eat
    Food {
        /// Saturation restored per unit eaten
        saturation: f32,
    },
    /// A held tool
    Tool {
        /// What the tool is for
        tool: ToolType,
    },
}

/// Errors raised while building definitions or catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// `max_stack_size` must be at least one.
    #[error("item {name:?} has a max stack size of zero")]
    ZeroMaxStack {
        /// Offending item name
        name: String,
    },
    /// Non-stackable items occupy one unit per slot.
    #[error("item {name:?} is not stackable but declares max stack {max_stack}")]
    NonStackableMaxStack {
        /// Offending item name
        name: String,
        /// Declared max stack
        max_stack: u32,
    },
    /// Names are used for lookups and must not be blank.
    #[error("item {id} has an empty name")]
    EmptyName {
        /// Offending item id
        id: ItemId,
    },
    /// Two definitions share an id.
    #[error("duplicate item id {id}")]
    DuplicateId {
        /// The repeated id
        id: ItemId,
    },
    /// Two definitions share a name.
    #[error("duplicate item name {name:?}")]
    DuplicateName {
        /// The repeated name
        name: String,
    },
    /// Food must restore a finite, non-negative amount.
    #[error("item {name:?} has an invalid saturation value")]
    InvalidSaturation {
        /// Offending item name
        name: String,
    },
    /// Lookup of an id or name that is not registered.
    #[error("unknown item {0:?}")]
    UnknownItem(String),
}

/// Immutable catalog entry for one kind of item.
///
/// Definitions are authored once (see the item pack loader) and shared
/// read-only by every stack that refers to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Stable identifier
    pub id: ItemId,
    /// Lookup key (e.g. "red_berry")
    pub name: String,
    /// Human-readable name shown in the UI
    pub display_name: String,
    /// Largest quantity a single slot may hold
    pub max_stack_size: u32,
    /// Whether separate pickups may merge into one slot
    pub stackable: bool,
    /// Opaque icon handle resolved by the presentation layer
    pub icon: Option<String>,
    /// Type-specific data
    pub kind: ItemKind,
}

impl ItemDefinition {
    /// Start a stackable generic definition with a max stack of 1.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            display_name: name.clone(),
            name,
            max_stack_size: 1,
            stackable: true,
            icon: None,
            kind: ItemKind::Generic,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the max stack size.
    pub fn with_max_stack(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    /// Mark the item as non-stackable (one unit per slot).
    pub fn non_stackable(mut self) -> Self {
        self.stackable = false;
        self.max_stack_size = 1;
        self
    }

    /// Attach an icon handle.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the kind-specific data.
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check the authoring invariants.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.name.trim().is_empty() {
            return Err(DefinitionError::EmptyName { id: self.id });
        }
        if self.max_stack_size == 0 {
            return Err(DefinitionError::ZeroMaxStack {
                name: self.name.clone(),
            });
        }
        if !self.stackable && self.max_stack_size > 1 {
            return Err(DefinitionError::NonStackableMaxStack {
                name: self.name.clone(),
                max_stack: self.max_stack_size,
            });
        }
        if let ItemKind::Food { saturation } = self.kind {
            if !saturation.is_finite() || saturation < 0.0 {
                return Err(DefinitionError::InvalidSaturation {
                    name: self.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Quantity a single slot may hold (always 1 for non-stackable items).
    pub fn slot_limit(&self) -> u32 {
        if self.stackable {
            self.max_stack_size.max(1)
        } else {
            1
        }
    }

    /// Saturation restored per unit, if this is food.
    pub fn saturation(&self) -> Option<f32> {
        match self.kind {
            ItemKind::Food { saturation } => Some(saturation),
            _ => None,
        }
    }

    /// Tool type, if this is a tool.
    pub fn tool(&self) -> Option<ToolType> {
        match self.kind {
            ItemKind::Tool { tool } => Some(tool),
            _ => None,
        }
    }
}
