//! Entity types for the planner: groups (project-like containers) and the
//! schedulable items they own.

pub mod group;
pub mod item;

use serde::{Deserialize, Serialize};

pub use group::{Group, GroupDraft, GroupPatch, GroupStage};
pub use item::{Difficulty, EnergyLevel, Item, ItemDraft, ItemPatch};

/// A reference link attached to a group or item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Link {
            label: label.into(),
            url: url.into(),
        }
    }
}
