//! Item type: a schedulable unit of work, optionally owned by a group.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Link;

/// Energy level an item demands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Low energy (e.g., end of day)
    Low,
    /// Medium energy (default)
    Medium,
    /// High energy (e.g., morning)
    High,
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

/// Difficulty tier of an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Moderate
    }
}

/// A schedulable unit of work.
///
/// `owner_id` references at most one [`Group`](super::Group); `None` means
/// the item is unattached. Ownership bookkeeping (the owning group's
/// membership lists) is maintained by the [`Planner`](crate::planner::Planner),
/// not by this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: String,
    /// Item title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Owning group id, if any
    pub owner_id: Option<String>,
    /// Energy level required
    pub energy: EnergyLevel,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Optimistic estimate in hours
    pub estimated_hours: f64,
    /// Date the item is scheduled on, if any
    pub scheduled_date: Option<NaiveDate>,
    /// Whether the item is completed
    pub completed: bool,
    /// Completion timestamp (present iff completed)
    pub completed_at: Option<DateTime<Utc>>,
    /// Needs uninterrupted deep focus
    #[serde(default)]
    pub deep_focus: bool,
    /// Small task good for building momentum
    #[serde(default)]
    pub quick_win: bool,
    /// Attached reference links
    #[serde(default)]
    pub links: Vec<Link>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new unattached item with a 1-hour estimate.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Item {
            id: format!("item-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            description: None,
            owner_id: None,
            energy: EnergyLevel::Medium,
            difficulty: Difficulty::Moderate,
            estimated_hours: 1.0,
            scheduled_date: None,
            completed: false,
            completed_at: None,
            deep_focus: false,
            quick_win: false,
            links: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Creation payload for [`Item`].
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub energy: EnergyLevel,
    pub difficulty: Difficulty,
    pub estimated_hours: f64,
    pub scheduled_date: Option<NaiveDate>,
    pub deep_focus: bool,
    pub quick_win: bool,
    pub links: Vec<Link>,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>) -> Self {
        ItemDraft {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn owned_by(mut self, group_id: impl Into<String>) -> Self {
        self.owner_id = Some(group_id.into());
        self
    }

    pub fn estimated(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn scheduled(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    pub fn energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = energy;
        self
    }
}

impl Default for ItemDraft {
    fn default() -> Self {
        ItemDraft {
            title: String::new(),
            description: None,
            owner_id: None,
            energy: EnergyLevel::Medium,
            difficulty: Difficulty::Moderate,
            estimated_hours: 1.0,
            scheduled_date: None,
            deep_focus: false,
            quick_win: false,
            links: Vec::new(),
        }
    }
}

/// Partial update for [`Item`]. `None` fields are left untouched.
///
/// `owner_id`, `description` and `scheduled_date` are doubly optional:
/// `Some(None)` clears the field, `Some(Some(_))` sets it. Setting
/// `completed` through a patch also sets or clears `completed_at`.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub owner_id: Option<Option<String>>,
    pub energy: Option<EnergyLevel>,
    pub difficulty: Option<Difficulty>,
    pub estimated_hours: Option<f64>,
    pub scheduled_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
    pub deep_focus: Option<bool>,
    pub quick_win: Option<bool>,
    pub links: Option<Vec<Link>>,
}

impl ItemPatch {
    /// Patch that re-assigns ownership (or detaches when `owner` is `None`).
    pub fn reassign(owner: Option<String>) -> Self {
        ItemPatch {
            owner_id: Some(owner),
            ..Default::default()
        }
    }

    /// Patch that sets the completed flag.
    pub fn set_completed(completed: bool) -> Self {
        ItemPatch {
            completed: Some(completed),
            ..Default::default()
        }
    }
}
