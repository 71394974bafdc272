//! Group type: a project-level container owning an ordered membership list
//! of item ids.
//!
//! Membership invariant: `completed_member_ids` is a subset of `member_ids`
//! at all times. The [`Planner`](crate::planner::Planner) is the only writer
//! of the membership lists; helpers here keep individual edits consistent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Link;

/// Lifecycle stage of a group.
///
/// The three values are user-assigned with no required ordering and no
/// automatic transition driven by progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupStage {
    /// Being shaped, not yet committed to
    Planning,
    /// Actively worked on
    Active,
    /// Wrapped up
    Complete,
}

impl Default for GroupStage {
    fn default() -> Self {
        GroupStage::Planning
    }
}

/// A project-like container owning schedulable items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: String,
    /// Group name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// User-set lifecycle stage
    pub stage: GroupStage,
    /// Optional target date
    pub target_date: Option<NaiveDate>,
    /// Ordered ids of items currently owned by this group
    #[serde(default)]
    pub member_ids: Vec<String>,
    /// Subset of `member_ids` marking completed items
    #[serde(default)]
    pub completed_member_ids: Vec<String>,
    /// Whether the group is archived
    #[serde(default)]
    pub archived: bool,
    /// Attached reference links
    #[serde(default)]
    pub links: Vec<Link>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a new, empty group.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Group {
            id: format!("group-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            name: name.into(),
            description: None,
            stage: GroupStage::Planning,
            target_date: None,
            member_ids: Vec::new(),
            completed_member_ids: Vec::new(),
            archived: false,
            links: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Completion percentage over owned members, rounded to the nearest
    /// whole percent. A group with no members is 0%.
    pub fn progress_percent(&self) -> u32 {
        if self.member_ids.is_empty() {
            0
        } else {
            let ratio = self.completed_member_ids.len() as f64 / self.member_ids.len() as f64;
            (ratio * 100.0).round() as u32
        }
    }

    /// Add an item id to the membership list, skipping duplicates.
    pub(crate) fn add_member(&mut self, item_id: &str) {
        if !self.member_ids.iter().any(|id| id == item_id) {
            self.member_ids.push(item_id.to_string());
        }
    }

    /// Remove an item id from both membership lists.
    pub(crate) fn remove_member(&mut self, item_id: &str) {
        self.member_ids.retain(|id| id != item_id);
        self.completed_member_ids.retain(|id| id != item_id);
    }

    /// Mark an owned item complete. No-op for duplicates.
    pub(crate) fn mark_member_complete(&mut self, item_id: &str) {
        if !self.completed_member_ids.iter().any(|id| id == item_id) {
            self.completed_member_ids.push(item_id.to_string());
        }
    }

    /// Mark an owned item incomplete.
    pub(crate) fn mark_member_incomplete(&mut self, item_id: &str) {
        self.completed_member_ids.retain(|id| id != item_id);
    }
}

/// Creation payload for [`Group`].
#[derive(Debug, Clone, Default)]
pub struct GroupDraft {
    pub name: String,
    pub description: Option<String>,
    pub stage: GroupStage,
    pub target_date: Option<NaiveDate>,
    pub links: Vec<Link>,
}

impl GroupDraft {
    pub fn new(name: impl Into<String>) -> Self {
        GroupDraft {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial update for [`Group`]. `None` fields are left untouched.
///
/// `description` and `target_date` are doubly optional so a patch can clear
/// them (`Some(None)`) as well as set them.
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub stage: Option<GroupStage>,
    pub target_date: Option<Option<NaiveDate>>,
    pub archived: Option<bool>,
    pub links: Option<Vec<Link>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_creation() {
        let group = Group::new("Launch");
        assert_eq!(group.name, "Launch");
        assert_eq!(group.stage, GroupStage::Planning);
        assert!(group.member_ids.is_empty());
        assert!(group.completed_member_ids.is_empty());
        assert!(!group.archived);
    }

    #[test]
    fn progress_empty_group_is_zero() {
        let group = Group::new("Empty");
        assert_eq!(group.progress_percent(), 0);
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        let mut group = Group::new("Thirds");
        group.member_ids = vec!["a".into(), "b".into(), "c".into()];
        group.completed_member_ids = vec!["a".into()];
        // 1/3 -> 33%
        assert_eq!(group.progress_percent(), 33);
        group.completed_member_ids.push("b".into());
        // 2/3 -> 67%
        assert_eq!(group.progress_percent(), 67);
    }

    #[test]
    fn progress_full_group_is_hundred() {
        let mut group = Group::new("Done");
        group.member_ids = vec!["a".into(), "b".into()];
        group.completed_member_ids = vec!["a".into(), "b".into()];
        assert_eq!(group.progress_percent(), 100);
    }

    #[test]
    fn add_member_deduplicates() {
        let mut group = Group::new("G");
        group.add_member("item-1");
        group.add_member("item-1");
        assert_eq!(group.member_ids, vec!["item-1".to_string()]);
    }

    #[test]
    fn remove_member_strips_both_lists() {
        let mut group = Group::new("G");
        group.add_member("item-1");
        group.mark_member_complete("item-1");
        group.remove_member("item-1");
        assert!(group.member_ids.is_empty());
        assert!(group.completed_member_ids.is_empty());
    }

    #[test]
    fn mark_member_complete_deduplicates() {
        let mut group = Group::new("G");
        group.add_member("item-1");
        group.mark_member_complete("item-1");
        group.mark_member_complete("item-1");
        assert_eq!(group.completed_member_ids.len(), 1);
    }

    #[test]
    fn group_serialization() {
        let mut group = Group::new("Launch");
        group.description = Some("Ship the thing".to_string());
        group.links.push(Link::new("brief", "https://example.com/brief"));

        let json = serde_json::to_string(&group).unwrap();
        let decoded: Group = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.id, group.id);
        assert_eq!(decoded.name, "Launch");
        assert_eq!(decoded.stage, GroupStage::Planning);
        assert_eq!(decoded.links.len(), 1);
    }
}
