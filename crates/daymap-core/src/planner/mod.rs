//! The planner: all mutating operations on groups and items, plus the
//! query and derived-view surface consumed by the rest of the application.
//!
//! The planner keeps the two collections mutually consistent: an item's
//! `owner_id` always agrees with the owning group's `member_ids`, and
//! `completed_member_ids` stays a subset of `member_ids`. Every mutation is
//! a full synchronous cycle — load the collections, mutate in memory,
//! persist through one commit — so a crash cannot land between a group
//! write and an item write.
//!
//! Not-found is reported as `Ok(None)` / `Ok(false)`; errors are reserved
//! for persistence write failures.

use chrono::{NaiveDate, Utc};

use crate::conflict::{self, Conflict, Suggestion};
use crate::error::{CoreError, StoreError};
use crate::estimate::{EstimateModel, FixedMultiplier};
use crate::plan::{Group, GroupDraft, GroupPatch, Item, ItemDraft, ItemPatch};
use crate::storage::{Config, EntityStore, MemoryBackend, SqliteBackend};
use crate::workload::{
    calculate_day_workload, week_workload_summary, DayWorkload, LegacyTask, ScheduleEntry,
    WeekWorkload, WorkloadPolicy,
};

/// Planner service over an entity store.
///
/// Owns its store so independent instances (tests, parallel profiles) never
/// share state. The estimate model is an injected strategy; the default is
/// the fixed 1.8x multiplier.
pub struct Planner {
    store: EntityStore,
    policy: WorkloadPolicy,
    estimate: Box<dyn EstimateModel>,
}

impl Planner {
    /// Create a planner over an existing store with default policy.
    pub fn new(store: EntityStore) -> Self {
        Planner {
            store,
            policy: WorkloadPolicy::default(),
            estimate: Box::new(FixedMultiplier::default()),
        }
    }

    /// Planner over an in-memory store (tests, isolated instances).
    pub fn in_memory() -> Self {
        Self::new(EntityStore::new(Box::new(MemoryBackend::new())))
    }

    /// Planner over the durable store at `~/.config/daymap/daymap.db`,
    /// with thresholds taken from the configuration file.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the
    /// configuration cannot be read.
    pub fn open() -> Result<Self, CoreError> {
        let backend = SqliteBackend::open()?;
        let config = Config::load()?;
        Ok(Planner {
            store: EntityStore::new(Box::new(backend)),
            policy: config.workload_policy(),
            estimate: Box::new(FixedMultiplier::new(config.estimate.reality_multiplier)),
        })
    }

    /// Replace the workload policy.
    pub fn with_policy(mut self, policy: WorkloadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the estimate model.
    pub fn with_estimate_model(mut self, model: Box<dyn EstimateModel>) -> Self {
        self.estimate = model;
        self
    }

    pub fn policy(&self) -> &WorkloadPolicy {
        &self.policy
    }

    // --- queries ---

    pub fn list_groups(&self) -> Vec<Group> {
        self.store.load_groups()
    }

    pub fn list_items(&self) -> Vec<Item> {
        self.store.load_items()
    }

    pub fn get_group(&self, id: &str) -> Option<Group> {
        self.store.load_groups().into_iter().find(|g| g.id == id)
    }

    pub fn get_item(&self, id: &str) -> Option<Item> {
        self.store.load_items().into_iter().find(|i| i.id == id)
    }

    /// Items owned by the given group.
    pub fn items_in_group(&self, group_id: &str) -> Vec<Item> {
        self.store
            .load_items()
            .into_iter()
            .filter(|i| i.owner_id.as_deref() == Some(group_id))
            .collect()
    }

    /// Items with no owning group.
    pub fn unattached_items(&self) -> Vec<Item> {
        self.store
            .load_items()
            .into_iter()
            .filter(|i| i.owner_id.is_none())
            .collect()
    }

    /// Completion percentage of a group, or `None` if the group is unknown.
    pub fn group_progress(&self, group_id: &str) -> Option<u32> {
        self.get_group(group_id).map(|g| g.progress_percent())
    }

    // --- group mutations ---

    pub fn create_group(&mut self, draft: GroupDraft) -> Result<Group, StoreError> {
        let mut groups = self.store.load_groups();
        let mut group = Group::new(draft.name);
        group.description = draft.description;
        group.stage = draft.stage;
        group.target_date = draft.target_date;
        group.links = draft.links;
        groups.push(group.clone());
        self.store.save_groups(&groups)?;
        Ok(group)
    }

    /// Update a group's own fields. Membership lists are planner-owned and
    /// not patchable.
    pub fn update_group(
        &mut self,
        id: &str,
        patch: GroupPatch,
    ) -> Result<Option<Group>, StoreError> {
        let mut groups = self.store.load_groups();
        let Some(group) = groups.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(description) = patch.description {
            group.description = description;
        }
        if let Some(stage) = patch.stage {
            group.stage = stage;
        }
        if let Some(target_date) = patch.target_date {
            group.target_date = target_date;
        }
        if let Some(archived) = patch.archived {
            group.archived = archived;
        }
        if let Some(links) = patch.links {
            group.links = links;
        }
        group.updated_at = Utc::now();

        let updated = group.clone();
        self.store.save_groups(&groups)?;
        Ok(Some(updated))
    }

    /// Delete a group. Its items are deliberately orphaned: they keep their
    /// now-dangling `owner_id` and show up in no group's membership lists.
    pub fn delete_group(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut groups = self.store.load_groups();
        let before = groups.len();
        groups.retain(|g| g.id != id);
        if groups.len() == before {
            return Ok(false);
        }
        self.store.save_groups(&groups)?;
        Ok(true)
    }

    // --- item mutations ---

    pub fn create_item(&mut self, draft: ItemDraft) -> Result<Item, StoreError> {
        let mut groups = self.store.load_groups();
        let mut items = self.store.load_items();

        let mut item = Item::new(draft.title);
        item.description = draft.description;
        item.owner_id = draft.owner_id;
        item.energy = draft.energy;
        item.difficulty = draft.difficulty;
        item.estimated_hours = draft.estimated_hours;
        item.scheduled_date = draft.scheduled_date;
        item.deep_focus = draft.deep_focus;
        item.quick_win = draft.quick_win;
        item.links = draft.links;

        if let Some(owner_id) = item.owner_id.clone() {
            // A dangling owner id is tolerated: no group to update, the
            // item still carries the reference.
            if let Some(group) = groups.iter_mut().find(|g| g.id == owner_id) {
                group.add_member(&item.id);
                group.updated_at = Utc::now();
            }
        }

        items.push(item.clone());
        self.store.save_all(&groups, &items)?;
        Ok(item)
    }

    pub fn update_item(
        &mut self,
        id: &str,
        patch: ItemPatch,
    ) -> Result<Option<Item>, StoreError> {
        let mut groups = self.store.load_groups();
        let mut items = self.store.load_items();
        let Some(idx) = items.iter().position(|i| i.id == id) else {
            return Ok(None);
        };
        let now = Utc::now();

        if let Some(new_owner) = patch.owner_id {
            if new_owner != items[idx].owner_id {
                if let Some(old_owner) = items[idx].owner_id.take() {
                    if let Some(group) = groups.iter_mut().find(|g| g.id == old_owner) {
                        group.remove_member(id);
                        group.updated_at = now;
                    }
                }
                if let Some(owner_id) = &new_owner {
                    if let Some(group) = groups.iter_mut().find(|g| g.id == *owner_id) {
                        group.add_member(id);
                        group.updated_at = now;
                    }
                }
                items[idx].owner_id = new_owner;
            }
        }

        if let Some(completed) = patch.completed {
            if completed != items[idx].completed {
                items[idx].completed = completed;
                items[idx].completed_at = if completed { Some(now) } else { None };
                if let Some(owner_id) = items[idx].owner_id.clone() {
                    if let Some(group) = groups.iter_mut().find(|g| g.id == owner_id) {
                        if completed {
                            group.mark_member_complete(id);
                        } else {
                            group.mark_member_incomplete(id);
                        }
                        group.updated_at = now;
                    }
                }
            }
        }

        let item = &mut items[idx];
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(energy) = patch.energy {
            item.energy = energy;
        }
        if let Some(difficulty) = patch.difficulty {
            item.difficulty = difficulty;
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            // Stored as given; the core does not clamp or reject values.
            item.estimated_hours = estimated_hours;
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            item.scheduled_date = scheduled_date;
        }
        if let Some(deep_focus) = patch.deep_focus {
            item.deep_focus = deep_focus;
        }
        if let Some(quick_win) = patch.quick_win {
            item.quick_win = quick_win;
        }
        if let Some(links) = patch.links {
            item.links = links;
        }
        item.updated_at = now;

        let updated = item.clone();
        self.store.save_all(&groups, &items)?;
        Ok(Some(updated))
    }

    pub fn delete_item(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut groups = self.store.load_groups();
        let mut items = self.store.load_items();
        let Some(idx) = items.iter().position(|i| i.id == id) else {
            return Ok(false);
        };

        if let Some(owner_id) = items[idx].owner_id.clone() {
            if let Some(group) = groups.iter_mut().find(|g| g.id == owner_id) {
                group.remove_member(id);
                group.updated_at = Utc::now();
            }
        }
        items.remove(idx);
        self.store.save_all(&groups, &items)?;
        Ok(true)
    }

    /// Flip an item's completed flag, propagating membership bookkeeping
    /// through [`update_item`](Self::update_item). Returns the new state.
    pub fn toggle_item_complete(&mut self, id: &str) -> Result<Option<bool>, StoreError> {
        let Some(item) = self.get_item(id) else {
            return Ok(None);
        };
        let updated = self.update_item(id, ItemPatch::set_completed(!item.completed))?;
        Ok(updated.map(|i| i.completed))
    }

    // --- derived views ---

    fn snapshot(&self, legacy: &[LegacyTask]) -> Vec<ScheduleEntry> {
        self.store
            .load_items()
            .into_iter()
            .map(ScheduleEntry::Item)
            .chain(legacy.iter().cloned().map(ScheduleEntry::Legacy))
            .collect()
    }

    /// Workload for a single date over items plus the legacy snapshot.
    pub fn day_workload(&self, date: NaiveDate, legacy: &[LegacyTask]) -> DayWorkload {
        calculate_day_workload(date, &self.snapshot(legacy), &self.policy)
    }

    /// Week summary anchored on the Monday containing `start`.
    pub fn week_summary(&self, start: NaiveDate, legacy: &[LegacyTask]) -> WeekWorkload {
        week_workload_summary(start, &self.snapshot(legacy), &self.policy)
    }

    /// Ordered warning list for a date.
    pub fn conflicts(&self, date: NaiveDate, legacy: &[LegacyTask]) -> Vec<Conflict> {
        conflict::detect_conflicts(&self.day_workload(date, legacy), &self.policy)
    }

    /// Tips for a date, independent of the warning list.
    pub fn suggestions(&self, date: NaiveDate, legacy: &[LegacyTask]) -> Vec<Suggestion> {
        conflict::suggestions(
            &self.day_workload(date, legacy),
            self.estimate.as_ref(),
            &self.policy,
        )
    }

    /// Project an optimistic estimate through the injected model.
    pub fn realistic_estimate(&self, hours: f64) -> f64 {
        self.estimate.realistic(hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_item_with_owner_updates_membership() {
        let mut planner = Planner::in_memory();
        let group = planner.create_group(GroupDraft::new("Launch")).unwrap();
        let item = planner
            .create_item(ItemDraft::new("Write copy").owned_by(&group.id))
            .unwrap();

        let group = planner.get_group(&group.id).unwrap();
        assert_eq!(group.member_ids, vec![item.id.clone()]);
        assert!(group.completed_member_ids.is_empty());
    }

    #[test]
    fn create_item_with_dangling_owner_is_tolerated() {
        let mut planner = Planner::in_memory();
        let item = planner
            .create_item(ItemDraft::new("Orphan").owned_by("group-missing"))
            .unwrap();
        // No group to update; the item still carries the reference.
        assert_eq!(item.owner_id.as_deref(), Some("group-missing"));
        assert!(planner.list_groups().is_empty());
    }

    #[test]
    fn reassigning_owner_moves_membership() {
        let mut planner = Planner::in_memory();
        let first = planner.create_group(GroupDraft::new("First")).unwrap();
        let second = planner.create_group(GroupDraft::new("Second")).unwrap();
        let item = planner
            .create_item(ItemDraft::new("Move me").owned_by(&first.id))
            .unwrap();

        planner
            .update_item(&item.id, ItemPatch::reassign(Some(second.id.clone())))
            .unwrap();

        assert!(planner.get_group(&first.id).unwrap().member_ids.is_empty());
        assert_eq!(
            planner.get_group(&second.id).unwrap().member_ids,
            vec![item.id.clone()]
        );
        assert_eq!(
            planner.get_item(&item.id).unwrap().owner_id,
            Some(second.id)
        );
    }

    #[test]
    fn reassigning_to_same_owner_does_not_duplicate_membership() {
        let mut planner = Planner::in_memory();
        let group = planner.create_group(GroupDraft::new("Same")).unwrap();
        let item = planner
            .create_item(ItemDraft::new("Stay").owned_by(&group.id))
            .unwrap();

        planner
            .update_item(&item.id, ItemPatch::reassign(Some(group.id.clone())))
            .unwrap();

        assert_eq!(
            planner.get_group(&group.id).unwrap().member_ids,
            vec![item.id]
        );
    }

    #[test]
    fn detaching_owner_empties_membership() {
        let mut planner = Planner::in_memory();
        let group = planner.create_group(GroupDraft::new("Launch")).unwrap();
        let item = planner
            .create_item(ItemDraft::new("Write copy").owned_by(&group.id))
            .unwrap();

        planner
            .update_item(&item.id, ItemPatch::reassign(None))
            .unwrap();

        assert!(planner.get_group(&group.id).unwrap().member_ids.is_empty());
        let unattached = planner.unattached_items();
        assert_eq!(unattached.len(), 1);
        assert_eq!(unattached[0].id, item.id);
    }

    #[test]
    fn completing_a_moved_item_marks_the_new_owner() {
        let mut planner = Planner::in_memory();
        let first = planner.create_group(GroupDraft::new("First")).unwrap();
        let second = planner.create_group(GroupDraft::new("Second")).unwrap();
        let item = planner
            .create_item(ItemDraft::new("Move then done").owned_by(&first.id))
            .unwrap();

        // Ownership change and completion in a single patch: the completed
        // bookkeeping lands on the new owner.
        planner
            .update_item(
                &item.id,
                ItemPatch {
                    owner_id: Some(Some(second.id.clone())),
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        let second = planner.get_group(&second.id).unwrap();
        assert_eq!(second.completed_member_ids, vec![item.id.clone()]);
        let first = planner.get_group(&first.id).unwrap();
        assert!(first.member_ids.is_empty());
        assert!(first.completed_member_ids.is_empty());
    }

    #[test]
    fn delete_item_strips_membership() {
        let mut planner = Planner::in_memory();
        let group = planner.create_group(GroupDraft::new("Launch")).unwrap();
        let item = planner
            .create_item(ItemDraft::new("Write copy").owned_by(&group.id))
            .unwrap();
        planner.toggle_item_complete(&item.id).unwrap();

        assert!(planner.delete_item(&item.id).unwrap());

        let group = planner.get_group(&group.id).unwrap();
        assert!(group.member_ids.is_empty());
        assert!(group.completed_member_ids.is_empty());
        assert!(planner.get_item(&item.id).is_none());
    }

    #[test]
    fn delete_unknown_item_reports_false() {
        let mut planner = Planner::in_memory();
        assert!(!planner.delete_item("item-missing").unwrap());
        assert!(!planner.delete_group("group-missing").unwrap());
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut planner = Planner::in_memory();
        let item = planner.create_item(ItemDraft::new("Flip")).unwrap();

        assert_eq!(planner.toggle_item_complete(&item.id).unwrap(), Some(true));
        let completed = planner.get_item(&item.id).unwrap();
        assert!(completed.completed_at.is_some());

        assert_eq!(planner.toggle_item_complete(&item.id).unwrap(), Some(false));
        let restored = planner.get_item(&item.id).unwrap();
        assert!(!restored.completed);
        assert!(restored.completed_at.is_none());
    }

    #[test]
    fn toggle_unknown_item_is_none() {
        let mut planner = Planner::in_memory();
        assert_eq!(planner.toggle_item_complete("item-missing").unwrap(), None);
    }

    #[test]
    fn update_group_patches_fields() {
        let mut planner = Planner::in_memory();
        let group = planner.create_group(GroupDraft::new("Old name")).unwrap();
        let updated = planner
            .update_group(
                &group.id,
                GroupPatch {
                    name: Some("New name".to_string()),
                    archived: Some(true),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "New name");
        assert!(updated.archived);
    }

    #[test]
    fn update_unknown_group_is_none() {
        let mut planner = Planner::in_memory();
        assert!(planner
            .update_group("group-missing", GroupPatch::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn group_progress_follows_completion() {
        let mut planner = Planner::in_memory();
        let group = planner.create_group(GroupDraft::new("Launch")).unwrap();
        assert_eq!(planner.group_progress(&group.id), Some(0));

        let a = planner
            .create_item(ItemDraft::new("A").owned_by(&group.id))
            .unwrap();
        let _b = planner
            .create_item(ItemDraft::new("B").owned_by(&group.id))
            .unwrap();
        assert_eq!(planner.group_progress(&group.id), Some(0));

        planner.toggle_item_complete(&a.id).unwrap();
        assert_eq!(planner.group_progress(&group.id), Some(50));
    }

    #[test]
    fn estimate_model_is_injected() {
        let planner = Planner::in_memory().with_estimate_model(Box::new(FixedMultiplier::new(3.0)));
        assert_eq!(planner.realistic_estimate(2.0), 6.0);
    }
}
