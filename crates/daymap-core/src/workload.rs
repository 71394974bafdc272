//! Workload aggregation over schedulable entries.
//!
//! Pure functions: given a date and a snapshot of schedulable entries, compute
//! total hours, the per-energy-tier breakdown, and the overload
//! classification. Nothing here is cached or persisted; every query
//! recomputes from the snapshot it is handed.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::plan::{EnergyLevel, Item};

/// A schedulable record from the legacy task collection.
///
/// Carries only the shared scheduling attributes; it is not a group member
/// and has no owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyTask {
    pub title: String,
    pub estimated_hours: f64,
    pub energy: EnergyLevel,
    pub scheduled_date: Option<NaiveDate>,
    pub completed: bool,
    #[serde(default)]
    pub deep_focus: bool,
    #[serde(default)]
    pub quick_win: bool,
}

/// A schedulable entry from either collection.
///
/// Formalizes the attribute set shared between planner items and legacy
/// tasks as a tagged variant, so the aggregator can consume a heterogeneous
/// snapshot without caring where each record came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleEntry {
    Item(Item),
    Legacy(LegacyTask),
}

impl ScheduleEntry {
    pub fn title(&self) -> &str {
        match self {
            ScheduleEntry::Item(item) => &item.title,
            ScheduleEntry::Legacy(task) => &task.title,
        }
    }

    pub fn estimated_hours(&self) -> f64 {
        match self {
            ScheduleEntry::Item(item) => item.estimated_hours,
            ScheduleEntry::Legacy(task) => task.estimated_hours,
        }
    }

    pub fn energy(&self) -> EnergyLevel {
        match self {
            ScheduleEntry::Item(item) => item.energy,
            ScheduleEntry::Legacy(task) => task.energy,
        }
    }

    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        match self {
            ScheduleEntry::Item(item) => item.scheduled_date,
            ScheduleEntry::Legacy(task) => task.scheduled_date,
        }
    }

    pub fn completed(&self) -> bool {
        match self {
            ScheduleEntry::Item(item) => item.completed,
            ScheduleEntry::Legacy(task) => task.completed,
        }
    }

    pub fn deep_focus(&self) -> bool {
        match self {
            ScheduleEntry::Item(item) => item.deep_focus,
            ScheduleEntry::Legacy(task) => task.deep_focus,
        }
    }

    pub fn quick_win(&self) -> bool {
        match self {
            ScheduleEntry::Item(item) => item.quick_win,
            ScheduleEntry::Legacy(task) => task.quick_win,
        }
    }
}

impl From<Item> for ScheduleEntry {
    fn from(item: Item) -> Self {
        ScheduleEntry::Item(item)
    }
}

impl From<LegacyTask> for ScheduleEntry {
    fn from(task: LegacyTask) -> Self {
        ScheduleEntry::Legacy(task)
    }
}

/// Hours broken down by energy tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyHours {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Thresholds governing workload classification and conflict detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadPolicy {
    /// Day total above this is overloaded
    pub overload_hours: f64,
    /// Day total above this is unrealistic
    pub unrealistic_hours: f64,
    /// Incomplete high-energy entries allowed per day
    pub high_energy_limit: usize,
    /// Incomplete deep-focus entries allowed per day
    pub deep_focus_limit: usize,
    /// Day total below this counts as a light day
    pub light_day_hours: f64,
}

impl Default for WorkloadPolicy {
    fn default() -> Self {
        WorkloadPolicy {
            overload_hours: 8.0,
            unrealistic_hours: 12.0,
            high_energy_limit: 2,
            deep_focus_limit: 1,
            light_day_hours: 4.0,
        }
    }
}

/// Aggregated workload of a single date. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayWorkload {
    pub date: NaiveDate,
    /// Entries scheduled on this date
    pub entries: Vec<ScheduleEntry>,
    pub total_hours: f64,
    pub hours_by_energy: EnergyHours,
    /// Total above the overload threshold (unless already unrealistic)
    pub is_overloaded: bool,
    /// Total above the unrealistic threshold
    pub is_unrealistic: bool,
}

/// Aggregated workload of a Monday-anchored week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekWorkload {
    /// Monday of the summarized week
    pub week_start: NaiveDate,
    /// One workload per day, Monday through Sunday
    pub days: Vec<DayWorkload>,
    pub total_hours: f64,
    pub average_hours_per_day: f64,
    pub overloaded_days: usize,
    pub unrealistic_days: usize,
}

/// Normalize a date to the Monday of its week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Aggregate the entries scheduled on `date`.
///
/// Severity is mutually exclusive: a total above the unrealistic threshold
/// reports `is_unrealistic` alone, not `is_overloaded` as well.
pub fn calculate_day_workload(
    date: NaiveDate,
    snapshot: &[ScheduleEntry],
    policy: &WorkloadPolicy,
) -> DayWorkload {
    let entries: Vec<ScheduleEntry> = snapshot
        .iter()
        .filter(|entry| entry.scheduled_date() == Some(date))
        .cloned()
        .collect();

    let total_hours: f64 = entries.iter().map(|e| e.estimated_hours()).sum();
    let mut hours_by_energy = EnergyHours::default();
    for entry in &entries {
        match entry.energy() {
            EnergyLevel::Low => hours_by_energy.low += entry.estimated_hours(),
            EnergyLevel::Medium => hours_by_energy.medium += entry.estimated_hours(),
            EnergyLevel::High => hours_by_energy.high += entry.estimated_hours(),
        }
    }

    let is_unrealistic = total_hours > policy.unrealistic_hours;
    let is_overloaded = !is_unrealistic && total_hours > policy.overload_hours;

    DayWorkload {
        date,
        entries,
        total_hours,
        hours_by_energy,
        is_overloaded,
        is_unrealistic,
    }
}

/// Summarize the week containing `week_start` (normalized to its Monday).
pub fn week_workload_summary(
    start: NaiveDate,
    snapshot: &[ScheduleEntry],
    policy: &WorkloadPolicy,
) -> WeekWorkload {
    let monday = week_start(start);
    let days: Vec<DayWorkload> = (0..7)
        .map(|offset| calculate_day_workload(monday + Duration::days(offset), snapshot, policy))
        .collect();

    let total_hours: f64 = days.iter().map(|d| d.total_hours).sum();
    let overloaded_days = days.iter().filter(|d| d.is_overloaded).count();
    let unrealistic_days = days.iter().filter(|d| d.is_unrealistic).count();

    WeekWorkload {
        week_start: monday,
        days,
        total_hours,
        average_hours_per_day: total_hours / 7.0,
        overloaded_days,
        unrealistic_days,
    }
}
