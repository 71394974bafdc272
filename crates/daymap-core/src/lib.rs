//! # Daymap Core Library
//!
//! Core business logic for Daymap, a personal planning tool. The library
//! keeps two linked entity collections — groups (project-like containers)
//! and the schedulable items inside them — mutually consistent, and derives
//! daily/weekly workload views with overload warnings on demand.
//!
//! ## Architecture
//!
//! - **Planner**: all mutating operations on groups and items; maintains
//!   bidirectional consistency between an item's owner reference and the
//!   group's membership lists
//! - **Storage**: a generic string-keyed backend (in-memory or SQLite)
//!   behind an entity store that swallows read corruption into empty
//!   collections, plus TOML-based configuration
//! - **Workload**: pure aggregation of schedulable entries by date, with
//!   energy-tier breakdowns and overload classification
//! - **Conflicts**: human-readable warnings and tips derived from a day's
//!   aggregated workload
//! - **Estimate**: injectable projection of optimistic estimates to
//!   realistic ones
//!
//! ## Key Components
//!
//! - [`Planner`]: planner service and consumption surface
//! - [`EntityStore`]: raw load/save of the two collections
//! - [`calculate_day_workload`]: pure day aggregation
//! - [`detect_conflicts`]: policy-driven warning list

pub mod conflict;
pub mod error;
pub mod estimate;
pub mod plan;
pub mod planner;
pub mod storage;
pub mod workload;

pub use conflict::{detect_conflicts, suggestions, Conflict, Suggestion};
pub use error::{ConfigError, CoreError, StoreError};
pub use estimate::{
    realistic_estimate, EstimateModel, FixedMultiplier, DEFAULT_REALITY_MULTIPLIER,
};
pub use plan::{
    Difficulty, EnergyLevel, Group, GroupDraft, GroupPatch, GroupStage, Item, ItemDraft,
    ItemPatch, Link,
};
pub use planner::Planner;
pub use storage::{Config, EntityStore, KvBackend, MemoryBackend, SqliteBackend};
pub use workload::{
    calculate_day_workload, week_start, week_workload_summary, DayWorkload, EnergyHours,
    LegacyTask, ScheduleEntry, WeekWorkload, WorkloadPolicy,
};
