//! Conflict detection and suggestions over an aggregated day workload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::estimate::EstimateModel;
use crate::plan::EnergyLevel;
use crate::workload::{DayWorkload, WorkloadPolicy};

/// A scheduling warning for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// Total hours above the unrealistic threshold
    UnrealisticDay { hours: f64 },
    /// Total hours above the overload threshold
    OverloadedDay { hours: f64 },
    /// Too many incomplete high-energy entries on one day
    HighEnergyPileup { count: usize },
    /// Back-to-back deep-focus work without room for breaks
    DeepFocusStack { count: usize },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::UnrealisticDay { hours } => write!(
                f,
                "{hours:.1}h scheduled is more than fits in a day; move some of it"
            ),
            Conflict::OverloadedDay { hours } => {
                write!(f, "{hours:.1}h scheduled is over a full workday")
            }
            Conflict::HighEnergyPileup { count } => write!(
                f,
                "{count} high-energy tasks on one day; you may run out of steam"
            ),
            Conflict::DeepFocusStack { count } => write!(
                f,
                "{count} deep-focus tasks back to back; plan breaks between them"
            ),
        }
    }
}

/// A tip derived from a day workload, independent of the warning list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// Light day, good for recovery or small wins
    LightDay { hours: f64 },
    /// A quick win is scheduled, good for momentum
    QuickWin { title: String },
    /// Realistic projection exceeds a workday; spread tasks out
    SpreadTasks { realistic_hours: f64 },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::LightDay { hours } => write!(
                f,
                "Only {hours:.1}h scheduled; a good day for recovery or small wins"
            ),
            Suggestion::QuickWin { title } => {
                write!(f, "'{title}' is a quick win; start with it for momentum")
            }
            Suggestion::SpreadTasks { realistic_hours } => write!(
                f,
                "Realistically this is {realistic_hours:.1}h of work; consider spreading it across more days"
            ),
        }
    }
}

/// Derive the ordered warning list for a day's workload.
///
/// Severity warnings are mutually exclusive (unrealistic suppresses
/// overload); the pileup checks only count incomplete entries.
pub fn detect_conflicts(workload: &DayWorkload, policy: &WorkloadPolicy) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    if workload.is_unrealistic {
        conflicts.push(Conflict::UnrealisticDay {
            hours: workload.total_hours,
        });
    } else if workload.is_overloaded {
        conflicts.push(Conflict::OverloadedDay {
            hours: workload.total_hours,
        });
    }

    let high_energy = workload
        .entries
        .iter()
        .filter(|e| !e.completed() && e.energy() == EnergyLevel::High)
        .count();
    if high_energy > policy.high_energy_limit {
        conflicts.push(Conflict::HighEnergyPileup { count: high_energy });
    }

    let deep_focus = workload
        .entries
        .iter()
        .filter(|e| !e.completed() && e.deep_focus())
        .count();
    if deep_focus > policy.deep_focus_limit {
        conflicts.push(Conflict::DeepFocusStack { count: deep_focus });
    }

    conflicts
}

/// Derive tips for a day's workload.
pub fn suggestions(
    workload: &DayWorkload,
    model: &dyn EstimateModel,
    policy: &WorkloadPolicy,
) -> Vec<Suggestion> {
    let mut tips = Vec::new();

    if workload.total_hours < policy.light_day_hours && !workload.entries.is_empty() {
        tips.push(Suggestion::LightDay {
            hours: workload.total_hours,
        });
    }

    if let Some(entry) = workload.entries.iter().find(|e| e.quick_win()) {
        tips.push(Suggestion::QuickWin {
            title: entry.title().to_string(),
        });
    }

    let realistic_hours = model.realistic(workload.total_hours);
    if realistic_hours > policy.overload_hours {
        tips.push(Suggestion::SpreadTasks { realistic_hours });
    }

    tips
}
