//! The run's event log.
//!
//! Every placement, warning and failure the scheduler produces is
//! recorded here, in the order it happened. The log is part of the
//! run report and is what callers inspect instead of parsing output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Scope, Slot, WorkerName};

/// The scheduling phases, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    ForceInclude,
    FairnessDuty,
    FallbackDuty,
    Operations,
    FinalCheck,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::ForceInclude => "force_include",
            Phase::FairnessDuty => "fairness_duty",
            Phase::FallbackDuty => "fallback_duty",
            Phase::Operations   => "operations",
            Phase::FinalCheck   => "final_check",
        }
    }
}

/// Every event emitted during a run.
/// Variants may be added — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterEvent {
    RunInitialized {
        year:  i32,
        month: u32,
        seed:  u64,
    },
    WorkerPlaced {
        phase:  Phase,
        worker: WorkerName,
        date:   NaiveDate,
        slot:   Slot,
    },
    /// A force-included worker could not be placed and was dropped.
    PlacementWarning {
        phase:  Phase,
        worker: WorkerName,
        reason: String,
    },
    PhaseCompleted {
        phase:     Phase,
        placed:    usize,
        /// Candidates still queued when the phase stopped.
        remaining: usize,
    },
    /// Slots in `scope` are still empty after `phase`.
    CompletenessFailure {
        phase:      Phase,
        scope:      Scope,
        unfilled:   usize,
        iterations: Option<u32>,
    },
}

impl RosterEvent {
    /// Stable name of the variant, for summaries and log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            RosterEvent::RunInitialized { .. }      => "run_initialized",
            RosterEvent::WorkerPlaced { .. }        => "worker_placed",
            RosterEvent::PlacementWarning { .. }    => "placement_warning",
            RosterEvent::PhaseCompleted { .. }      => "phase_completed",
            RosterEvent::CompletenessFailure { .. } => "completeness_failure",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, RosterEvent::PlacementWarning { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RosterEvent::CompletenessFailure { .. })
    }
}
