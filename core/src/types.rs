//! Shared primitive types used across the roster engine.

use serde::{Deserialize, Serialize};

/// A worker's unique name, as it appears in the availability table.
pub type WorkerName = String;

/// Number of slots filled on every working day.
pub const SLOTS_PER_DAY: usize = 4;

/// The staffing category a worker can fill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Duty,
    Operations,
}

impl Role {
    pub fn from_ops_eligible(ops_eligible: bool) -> Self {
        if ops_eligible { Role::Operations } else { Role::Duty }
    }
}

/// Which half of the working day a slot covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Early,
    Late,
}

/// The four fixed slots of a working day.
/// NEVER reorder: the discriminant is the column index in the day's
/// slot array and in the flat output file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum Slot {
    EarlyDuty       = 0,
    EarlyOperations = 1,
    LateDuty        = 2,
    LateOperations  = 3,
}

impl Slot {
    /// All slots in placement order.
    pub const ALL: [Slot; SLOTS_PER_DAY] = [
        Slot::EarlyDuty,
        Slot::EarlyOperations,
        Slot::LateDuty,
        Slot::LateOperations,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn role(self) -> Role {
        match self {
            Slot::EarlyDuty | Slot::LateDuty             => Role::Duty,
            Slot::EarlyOperations | Slot::LateOperations => Role::Operations,
        }
    }

    pub fn shift(self) -> Shift {
        match self {
            Slot::EarlyDuty | Slot::EarlyOperations => Shift::Early,
            Slot::LateDuty | Slot::LateOperations   => Shift::Late,
        }
    }

    /// Column header used in the flat schedule file.
    pub fn column_name(self) -> &'static str {
        match self {
            Slot::EarlyDuty       => "EarlyDutyInvestigator",
            Slot::EarlyOperations => "EarlyOperationsOfficer",
            Slot::LateDuty        => "LateDutyInvestigator",
            Slot::LateOperations  => "LateOperationsOfficer",
        }
    }
}

/// Which slots a completeness check looks at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Duty,
    Operations,
    Both,
}

impl Scope {
    pub fn covers(self, slot: Slot) -> bool {
        match self {
            Scope::Duty       => slot.role() == Role::Duty,
            Scope::Operations => slot.role() == Role::Operations,
            Scope::Both       => true,
        }
    }
}
