//! First-fit slot placement.
//!
//! RULE: Strictly greedy. Days are scanned in date order, slots in
//! index order, and the first qualifying empty cell wins. A worker is
//! never moved once placed and nothing is ever backtracked.

use chrono::NaiveDate;

use crate::{
    calendar::Calendar,
    config::RosterConfig,
    types::Slot,
    worker::Worker,
};

/// Where a worker ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub date: NaiveDate,
    pub slot: Slot,
}

/// Put `worker` in the first empty slot they qualify for.
/// Returns None, with the calendar untouched, if there is no such slot.
pub fn attempt_place(
    worker: &Worker,
    calendar: &mut Calendar,
    config: &RosterConfig,
) -> Option<Placement> {
    for day in calendar.working_days_mut() {
        let weekday = day.weekday();
        let target = Slot::ALL.into_iter().find(|&slot| {
            day.cell(slot).is_empty() && worker.qualifies_for(slot, weekday, config)
        });
        if let Some(slot) = target {
            if day.fill(slot, &worker.name) {
                return Some(Placement { date: day.date, slot });
            }
        }
    }
    None
}
