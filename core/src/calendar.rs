//! The month calendar: one Day per date, four slot cells per day.
//!
//! RULE: Only placement.rs fills cells, and an assigned cell is
//! never overwritten. Everything else reads.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::{
    error::{RosterError, RosterResult},
    types::{Scope, Slot, WorkerName, SLOTS_PER_DAY},
};

/// Content of one slot on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "worker", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Holiday,
    Assigned(WorkerName),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn worker(&self) -> Option<&str> {
        match self {
            Cell::Assigned(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Day {
    pub date:       NaiveDate,
    pub is_weekday: bool,
    pub is_holiday: bool,
    slots:          [Cell; SLOTS_PER_DAY],
}

impl Day {
    fn new(date: NaiveDate, is_holiday: bool) -> Self {
        let fill = if is_holiday { Cell::Holiday } else { Cell::Empty };
        Self {
            date,
            is_weekday: !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            is_holiday,
            slots: std::array::from_fn(|_| fill.clone()),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// A day the scheduler staffs: a weekday that is not a holiday.
    pub fn is_working_day(&self) -> bool {
        self.is_weekday && !self.is_holiday
    }

    pub fn cell(&self, slot: Slot) -> &Cell {
        &self.slots[slot.index()]
    }

    pub fn cells(&self) -> &[Cell; SLOTS_PER_DAY] {
        &self.slots
    }

    /// Put `worker` in an empty slot. Returns false and leaves the
    /// cell alone if it is already holiday or assigned.
    pub(crate) fn fill(&mut self, slot: Slot, worker: &str) -> bool {
        let cell = &mut self.slots[slot.index()];
        if !cell.is_empty() {
            return false;
        }
        *cell = Cell::Assigned(worker.to_string());
        true
    }
}

/// All days of the target month, in date order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Calendar {
    pub year:  i32,
    pub month: u32,
    days:      BTreeMap<NaiveDate, Day>,
}

impl Calendar {
    /// Build every day of `year`-`month`. Years start at 1. Holiday
    /// dates outside the month are ignored.
    pub fn build(year: i32, month: u32, holidays: &HashSet<NaiveDate>) -> RosterResult<Self> {
        let first = Some(year)
            .filter(|y| *y >= 1)
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
            .ok_or(RosterError::InvalidMonth { year, month })?;

        let mut days = BTreeMap::new();
        let mut current = Some(first);
        while let Some(date) = current.filter(|d| d.month() == month) {
            days.insert(date, Day::new(date, holidays.contains(&date)));
            current = date.succ_opt();
        }

        log::debug!(
            "calendar {year}-{month:02}: {} days, {} working",
            days.len(),
            days.values().filter(|d| d.is_working_day()).count()
        );
        Ok(Self { year, month, days })
    }

    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.days.values()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn working_days(&self) -> impl Iterator<Item = &Day> {
        self.days.values().filter(|d| d.is_working_day())
    }

    pub(crate) fn working_days_mut(&mut self) -> impl Iterator<Item = &mut Day> {
        self.days.values_mut().filter(|d| d.is_working_day())
    }

    /// True when no slot covered by `scope` is empty on any working day.
    pub fn is_complete(&self, scope: Scope) -> bool {
        self.unfilled(scope) == 0
    }

    /// Number of empty slots covered by `scope` across working days.
    pub fn unfilled(&self, scope: Scope) -> usize {
        self.working_days()
            .flat_map(|d| Slot::ALL.into_iter().map(move |s| (d, s)))
            .filter(|(d, s)| scope.covers(*s) && d.cell(*s).is_empty())
            .count()
    }

    /// Number of slots covered by `scope` that the month needs staffed.
    pub fn required(&self, scope: Scope) -> usize {
        let per_day = Slot::ALL.iter().filter(|s| scope.covers(**s)).count();
        self.working_days().count() * per_day
    }

    /// Every assigned cell as (date, slot, worker), in date then slot order.
    pub fn assignments(&self) -> impl Iterator<Item = (NaiveDate, Slot, &str)> {
        self.days.values().flat_map(|d| {
            Slot::ALL
                .into_iter()
                .filter_map(move |s| d.cell(s).worker().map(|w| (d.date, s, w)))
        })
    }
}
