//! Workers and the run's membership lists.
//!
//! RULE: Workers are never mutated while scheduling runs.
//! The scheduler only tracks who has been placed, in its own set.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{
    config::RosterConfig,
    types::{Role, Shift, Slot, WorkerName},
};

/// Which weekdays a worker can come in, Monday first.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekdayAvailability([bool; 5]);

impl WeekdayAvailability {
    pub fn new(mon: bool, tue: bool, wed: bool, thu: bool, fri: bool) -> Self {
        Self([mon, tue, wed, thu, fri])
    }

    pub fn all() -> Self {
        Self([true; 5])
    }

    pub fn none() -> Self {
        Self([false; 5])
    }

    /// Only the given weekday. Weekend days yield no availability.
    pub fn only(day: Weekday) -> Self {
        let mut days = [false; 5];
        if let Some(i) = weekday_index(day) {
            days[i] = true;
        }
        Self(days)
    }

    /// Weekends are never available.
    pub fn on(&self, day: Weekday) -> bool {
        weekday_index(day).is_some_and(|i| self.0[i])
    }
}

fn weekday_index(day: Weekday) -> Option<usize> {
    match day {
        Weekday::Sat | Weekday::Sun => None,
        other => Some(other.num_days_from_monday() as usize),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Worker {
    pub name:         WorkerName,
    pub availability: WeekdayAvailability,
    /// Earliest time the worker can start.
    pub day_start:    NaiveTime,
    /// Latest time the worker can stay.
    pub day_finish:   NaiveTime,
    pub ops_eligible: bool,
}

impl Worker {
    pub fn role(&self) -> Role {
        Role::from_ops_eligible(self.ops_eligible)
    }

    /// Whether this worker may fill `slot` on a day falling on `weekday`.
    /// Occupancy of the slot is not considered here.
    pub fn qualifies_for(&self, slot: Slot, weekday: Weekday, config: &RosterConfig) -> bool {
        if slot.role() != self.role() || !self.availability.on(weekday) {
            return false;
        }
        match slot.shift() {
            Shift::Early => self.day_start <= config.early_cutoff,
            Shift::Late  => self.day_finish >= config.late_cutoff,
        }
    }
}

/// Workers in input order, unique by name.
#[derive(Debug, Clone, Default)]
pub struct WorkerTable {
    workers: Vec<Worker>,
    index:   HashMap<WorkerName, usize>,
}

impl WorkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a worker. A repeated name replaces the earlier record
    /// in place and hands the replaced record back to the caller.
    pub fn insert(&mut self, worker: Worker) -> Option<Worker> {
        match self.index.get(&worker.name) {
            Some(&i) => Some(std::mem::replace(&mut self.workers[i], worker)),
            None => {
                self.index.insert(worker.name.clone(), self.workers.len());
                self.workers.push(worker);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Worker> {
        self.index.get(name).map(|&i| &self.workers[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

impl FromIterator<Worker> for WorkerTable {
    fn from_iter<I: IntoIterator<Item = Worker>>(iter: I) -> Self {
        let mut table = WorkerTable::new();
        for worker in iter {
            table.insert(worker);
        }
        table
    }
}

/// Externally supplied list memberships that steer the draw phases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawLists {
    /// Never drawn.
    pub skip:               HashSet<WorkerName>,
    /// Left out of the fairness duty draw.
    pub served_last_period: HashSet<WorkerName>,
    /// Placed before any draw, consumed from the end of the list.
    pub force_include:      Vec<WorkerName>,
}

/// Everything the scheduler needs to know about the people involved.
#[derive(Debug, Clone, Default)]
pub struct Workforce {
    pub workers: WorkerTable,
    pub lists:   DrawLists,
}
