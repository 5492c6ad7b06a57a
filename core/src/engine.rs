//! The roster engine: fills one month's calendar from a workforce.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Force-include    — listed workers get first pick of slots
//!   2. Fairness duty    — shuffled draw of duty workers who did not
//!                         serve last period
//!   3. Fallback duty    — shuffled draw of every remaining duty worker
//!   4. Operations       — shuffled draw of ops workers, pool rebuilt
//!                         and redrawn until complete or the retry cap
//!   5. Final check      — every working-day slot must be filled
//!
//! RULES:
//!   - A worker is placed at most once per run.
//!   - Failing a draw does not remove a worker from later pools;
//!     only a successful placement does.
//!   - All randomness flows through the RngBank.
//!   - Problems are recorded as events and logged. Nothing after the
//!     calendar is built returns an error, so a partly filled month
//!     still produces a roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    calendar::Calendar,
    config::RosterConfig,
    error::RosterResult,
    event::{Phase, RosterEvent},
    placement::attempt_place,
    queue::CandidateQueue,
    rng::{DrawRng, DrawSlot, RngBank},
    types::{Role, Scope, WorkerName},
    worker::Workforce,
};

pub struct RosterEngine<'a> {
    config:    &'a RosterConfig,
    workforce: &'a Workforce,
    rng_bank:  RngBank,
    calendar:  Calendar,
    assigned:  HashSet<WorkerName>,
    events:    Vec<RosterEvent>,
}

impl<'a> RosterEngine<'a> {
    /// Build the month calendar and an engine ready to fill it.
    /// Fails only if `year`-`month` is not a calendar month.
    pub fn new(
        year: i32,
        month: u32,
        holidays: &HashSet<NaiveDate>,
        workforce: &'a Workforce,
        config: &'a RosterConfig,
        seed: u64,
    ) -> RosterResult<Self> {
        let calendar = Calendar::build(year, month, holidays)?;
        Ok(Self {
            config,
            workforce,
            rng_bank: RngBank::new(seed),
            calendar,
            assigned: HashSet::new(),
            events: vec![RosterEvent::RunInitialized { year, month, seed }],
        })
    }

    /// Run every phase in order and hand back the filled calendar.
    pub fn run(mut self) -> RosterReport {
        log::info!(
            "scheduling {}-{:02} for {} workers, seed {}",
            self.calendar.year,
            self.calendar.month,
            self.workforce.workers.len(),
            self.rng_bank.master_seed()
        );

        self.force_include();
        self.fairness_duty();
        self.fallback_duty();
        self.operations();
        self.final_check();

        RosterReport {
            seed:     self.rng_bank.master_seed(),
            calendar: self.calendar,
            events:   self.events,
        }
    }

    fn force_include(&mut self) {
        let mut queue = CandidateQueue::in_order(self.workforce.lists.force_include.clone());
        let mut placed = 0;
        while let Some(name) = queue.pop() {
            if self.assigned.contains(&name) {
                log::debug!("force-include: {name} is already placed");
                continue;
            }
            if self.workforce.workers.get(&name).is_none() {
                self.warn_unplaced(Phase::ForceInclude, name, "not in the availability table");
                continue;
            }
            if self.place(Phase::ForceInclude, &name) {
                placed += 1;
            } else {
                self.warn_unplaced(Phase::ForceInclude, name, "no open slot fits their availability");
            }
        }
        self.complete_phase(Phase::ForceInclude, placed, 0);
    }

    fn fairness_duty(&mut self) {
        let pool = self.pool(Role::Duty, true);
        let mut rng = self.rng_bank.for_phase(DrawSlot::FairnessDuty);
        let (placed, remaining) = self.draw(Phase::FairnessDuty, pool, &mut rng, Scope::Duty);
        self.complete_phase(Phase::FairnessDuty, placed, remaining);
    }

    fn fallback_duty(&mut self) {
        let pool = self.pool(Role::Duty, false);
        let mut rng = self.rng_bank.for_phase(DrawSlot::FallbackDuty);
        let (placed, remaining) = self.draw(Phase::FallbackDuty, pool, &mut rng, Scope::Duty);
        self.complete_phase(Phase::FallbackDuty, placed, remaining);

        if !self.calendar.is_complete(Scope::Duty) {
            self.fail(Phase::FallbackDuty, Scope::Duty, None);
        } else if remaining > 0 {
            log::debug!("finished duty schedule with {remaining} people still in the list");
        }
    }

    fn operations(&mut self) {
        let limit = self.config.ops_retry_limit;
        let mut rng = self.rng_bank.for_phase(DrawSlot::Operations);
        let mut iterations = 0;
        let mut placed = 0;
        let mut remaining = 0;

        while !self.calendar.is_complete(Scope::Operations) && iterations < limit {
            let pool = self.pool(Role::Operations, false);
            let (n, left) = self.draw(Phase::Operations, pool, &mut rng, Scope::Operations);
            placed += n;
            remaining = left;
            iterations += 1;
        }
        log::debug!("operations: {iterations} draw iterations");
        self.complete_phase(Phase::Operations, placed, remaining);

        if !self.calendar.is_complete(Scope::Operations) {
            self.fail(Phase::Operations, Scope::Operations, Some(iterations));
        }
    }

    fn final_check(&mut self) {
        if !self.calendar.is_complete(Scope::Both) {
            self.fail(Phase::FinalCheck, Scope::Both, None);
        }
    }

    /// Unplaced, non-skipped workers of `role` in input order.
    fn pool(&self, role: Role, exclude_served_last_period: bool) -> Vec<WorkerName> {
        let lists = &self.workforce.lists;
        self.workforce
            .workers
            .iter()
            .filter(|w| w.role() == role)
            .filter(|w| !lists.skip.contains(&w.name))
            .filter(|w| !self.assigned.contains(&w.name))
            .filter(|w| !(exclude_served_last_period && lists.served_last_period.contains(&w.name)))
            .map(|w| w.name.clone())
            .collect()
    }

    /// Shuffle `pool` and place candidates until it runs dry or every
    /// slot in `scope` is filled. Returns (placed, left in queue).
    fn draw(
        &mut self,
        phase: Phase,
        pool: Vec<WorkerName>,
        rng: &mut DrawRng,
        scope: Scope,
    ) -> (usize, usize) {
        log::debug!("{}: drawing {} candidates from the {} stream", phase.name(), pool.len(), rng.stream());
        let mut queue = CandidateQueue::shuffled(pool, rng);
        let mut placed = 0;
        while !self.calendar.is_complete(scope) {
            let Some(name) = queue.pop() else { break };
            if self.place(phase, &name) {
                placed += 1;
            } else {
                log::debug!("{}: could not find a fit for {name}", phase.name());
            }
        }
        (placed, queue.len())
    }

    fn place(&mut self, phase: Phase, name: &str) -> bool {
        let workforce = self.workforce;
        let Some(worker) = workforce.workers.get(name) else {
            return false;
        };
        match attempt_place(worker, &mut self.calendar, self.config) {
            Some(p) => {
                log::debug!("{}: {name} -> {} {:?}", phase.name(), p.date, p.slot);
                self.assigned.insert(name.to_string());
                self.events.push(RosterEvent::WorkerPlaced {
                    phase,
                    worker: name.to_string(),
                    date: p.date,
                    slot: p.slot,
                });
                true
            }
            None => false,
        }
    }

    fn warn_unplaced(&mut self, phase: Phase, worker: WorkerName, reason: &str) {
        log::warn!("could not find a fit for {worker} from the {} list: {reason}", phase.name());
        self.events.push(RosterEvent::PlacementWarning {
            phase,
            worker,
            reason: reason.to_string(),
        });
    }

    fn fail(&mut self, phase: Phase, scope: Scope, iterations: Option<u32>) {
        let unfilled = self.calendar.unfilled(scope);
        match iterations {
            Some(n) => log::error!(
                "{}: unable to fill {scope:?} schedule after {n} iterations, {unfilled} slots open",
                phase.name()
            ),
            None => log::error!(
                "{}: unable to fill {scope:?} schedule, {unfilled} slots open",
                phase.name()
            ),
        }
        self.events.push(RosterEvent::CompletenessFailure {
            phase,
            scope,
            unfilled,
            iterations,
        });
    }

    fn complete_phase(&mut self, phase: Phase, placed: usize, remaining: usize) {
        log::info!("{}: placed {placed}, {remaining} left in queue", phase.name());
        self.events.push(RosterEvent::PhaseCompleted { phase, placed, remaining });
    }
}

/// Outcome of one run: the calendar as far as it could be filled,
/// plus everything that happened on the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterReport {
    pub seed:     u64,
    pub calendar: Calendar,
    pub events:   Vec<RosterEvent>,
}

impl RosterReport {
    pub fn is_complete(&self) -> bool {
        self.calendar.is_complete(Scope::Both)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &RosterEvent> {
        self.events.iter().filter(|e| e.is_warning())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RosterEvent> {
        self.events.iter().filter(|e| e.is_failure())
    }
}

/// Build the calendar and run the engine in one call.
pub fn schedule_month(
    year: i32,
    month: u32,
    holidays: &HashSet<NaiveDate>,
    workforce: &Workforce,
    config: &RosterConfig,
    seed: u64,
) -> RosterResult<RosterReport> {
    Ok(RosterEngine::new(year, month, holidays, workforce, config, seed)?.run())
}
