//! Monthly duty roster scheduling.
//!
//! Fills the four daily slots (early/late × duty/operations) of every
//! working day in a month from a table of worker availability, using
//! first-fit placement and seeded, fairness-biased random draws.

pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod output;
pub mod placement;
pub mod queue;
pub mod rng;
pub mod types;
pub mod worker;
