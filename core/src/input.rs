//! Delimited input: the availability sheet and the holiday list.
//!
//! Availability columns, in order:
//!   Person, Monday, Tuesday, Wednesday, Thursday, Friday, DayStart,
//!   DayFinish, OpsOK, SkipList, InRotation, WentLastMonth, ForceInFirst
//!
//! SkipList, WentLastMonth and ForceInFirst hold worker *names*, not
//! flags: any row may name any worker. InRotation is derived in the
//! sheet itself and ignored here.

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::{
    error::{RosterError, RosterResult},
    worker::{WeekdayAvailability, Worker, Workforce},
};

const PERSON:          usize = 0;
const MONDAY:          usize = 1;
const DAY_START:       usize = 6;
const DAY_FINISH:      usize = 7;
const OPS_OK:          usize = 8;
const SKIP_LIST:       usize = 9;
const WENT_LAST_MONTH: usize = 11;
const FORCE_IN_FIRST:  usize = 12;

const HOLIDAY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Load the availability sheet from `path`.
pub fn load_workforce(path: impl AsRef<Path>) -> RosterResult<Workforce> {
    let file = std::fs::File::open(path.as_ref())?;
    read_workforce(file)
}

/// Parse the availability sheet. The first row is a header.
/// A repeated name is logged and the later row wins.
pub fn read_workforce<R: Read>(reader: R) -> RosterResult<Workforce> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut workforce = Workforce::default();
    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        log::debug!("processing row {line}: {record:?}");

        let name = field(&record, PERSON);
        if name.is_empty() {
            continue;
        }

        push_name(&mut workforce.lists.force_include, &record, FORCE_IN_FIRST);
        if let Some(skip) = non_empty(&record, SKIP_LIST) {
            workforce.lists.skip.insert(skip);
        }
        if let Some(went) = non_empty(&record, WENT_LAST_MONTH) {
            workforce.lists.served_last_period.insert(went);
        }

        let worker = parse_worker(&record, name, line)?;
        if workforce.workers.insert(worker).is_some() {
            log::warn!("did worker {name} get listed twice? line {line}");
        }
    }
    Ok(workforce)
}

fn parse_worker(record: &StringRecord, name: &str, line: u64) -> RosterResult<Worker> {
    let malformed = |reason: String| RosterError::MalformedAvailability { line, reason };

    if record.len() <= OPS_OK {
        return Err(malformed(format!(
            "expected at least {} columns, found {}",
            OPS_OK + 1,
            record.len()
        )));
    }

    let day = |offset: usize| is_true(field(record, MONDAY + offset));
    let time = |col: usize, label: &str| {
        let raw = field(record, col);
        NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|e| malformed(format!("{label} {raw:?} is not HH:MM ({e})")))
    };

    Ok(Worker {
        name:         name.to_string(),
        availability: WeekdayAvailability::new(day(0), day(1), day(2), day(3), day(4)),
        day_start:    time(DAY_START, "DayStart")?,
        day_finish:   time(DAY_FINISH, "DayFinish")?,
        ops_eligible: is_true(field(record, OPS_OK)),
    })
}

/// Load the holiday list from `path`.
pub fn load_holidays(path: impl AsRef<Path>) -> RosterResult<HashSet<NaiveDate>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_holidays(file)
}

/// Parse the holiday list: a header row, then `MM/DD/YYYY,Name` rows.
pub fn read_holidays<R: Read>(reader: R) -> RosterResult<HashSet<NaiveDate>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut holidays = HashSet::new();
    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        if record.len() != 2 {
            return Err(RosterError::MalformedHoliday {
                line,
                reason: format!("expected date and name, found {} fields", record.len()),
            });
        }
        let raw = field(&record, 0);
        let date = NaiveDate::parse_from_str(raw, HOLIDAY_DATE_FORMAT).map_err(|e| {
            RosterError::MalformedHoliday { line, reason: format!("{raw:?}: {e}") }
        })?;
        log::debug!("holiday {date}: {}", field(&record, 1));
        holidays.insert(date);
    }
    Ok(holidays)
}

fn field(record: &StringRecord, col: usize) -> &str {
    record.get(col).map(str::trim).unwrap_or("")
}

fn non_empty(record: &StringRecord, col: usize) -> Option<String> {
    Some(field(record, col)).filter(|s| !s.is_empty()).map(str::to_string)
}

fn push_name(list: &mut Vec<String>, record: &StringRecord, col: usize) {
    if let Some(name) = non_empty(record, col) {
        list.push(name);
    }
}

/// Spreadsheet exports write booleans as TRUE/FALSE; nothing else counts.
fn is_true(value: &str) -> bool {
    value == "TRUE"
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
