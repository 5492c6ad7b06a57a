//! Flat schedule output, one row per calendar day.
//!
//! Sentinels exist only here: an empty cell is written as NONE and a
//! holiday cell as HOLIDAY. Inside the engine cells are typed.

use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::{
    calendar::{Calendar, Cell, Day},
    error::RosterResult,
    types::Slot,
};

pub const EMPTY_SENTINEL:   &str = "NONE";
pub const HOLIDAY_SENTINEL: &str = "HOLIDAY";

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Column headers of the flat schedule.
pub fn headers() -> Vec<&'static str> {
    let mut headers = vec!["Date", "IsWeekday", "IsHoliday"];
    headers.extend(Slot::ALL.iter().map(|s| s.column_name()));
    headers
}

/// Write the calendar to `path`, replacing any existing file.
pub fn save_schedule(calendar: &Calendar, path: impl AsRef<Path>) -> RosterResult<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_schedule(calendar, file)
}

/// Write the calendar as CSV, header first, days in date order.
pub fn write_schedule<W: Write>(calendar: &Calendar, writer: W) -> RosterResult<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(headers())?;
    for day in calendar.days() {
        writer.write_record(row(day))?;
    }
    writer.flush()?;
    Ok(())
}

fn row(day: &Day) -> Vec<String> {
    let flag = |b: bool| (if b { "1" } else { "0" }).to_string();
    let mut row = vec![
        day.date.format(DATE_FORMAT).to_string(),
        flag(day.is_weekday),
        flag(day.is_holiday),
    ];
    row.extend(day.cells().iter().map(|cell| match cell {
        Cell::Empty            => EMPTY_SENTINEL.to_string(),
        Cell::Holiday          => HOLIDAY_SENTINEL.to_string(),
        Cell::Assigned(worker) => worker.clone(),
    }));
    row
}
