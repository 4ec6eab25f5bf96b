//! Next-fire computation for the daily trigger.

use chrono::{DateTime, Datelike, Local, MappedLocalTime, TimeZone};

/// Compute the next local-time instant strictly after `from` at which a
/// daily HH:MM trigger fires.
///
/// A DST gap can make a day's HH:MM unrepresentable; the candidate then
/// advances a day at a time until it lands on a valid local time. An
/// ambiguous time (clocks rolled back) resolves to the earlier instant.
pub fn next_daily_run(hour: u8, minute: u8, from: DateTime<Local>) -> DateTime<Local> {
    let mut date = from.date_naive();
    loop {
        let candidate = Local.with_ymd_and_hms(
            date.year(),
            date.month(),
            date.day(),
            u32::from(hour),
            u32::from(minute),
            0,
        );
        match candidate {
            MappedLocalTime::Single(t) if t > from => return t,
            MappedLocalTime::Ambiguous(earliest, _) if earliest > from => return earliest,
            _ => date = date.succ_opt().expect("date out of chrono range"),
        }
    }
}
