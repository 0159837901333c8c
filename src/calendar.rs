//! Calendar month reconstruction
//!
//! The upstream batch endpoint returns day records only for the dates it
//! knows about. The aggregator here rebuilds a complete month from that
//! sparse response: exactly one entry per calendar day, in order, with
//! `Unknown` filling every gap. On a whole-batch failure the caller
//! substitutes [`degraded_month`] so the calendar grid always renders a
//! full month even under upstream outage.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Result, TempoError};
use crate::tempo::{DayRecord, TempoColor};

/// One cell of the rendered month. Produced only by this module; `day` is
/// the 1-based day of month and records are ordered by it, gap-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub color: TempoColor,
}

fn first_of_month(year: i32, month0: u32) -> Result<NaiveDate> {
    if month0 > 11 {
        return Err(TempoError::validation(
            "month",
            &format!("month index {} out of range 0..=11", month0),
        ));
    }
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or_else(|| {
        TempoError::validation("year", &format!("no such month: {}-{}", year, month0 + 1))
    })
}

/// Number of days in the given month (`month0` is 0-based, 0 = January).
///
/// Computed as the distance to the first day of the following month, which
/// keeps leap-year February correct without a lookup table.
pub fn days_in_month(year: i32, month0: u32) -> Result<u32> {
    let first = first_of_month(year, month0)?;
    let next = if month0 == 11 {
        first_of_month(year + 1, 0)?
    } else {
        first_of_month(year, month0 + 1)?
    };
    Ok((next - first).num_days() as u32)
}

/// All dates of the month, day 1 through the last day, in order.
pub fn month_dates(year: i32, month0: u32) -> Result<Vec<NaiveDate>> {
    let first = first_of_month(year, month0)?;
    let n = days_in_month(year, month0)?;
    Ok(first.iter_days().take(n as usize).collect())
}

/// Rebuild the full month from a sparse batch of upstream day records.
///
/// Records outside the month are ignored; dates missing from the batch get
/// `Unknown`. The result always has exactly `days_in_month` entries with
/// `day` running 1..=n.
pub fn assemble_month(year: i32, month0: u32, records: &[DayRecord]) -> Result<Vec<CalendarDay>> {
    let by_date: HashMap<NaiveDate, TempoColor> =
        records.iter().map(|r| (r.date, r.color)).collect();
    Ok(month_dates(year, month0)?
        .into_iter()
        .map(|date| CalendarDay {
            date,
            day: date.day(),
            color: by_date.get(&date).copied().unwrap_or(TempoColor::Unknown),
        })
        .collect())
}

/// The all-`Unknown` month used when the batch request itself fails.
pub fn degraded_month(year: i32, month0: u32) -> Result<Vec<CalendarDay>> {
    assemble_month(year, month0, &[])
}

/// Weekday column for grid layout: 0 = Monday .. 6 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

/// Number of leading blank cells before day 1 in a Monday-first grid.
pub fn first_weekday_offset(year: i32, month0: u32) -> Result<u32> {
    Ok(weekday_index(first_of_month(year, month0)?))
}

/// The month before (year, month0), for calendar navigation.
pub fn prev_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 0 { (year - 1, 11) } else { (year, month0 - 1) }
}

/// The month after (year, month0), for calendar navigation.
pub fn next_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 11 { (year + 1, 0) } else { (year, month0 + 1) }
}
