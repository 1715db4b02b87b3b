//! Calendar period resolver.
//!
//! Every component that touches a calendar week goes through this module,
//! so timesheet lookup keys, status-matrix columns, and report week
//! grouping all agree on what "the week of a date" means: Monday through
//! Sunday, identified by the Monday.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// A Monday-to-Sunday calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekPeriod {
    /// The Monday the week starts on. Primary key for the week.
    pub start: NaiveDate,
    /// The Sunday the week ends on, always `start + 6 days`.
    pub end: NaiveDate,
}

/// Resolve a date to its enclosing Monday-start week.
///
/// A Sunday belongs to the week that started the *preceding* Monday, not
/// the following one. Idempotent: resolving a week's own Monday yields
/// the same week.
pub fn period_for(date: NaiveDate) -> WeekPeriod {
    // Monday = 0 .. Sunday = 6, so Sunday steps back six days.
    let offset = u64::from(date.weekday().num_days_from_monday());
    let start = date - Days::new(offset);
    WeekPeriod {
        start,
        end: start + Days::new(6),
    }
}

/// Enumerate `count` consecutive weeks ending at the week containing
/// `today`, newest first.
///
/// Index 0 is the current week; index `i` starts `i * 7` days before it.
pub fn recent_weeks(today: NaiveDate, count: usize) -> Vec<WeekPeriod> {
    let current = period_for(today);
    (0..count)
        .map(|i| period_for(current.start - Days::new(7 * i as u64)))
        .collect()
}

/// Check that an entry date falls inside the week of its owning timesheet.
///
/// An entry attached to a timesheet for a different week than its date
/// implies would corrupt week totals, so violations fail with
/// `Validation` before any write happens.
pub fn validate_date_in_week(
    date: NaiveDate,
    week_start: NaiveDate,
) -> Result<(), crate::error::CoreError> {
    let week = period_for(date);
    if week.start != week_start {
        return Err(crate::error::CoreError::Validation(format!(
            "Entry date {date} falls outside the timesheet week starting {week_start}"
        )));
    }
    Ok(())
}
