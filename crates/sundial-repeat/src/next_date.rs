//! Forward search for the next occurrence of a repeat rule.
//!
//! Every search returns the earliest date strictly after the reference
//! "now", walking forward from the task's anchor start date. Day-by-day
//! scans (weekly, monthly) are bounded so that a contradictory rule such as
//! `m 30 2` reports an error instead of spinning forever.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use sundial_core::date::{format_date, parse_date};

use crate::error::{RepeatError, RepeatResult};
use crate::rule::{MonthDay, RepeatRule};

/// Upper bound on day-by-day scans, counted from where the scan starts
/// (never earlier than `now`). Any satisfiable weekly rule matches within a
/// week; the worst satisfiable monthly rule is `m 29 2` across a century
/// non-leap year, up to eight years between hits. Nine years of days is
/// past every reachable match.
const MAX_SCAN_DAYS: u32 = 9 * 366;

/// ## Summary
/// String-level entry point: parses the start date and the repeat spec,
/// then searches forward from `start`, returning the earliest qualifying
/// date strictly after `now` in `YYYYMMDD` form.
///
/// ## Errors
/// [`RepeatError::InvalidDate`] if `start` is not a valid `YYYYMMDD` date;
/// [`RepeatError::InvalidRule`] if the spec fails validation or the rule
/// can never be satisfied.
pub fn next_date(now: NaiveDate, start: &str, repeat: &str) -> RepeatResult<String> {
    let start = parse_date(start).map_err(|_| RepeatError::InvalidDate(start.to_string()))?;
    let rule = RepeatRule::parse(repeat)?;

    next_occurrence(now, start, &rule).map(format_date)
}

/// ## Summary
/// Typed core of the search: the earliest date strictly after `now` that
/// satisfies `rule`, reached by walking forward from `start`.
///
/// The start date itself is never a candidate; every variant advances at
/// least once before testing.
///
/// ## Errors
/// [`RepeatError::InvalidRule`] if the bounded scan exhausts without a
/// match (the rule is unsatisfiable);
/// [`RepeatError::InvalidDate`] if stepping runs off the supported
/// calendar range.
pub fn next_occurrence(
    now: NaiveDate,
    start: NaiveDate,
    rule: &RepeatRule,
) -> RepeatResult<NaiveDate> {
    match rule {
        RepeatRule::Daily { every } => next_daily(now, start, *every),
        RepeatRule::Yearly => next_yearly(now, start),
        RepeatRule::Weekly { weekdays } => next_weekly(now, start, weekdays),
        RepeatRule::Monthly { days, months } => next_monthly(now, start, days, months),
    }
}

/// Daily repeats jump by whole intervals instead of scanning: the result is
/// `start + k * every` for the smallest `k >= 1` landing strictly after
/// `now`.
fn next_daily(now: NaiveDate, start: NaiveDate, every: u16) -> RepeatResult<NaiveDate> {
    let every = i64::from(every);
    let gap = now.signed_duration_since(start).num_days();
    let steps = if gap < 0 { 1 } else { gap / every + 1 };

    let offset = u64::try_from(steps * every)
        .map_err(|_| RepeatError::InvalidDate("daily step overflow".into()))?;
    start
        .checked_add_days(Days::new(offset))
        .ok_or_else(|| RepeatError::InvalidDate("daily step out of range".into()))
}

fn next_yearly(now: NaiveDate, start: NaiveDate) -> RepeatResult<NaiveDate> {
    let mut date = step_year(start)?;
    while date <= now {
        date = step_year(date)?;
    }
    Ok(date)
}

/// Adds one calendar year. A Feb 29 anchor stepping into a non-leap year
/// normalizes to Mar 1, matching `y` semantics for leap-day tasks.
fn step_year(date: NaiveDate) -> RepeatResult<NaiveDate> {
    let year = date.year() + 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .ok_or_else(|| RepeatError::InvalidDate(format!("year out of range: {year}")))
}

fn next_weekly(now: NaiveDate, start: NaiveDate, weekdays: &[u8]) -> RepeatResult<NaiveDate> {
    // Inclusion set over ISO weekday numbers, 1 = Monday .. 7 = Sunday.
    let mut include = [false; 8];
    for &day in weekdays {
        include[usize::from(day)] = true;
    }

    // Candidates are strictly after `now`, so a far-past anchor can be
    // fast-forwarded to `now` without skipping any; the bound then only
    // covers ground a match could actually be on.
    let mut date = start.max(now);
    for _ in 0..MAX_SCAN_DAYS {
        date = step_day(date)?;
        if date > now && include[iso_weekday(date)] {
            return Ok(date);
        }
    }

    Err(RepeatError::InvalidRule("unsatisfiable weekly rule".into()))
}

/// ISO weekday number, 1 = Monday .. 7 = Sunday.
fn iso_weekday(date: NaiveDate) -> usize {
    match date.weekday() {
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
        Weekday::Sun => 7,
    }
}

fn next_monthly(
    now: NaiveDate,
    start: NaiveDate,
    days: &[MonthDay],
    months: &[u8],
) -> RepeatResult<NaiveDate> {
    // Inclusion sets are locals of this call; the engine holds no state
    // between evaluations.
    let mut day_set = [false; 32];
    let mut last_day = false;
    let mut second_last_day = false;
    for day in days {
        match day {
            MonthDay::Day(day) => day_set[usize::from(*day)] = true,
            MonthDay::Last => last_day = true,
            MonthDay::SecondToLast => second_last_day = true,
        }
    }

    let mut month_set = [false; 13];
    if months.is_empty() {
        month_set = [true; 13];
    } else {
        for &month in months {
            month_set[usize::from(month)] = true;
        }
    }

    // Same fast-forward as the weekly scan.
    let mut date = start.max(now);
    for _ in 0..MAX_SCAN_DAYS {
        date = step_day(date)?;
        if date > now
            && month_set[usize::try_from(date.month()).unwrap_or_default()]
            && matches_month_day(date, &day_set, last_day, second_last_day)?
        {
            return Ok(date);
        }
    }

    Err(RepeatError::InvalidRule("unsatisfiable monthly rule".into()))
}

fn matches_month_day(
    date: NaiveDate,
    day_set: &[bool; 32],
    last_day: bool,
    second_last_day: bool,
) -> RepeatResult<bool> {
    if day_set[usize::try_from(date.day()).unwrap_or_default()] {
        return Ok(true);
    }
    if last_day && step_day(date)?.month() != date.month() {
        return Ok(true);
    }
    if second_last_day {
        let two_ahead = date
            .checked_add_days(Days::new(2))
            .ok_or_else(|| RepeatError::InvalidDate("date out of range".into()))?;
        if two_ahead.month() != date.month() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn step_day(date: NaiveDate) -> RepeatResult<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| RepeatError::InvalidDate("date out of range".into()))
}
