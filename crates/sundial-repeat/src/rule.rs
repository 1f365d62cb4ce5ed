//! Parser for the repeat-rule mini-language.
//!
//! A spec string is a type letter followed by up to two parameter tokens:
//!
//! | Form              | Meaning                                        |
//! |-------------------|------------------------------------------------|
//! | `d N`             | every N days, `1 <= N <= 400`                  |
//! | `y`               | every year                                     |
//! | `w D1,D2,...`     | on given weekdays, 1 = Monday .. 7 = Sunday    |
//! | `m D,... [M,...]` | on given days of month, optionally per month   |
//!
//! Monthly days may be the sentinels `-1` (last day of the month) and `-2`
//! (second-to-last day). An absent month list means every month.

use std::fmt;

use crate::error::{RepeatError, RepeatResult};

/// Upper bound for the daily interval.
pub const MAX_DAILY_INTERVAL: u16 = 400;

/// One entry of a monthly day list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDay {
    /// A literal day of the month, `1..=31`.
    Day(u8),
    /// The last day of the month (`-1` in the spec language).
    Last,
    /// The second-to-last day of the month (`-2` in the spec language).
    SecondToLast,
}

/// A validated recurrence rule, one variant per grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatRule {
    Daily { every: u16 },
    Weekly { weekdays: Vec<u8> },
    Monthly { days: Vec<MonthDay>, months: Vec<u8> },
    Yearly,
}

impl RepeatRule {
    /// ## Summary
    /// Parses and validates a repeat spec string.
    ///
    /// ## Errors
    /// Returns [`RepeatError::InvalidRule`] if the spec is empty, the type
    /// letter is unknown, the parameter count is wrong for the type, or any
    /// list element fails its range check.
    pub fn parse(spec: &str) -> RepeatResult<Self> {
        let mut tokens = spec.split_whitespace();

        let Some(kind) = tokens.next() else {
            return Err(RepeatError::InvalidRule("repeat is empty".into()));
        };
        let params: Vec<&str> = tokens.collect();

        match kind {
            "d" => parse_daily(&params),
            "y" => parse_yearly(&params),
            "w" => parse_weekly(&params),
            "m" => parse_monthly(&params),
            other => Err(RepeatError::InvalidRule(format!(
                "unknown repeat type {other:?}"
            ))),
        }
    }
}

fn parse_daily(params: &[&str]) -> RepeatResult<RepeatRule> {
    let [interval] = params else {
        return Err(RepeatError::InvalidRule(
            "daily repeat takes exactly one parameter".into(),
        ));
    };

    let every: u16 = parse_int(interval)?;
    if !(1..=MAX_DAILY_INTERVAL).contains(&every) {
        return Err(RepeatError::InvalidRule(format!(
            "daily interval out of range: {every}"
        )));
    }

    Ok(RepeatRule::Daily { every })
}

fn parse_yearly(params: &[&str]) -> RepeatResult<RepeatRule> {
    if params.is_empty() {
        Ok(RepeatRule::Yearly)
    } else {
        Err(RepeatError::InvalidRule(
            "yearly repeat takes no parameters".into(),
        ))
    }
}

fn parse_weekly(params: &[&str]) -> RepeatResult<RepeatRule> {
    let [list] = params else {
        return Err(RepeatError::InvalidRule(
            "weekly repeat takes exactly one parameter".into(),
        ));
    };

    let items = split_list(list)?;
    if items.len() > 7 {
        return Err(RepeatError::InvalidRule(format!(
            "too many weekdays: {}",
            items.len()
        )));
    }

    let mut weekdays = Vec::with_capacity(items.len());
    for item in items {
        let day: u8 = parse_int(item)?;
        if !(1..=7).contains(&day) {
            return Err(RepeatError::InvalidRule(format!(
                "weekday out of range: {day}"
            )));
        }
        weekdays.push(day);
    }

    Ok(RepeatRule::Weekly { weekdays })
}

fn parse_monthly(params: &[&str]) -> RepeatResult<RepeatRule> {
    let (day_list, month_list) = match params {
        [days] => (*days, None),
        [days, months] => (*days, Some(*months)),
        _ => {
            return Err(RepeatError::InvalidRule(
                "monthly repeat takes one or two parameters".into(),
            ));
        }
    };

    let items = split_list(day_list)?;
    if items.len() > 31 {
        return Err(RepeatError::InvalidRule(format!(
            "too many month days: {}",
            items.len()
        )));
    }

    let mut days = Vec::with_capacity(items.len());
    for item in items {
        days.push(parse_month_day(item)?);
    }

    let mut months = Vec::new();
    if let Some(list) = month_list {
        let items = split_list(list)?;
        if items.len() > 12 {
            return Err(RepeatError::InvalidRule(format!(
                "too many months: {}",
                items.len()
            )));
        }
        for item in items {
            let month: u8 = parse_int(item)?;
            if !(1..=12).contains(&month) {
                return Err(RepeatError::InvalidRule(format!(
                    "month out of range: {month}"
                )));
            }
            months.push(month);
        }
    }

    Ok(RepeatRule::Monthly { days, months })
}

fn parse_month_day(item: &str) -> RepeatResult<MonthDay> {
    match parse_int::<i8>(item)? {
        -1 => Ok(MonthDay::Last),
        -2 => Ok(MonthDay::SecondToLast),
        day @ 1..=31 => Ok(MonthDay::Day(day.unsigned_abs())),
        other => Err(RepeatError::InvalidRule(format!(
            "month day out of range: {other}"
        ))),
    }
}

/// Splits a comma-separated parameter, rejecting empty items (`"1,,2"`).
fn split_list(list: &str) -> RepeatResult<Vec<&str>> {
    let items: Vec<&str> = list.split(',').map(str::trim).collect();
    if items.iter().any(|item| item.is_empty()) {
        return Err(RepeatError::InvalidRule(format!(
            "empty list item in {list:?}"
        )));
    }
    Ok(items)
}

fn parse_int<T: std::str::FromStr>(item: &str) -> RepeatResult<T> {
    item.parse::<T>()
        .map_err(|_| RepeatError::InvalidRule(format!("not a number: {item:?}")))
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{day}"),
            Self::Last => f.write_str("-1"),
            Self::SecondToLast => f.write_str("-2"),
        }
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { every } => write!(f, "d {every}"),
            Self::Yearly => f.write_str("y"),
            Self::Weekly { weekdays } => {
                f.write_str("w ")?;
                write_joined(f, weekdays)
            }
            Self::Monthly { days, months } => {
                f.write_str("m ")?;
                write_joined(f, days)?;
                if !months.is_empty() {
                    f.write_str(" ")?;
                    write_joined(f, months)?;
                }
                Ok(())
            }
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
