use super::DateTimeScope;
use crate::error::DateError;
use chrono::{Datelike, Months, NaiveDateTime, TimeDelta, Timelike};

/// Result of resolving one symbolic parameter against one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeOperation {
    None,
    SetValue(i64),
    Add(i64),
}

impl DateTimeOperation {
    /// Apply the operation to the `scope` component of `instant`.
    ///
    /// `SetValue` replaces only that component; `Add` uses calendar-aware
    /// addition. Month and year addition clamp the day of month to the last
    /// day of the target month (Jan 31 + 1 month = Feb 28/29).
    pub fn apply(
        self,
        instant: NaiveDateTime,
        scope: DateTimeScope,
    ) -> Result<NaiveDateTime, DateError> {
        match self {
            Self::None => Ok(instant),
            Self::SetValue(value) => set_component(instant, scope, value),
            Self::Add(delta) => add_units(instant, scope, delta),
        }
    }
}

fn set_component(
    instant: NaiveDateTime,
    scope: DateTimeScope,
    value: i64,
) -> Result<NaiveDateTime, DateError> {
    let out_of_range = || DateError::OutOfRange { scope, value };
    let small = |v: i64| u32::try_from(v).map_err(|_| out_of_range());

    let updated = match scope {
        DateTimeScope::Year => {
            let year = i32::try_from(value).map_err(|_| out_of_range())?;
            instant.with_year(year)
        }
        DateTimeScope::Month => instant.with_month(small(value)?),
        DateTimeScope::Day => instant.with_day(small(value)?),
        DateTimeScope::Hour => instant.with_hour(small(value)?),
        DateTimeScope::Minute => instant.with_minute(small(value)?),
        DateTimeScope::Second => instant.with_second(small(value)?),
        DateTimeScope::Millisecond => {
            let millis = small(value)?;
            if millis > 999 {
                return Err(out_of_range());
            }
            instant.with_nanosecond(millis * 1_000_000)
        }
    };

    updated.ok_or_else(out_of_range)
}

fn add_units(
    instant: NaiveDateTime,
    scope: DateTimeScope,
    delta: i64,
) -> Result<NaiveDateTime, DateError> {
    let out_of_range = || DateError::OutOfRange {
        scope,
        value: delta,
    };

    let updated = match scope {
        DateTimeScope::Year => delta
            .checked_mul(12)
            .and_then(|months| add_months(instant, months)),
        DateTimeScope::Month => add_months(instant, delta),
        DateTimeScope::Day => {
            TimeDelta::try_days(delta).and_then(|d| instant.checked_add_signed(d))
        }
        DateTimeScope::Hour => {
            TimeDelta::try_hours(delta).and_then(|d| instant.checked_add_signed(d))
        }
        DateTimeScope::Minute => {
            TimeDelta::try_minutes(delta).and_then(|d| instant.checked_add_signed(d))
        }
        DateTimeScope::Second => {
            TimeDelta::try_seconds(delta).and_then(|d| instant.checked_add_signed(d))
        }
        DateTimeScope::Millisecond => {
            TimeDelta::try_milliseconds(delta).and_then(|d| instant.checked_add_signed(d))
        }
    };

    updated.ok_or_else(out_of_range)
}

fn add_months(instant: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        instant.checked_add_months(Months::new(magnitude))
    } else {
        instant.checked_sub_months(Months::new(magnitude))
    }
}
