use super::ArchiveStrategy;
use crate::dates::{
    DateTimeOperation, DateTimeScope, end_of_day, previous_day_of_week_difference, start_of_day,
};
use crate::error::DateError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use serde::Serialize;
use std::fmt;

/// Closed `[start, end]` interval grouping files for one archive cycle.
///
/// `start` is always at `00:00:00.000` and `end` at `23:59:59.999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Build a window spanning whole days from `start`'s day to `end`'s day.
    pub fn from_days(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Cursor for the next, older window: one millisecond before `start`.
    pub fn next_cursor(&self) -> Result<NaiveDateTime, DateError> {
        DateTimeOperation::Add(-1).apply(self.start, DateTimeScope::Millisecond)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} .. {}]",
            self.start.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.end.format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

/// Computes successive, older calendar windows for one strategy.
#[derive(Debug, Clone, Copy)]
pub struct WindowGenerator {
    strategy: ArchiveStrategy,
    first_day_of_week: Weekday,
}

impl WindowGenerator {
    pub fn new(strategy: ArchiveStrategy, first_day_of_week: Weekday) -> Self {
        Self {
            strategy,
            first_day_of_week,
        }
    }

    pub fn strategy(&self) -> ArchiveStrategy {
        self.strategy
    }

    /// The most recent complete window that ends before `cursor`'s day.
    ///
    /// A cursor on the last millisecond of a day counts as the start of the
    /// following day, which is exactly what [`DateWindow::next_cursor`] yields,
    /// so feeding each window's cursor back in walks history without gaps.
    pub fn next_window(&self, cursor: NaiveDateTime) -> Result<DateWindow, DateError> {
        let anchor = cursor
            .checked_add_signed(TimeDelta::milliseconds(1))
            .unwrap_or(cursor)
            .date();

        let (start, end) = match self.strategy {
            ArchiveStrategy::Daily => {
                let end = shift_days(anchor, -1)?;
                (end, end)
            }
            ArchiveStrategy::Weekly => {
                let to_week_start =
                    previous_day_of_week_difference(self.first_day_of_week, anchor.weekday());
                let end = shift_days(anchor, to_week_start - 1)?;
                (shift_days(end, -6)?, end)
            }
            ArchiveStrategy::Monthly => {
                let first_of_month = anchor.with_day(1).ok_or(out_of_range(DateTimeScope::Day, 1))?;
                let end = shift_days(first_of_month, -1)?;
                let start = end.with_day(1).ok_or(out_of_range(DateTimeScope::Day, 1))?;
                (start, end)
            }
            ArchiveStrategy::Yearly => {
                let year = anchor.year() - 1;
                let start = NaiveDate::from_ymd_opt(year, 1, 1)
                    .ok_or(out_of_range(DateTimeScope::Year, i64::from(year)))?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)
                    .ok_or(out_of_range(DateTimeScope::Year, i64::from(year)))?;
                (start, end)
            }
            ArchiveStrategy::Unknown => {
                return Err(DateError::InvalidArgument(
                    "archive strategy is unknown".into(),
                ));
            }
        };

        Ok(DateWindow::from_days(
            start.and_time(chrono::NaiveTime::MIN),
            end.and_time(chrono::NaiveTime::MIN),
        ))
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DateError> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or(out_of_range(DateTimeScope::Day, days))
}

fn out_of_range(scope: DateTimeScope, value: i64) -> DateError {
    DateError::OutOfRange { scope, value }
}
