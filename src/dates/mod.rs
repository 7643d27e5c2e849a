//! Date arithmetic: symbolic parameters (`"Last"`, `"NextMonday"`, `"-3"`)
//! resolved into operations against a reference instant, plus the custom
//! pattern formatter used for placeholder rendering.
//!
//! All instants are naive local times; the process time zone decides what
//! "today" means.

pub mod distance;
mod format;
mod operation;
mod parameter;
mod parameters;
mod resolver;
mod scope;

pub use distance::{
    next_day_of_week_difference, next_month_difference, previous_day_of_week_difference,
    previous_month_difference,
};
pub use format::format_date;
pub use operation::DateTimeOperation;
pub use parameter::SymbolicParameter;
pub use parameters::DateParameters;
pub use resolver::{resolve, resolve_and_apply};
pub use scope::{DateTimeScope, days_in_month};

use chrono::{Local, NaiveDateTime, NaiveTime};

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// `instant` truncated to `00:00:00.000`.
pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// `instant` moved to `23:59:59.999` of the same day.
pub fn end_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .map_or(instant, |time| instant.date().and_time(time))
}
