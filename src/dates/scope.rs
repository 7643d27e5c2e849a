use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Unit of a date component being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DateTimeScope {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DateTimeScope {
    /// Every scope, coarsest first. Adjustments are always applied in this order.
    pub const ALL: [Self; 7] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    /// Smallest value the component can be set to.
    pub fn min_value(self) -> i64 {
        match self {
            Self::Year => i64::from(NaiveDate::MIN.year()),
            Self::Month | Self::Day => 1,
            Self::Hour | Self::Minute | Self::Second | Self::Millisecond => 0,
        }
    }

    /// Largest value the component can be set to. `Day` depends on the month
    /// of `reference`.
    pub fn max_value(self, reference: NaiveDateTime) -> i64 {
        match self {
            Self::Year => i64::from(NaiveDate::MAX.year()),
            Self::Month => 12,
            Self::Day => i64::from(days_in_month(reference.date())),
            Self::Hour => 23,
            Self::Minute | Self::Second => 59,
            Self::Millisecond => 999,
        }
    }
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(at(2019, 2, 10).date()), 28);
        assert_eq!(days_in_month(at(2020, 2, 10).date()), 29);
        assert_eq!(days_in_month(at(2019, 12, 31).date()), 31);
        assert_eq!(days_in_month(at(2019, 4, 1).date()), 30);
    }

    #[test]
    fn day_maximum_follows_reference_month() {
        assert_eq!(DateTimeScope::Day.max_value(at(2019, 2, 1)), 28);
        assert_eq!(DateTimeScope::Day.max_value(at(2019, 7, 1)), 31);
    }

    #[test]
    fn scope_displays_lowercase() {
        assert_eq!(DateTimeScope::Millisecond.to_string(), "millisecond");
    }
}
