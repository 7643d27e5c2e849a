//! Circular distances between months and weekdays.
//!
//! "Next" never accepts a distance of zero: asking for the next March in March
//! yields twelve months ahead. "Previous" does accept zero: the previous Monday
//! on a Monday is today. Callers depend on this asymmetry.

use chrono::Weekday;

const MONTHS_PER_YEAR: i64 = 12;
const DAYS_PER_WEEK: i64 = 7;

/// Months to add to reach the next occurrence of `target` (1-12) from `current`.
pub fn next_month_difference(target: u32, current: u32) -> i64 {
    next_distance(i64::from(target) - i64::from(current), MONTHS_PER_YEAR)
}

/// Months to add (non-positive) to reach the previous occurrence of `target`.
pub fn previous_month_difference(target: u32, current: u32) -> i64 {
    previous_distance(i64::from(target) - i64::from(current), MONTHS_PER_YEAR)
}

/// Days to add to reach the next `target` weekday from `current`.
pub fn next_day_of_week_difference(target: Weekday, current: Weekday) -> i64 {
    next_distance(weekday_distance(target, current), DAYS_PER_WEEK)
}

/// Days to add (non-positive) to reach the previous `target` weekday.
pub fn previous_day_of_week_difference(target: Weekday, current: Weekday) -> i64 {
    previous_distance(weekday_distance(target, current), DAYS_PER_WEEK)
}

/// Days to add to reach `target` for a bare weekday name.
///
/// Starts from the raw ordinal distance (Sunday = 0) and adds a week when the
/// first day of the week sorts after `current`.
pub fn day_of_week_difference(
    target: Weekday,
    current: Weekday,
    first_day_of_week: Weekday,
) -> i64 {
    let mut distance = weekday_distance(target, current);
    if ordinal(first_day_of_week) > ordinal(current) {
        distance += DAYS_PER_WEEK;
    }
    distance
}

/// Sunday = 0 .. Saturday = 6.
pub fn ordinal(day: Weekday) -> i64 {
    i64::from(day.num_days_from_sunday())
}

fn weekday_distance(target: Weekday, current: Weekday) -> i64 {
    ordinal(target) - ordinal(current)
}

fn next_distance(distance: i64, period: i64) -> i64 {
    if distance <= 0 { distance + period } else { distance }
}

fn previous_distance(distance: i64, period: i64) -> i64 {
    if distance > 0 { distance - period } else { distance }
}
