use super::distance::{
    day_of_week_difference, next_day_of_week_difference, next_month_difference,
    previous_day_of_week_difference, previous_month_difference,
};
use super::{DateTimeOperation, DateTimeScope, SymbolicParameter};
use crate::error::DateError;
use chrono::{Datelike, NaiveDateTime, Weekday};

/// Resolve a symbolic `parameter` for `scope` against `reference`.
///
/// The returned operation is not applied; see [`DateTimeOperation::apply`].
pub fn resolve(
    parameter: &str,
    scope: DateTimeScope,
    first_day_of_week: Weekday,
    reference: NaiveDateTime,
) -> Result<DateTimeOperation, DateError> {
    let operation = match SymbolicParameter::parse(parameter, scope)? {
        SymbolicParameter::Empty => DateTimeOperation::None,
        SymbolicParameter::SignedInteger(delta) => DateTimeOperation::Add(delta),
        SymbolicParameter::Integer(value) => DateTimeOperation::SetValue(value),
        SymbolicParameter::Previous => DateTimeOperation::Add(-1),
        SymbolicParameter::Next => DateTimeOperation::Add(1),
        SymbolicParameter::First => DateTimeOperation::SetValue(scope.min_value()),
        SymbolicParameter::Last => DateTimeOperation::SetValue(scope.max_value(reference)),
        SymbolicParameter::NamedMonth(month) => {
            DateTimeOperation::SetValue(i64::from(month.number_from_month()))
        }
        SymbolicParameter::NextMonth(month) => DateTimeOperation::Add(next_month_difference(
            month.number_from_month(),
            reference.month(),
        )),
        SymbolicParameter::PreviousMonth(month) => DateTimeOperation::Add(
            previous_month_difference(month.number_from_month(), reference.month()),
        ),
        SymbolicParameter::NamedWeekday(day) => DateTimeOperation::Add(day_of_week_difference(
            day,
            reference.weekday(),
            first_day_of_week,
        )),
        SymbolicParameter::NextWeekday(day) => {
            DateTimeOperation::Add(next_day_of_week_difference(day, reference.weekday()))
        }
        SymbolicParameter::PreviousWeekday(day) => {
            DateTimeOperation::Add(previous_day_of_week_difference(day, reference.weekday()))
        }
    };
    Ok(operation)
}

/// Resolve `parameter` and apply it to `reference` in one step.
pub fn resolve_and_apply(
    parameter: &str,
    scope: DateTimeScope,
    first_day_of_week: Weekday,
    reference: NaiveDateTime,
) -> Result<NaiveDateTime, DateError> {
    resolve(parameter, scope, first_day_of_week, reference)?.apply(reference, scope)
}
