use crate::dates::{DateParameters, DateTimeOperation, DateTimeScope, format_date, start_of_day};
use crate::error::DateError;
use crate::template;
use chrono::{NaiveDateTime, Weekday};

/// How far back from today scanning starts, one symbolic magnitude per scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionDateParameters {
    pub values: DateParameters,
    pub first_day_of_week: Weekday,
}

impl RetentionDateParameters {
    pub fn new(values: DateParameters, first_day_of_week: Weekday) -> Self {
        Self {
            values,
            first_day_of_week,
        }
    }

    /// Today (date only) moved back by every configured magnitude, Year first.
    pub fn initial_cursor(&self, now: NaiveDateTime) -> Result<NaiveDateTime, DateError> {
        DateTimeScope::ALL
            .iter()
            .try_fold(start_of_day(now), |cursor, &scope| {
                let raw = self.values.get(scope).unwrap_or_default();
                let offset = retention_offset(raw, scope, now)?;
                DateTimeOperation::Add(offset).apply(cursor, scope)
            })
    }
}

/// Non-positive delta for one retention value.
///
/// `{Date:fmt}` / `{Now:fmt}` / `{Timestamp:fmt}` placeholders are rendered from
/// `now` first. Then: blank is 0, `N` is `-N`, `Last` and `Previous` are -1.
/// Negative magnitudes are rejected.
pub fn retention_offset(
    raw: &str,
    scope: DateTimeScope,
    now: NaiveDateTime,
) -> Result<i64, DateError> {
    let rendered = template::evaluate(raw, |token| match token.name.as_str() {
        "Date" | "Now" => format_date(now, token.format.as_deref().unwrap_or("yyyyMMdd")),
        "Timestamp" => format_date(now, token.format.as_deref().unwrap_or("yyyyMMddHHmmss")),
        _ => String::new(),
    });
    let text = rendered.trim();

    if text.is_empty() {
        return Ok(0);
    }
    if text.eq_ignore_ascii_case("last") || text.eq_ignore_ascii_case("previous") {
        return Ok(-1);
    }

    let unsigned = text.strip_prefix('+').unwrap_or(text);
    if let Some(magnitude) = text.strip_prefix('-')
        && !magnitude.is_empty()
        && magnitude.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(DateError::InvalidArgument(format!(
            "{scope} retention must not be negative (got '{raw}')"
        )));
    }
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        let magnitude = unsigned
            .parse::<i64>()
            .map_err(|e| DateError::InvalidArgument(format!("{scope} retention '{raw}': {e}")))?;
        return Ok(-magnitude);
    }

    Err(DateError::UnsupportedOperation {
        scope,
        parameter: raw.to_string(),
    })
}
