use super::DateTimeScope;
use crate::error::DateError;
use chrono::{Month, Weekday};
use std::str::FromStr;

/// A symbolic date parameter such as `"-3"`, `"Last"` or `"NextMonday"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolicParameter {
    Empty,
    SignedInteger(i64),
    Integer(i64),
    Previous,
    Next,
    First,
    Last,
    NamedMonth(Month),
    NamedWeekday(Weekday),
    NextMonth(Month),
    PreviousMonth(Month),
    NextWeekday(Weekday),
    PreviousWeekday(Weekday),
}

type Rule = fn(&str, DateTimeScope) -> Option<Result<SymbolicParameter, DateError>>;

/// Tried in order; the first rule that recognises the text wins.
const RULES: &[Rule] = &[
    empty,
    signed_integer,
    integer,
    keyword,
    named_month,
    named_weekday,
];

impl SymbolicParameter {
    /// Parse `raw` for `scope`.
    ///
    /// Month names are only recognised for [`DateTimeScope::Month`] and weekday
    /// names only for [`DateTimeScope::Day`]; anything unrecognised is an
    /// [`DateError::UnsupportedOperation`].
    pub fn parse(raw: &str, scope: DateTimeScope) -> Result<Self, DateError> {
        let text = raw.trim();
        RULES
            .iter()
            .find_map(|rule| rule(text, scope))
            .unwrap_or_else(|| {
                Err(DateError::UnsupportedOperation {
                    scope,
                    parameter: raw.to_string(),
                })
            })
    }
}

fn empty(text: &str, _scope: DateTimeScope) -> Option<Result<SymbolicParameter, DateError>> {
    text.is_empty().then_some(Ok(SymbolicParameter::Empty))
}

fn signed_integer(
    text: &str,
    _scope: DateTimeScope,
) -> Option<Result<SymbolicParameter, DateError>> {
    let digits = text.strip_prefix('+').or_else(|| text.strip_prefix('-'))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Err(DateError::InvalidArgument(format!(
            "'{text}' is not a signed integer"
        ))));
    }
    Some(
        text.parse::<i64>()
            .map(SymbolicParameter::SignedInteger)
            .map_err(|e| DateError::InvalidArgument(format!("'{text}': {e}"))),
    )
}

fn integer(text: &str, _scope: DateTimeScope) -> Option<Result<SymbolicParameter, DateError>> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(
        text.parse::<i64>()
            .map(SymbolicParameter::Integer)
            .map_err(|e| DateError::InvalidArgument(format!("'{text}': {e}"))),
    )
}

fn keyword(text: &str, _scope: DateTimeScope) -> Option<Result<SymbolicParameter, DateError>> {
    let parsed = if text.eq_ignore_ascii_case("previous") {
        SymbolicParameter::Previous
    } else if text.eq_ignore_ascii_case("next") {
        SymbolicParameter::Next
    } else if text.eq_ignore_ascii_case("first") {
        SymbolicParameter::First
    } else if text.eq_ignore_ascii_case("last") {
        SymbolicParameter::Last
    } else {
        return None;
    };
    Some(Ok(parsed))
}

fn named_month(text: &str, scope: DateTimeScope) -> Option<Result<SymbolicParameter, DateError>> {
    if scope != DateTimeScope::Month {
        return None;
    }
    let parsed = if let Some(rest) = strip_prefix_ignore_case(text, "next") {
        SymbolicParameter::NextMonth(Month::from_str(rest).ok()?)
    } else if let Some(rest) = strip_prefix_ignore_case(text, "previous") {
        SymbolicParameter::PreviousMonth(Month::from_str(rest).ok()?)
    } else {
        SymbolicParameter::NamedMonth(Month::from_str(text).ok()?)
    };
    Some(Ok(parsed))
}

fn named_weekday(
    text: &str,
    scope: DateTimeScope,
) -> Option<Result<SymbolicParameter, DateError>> {
    if scope != DateTimeScope::Day {
        return None;
    }
    let parsed = if let Some(rest) = strip_prefix_ignore_case(text, "next") {
        SymbolicParameter::NextWeekday(Weekday::from_str(rest).ok()?)
    } else if let Some(rest) = strip_prefix_ignore_case(text, "previous") {
        SymbolicParameter::PreviousWeekday(Weekday::from_str(rest).ok()?)
    } else {
        SymbolicParameter::NamedWeekday(Weekday::from_str(text).ok()?)
    };
    Some(Ok(parsed))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str, scope: DateTimeScope) -> SymbolicParameter {
        SymbolicParameter::parse(raw, scope).unwrap()
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(parse("", DateTimeScope::Day), SymbolicParameter::Empty);
        assert_eq!(parse("   ", DateTimeScope::Year), SymbolicParameter::Empty);
    }

    #[test]
    fn sign_decides_between_add_and_set() {
        assert_eq!(
            parse("+3", DateTimeScope::Day),
            SymbolicParameter::SignedInteger(3)
        );
        assert_eq!(
            parse("-12", DateTimeScope::Month),
            SymbolicParameter::SignedInteger(-12)
        );
        assert_eq!(
            parse("2019", DateTimeScope::Year),
            SymbolicParameter::Integer(2019)
        );
    }

    #[test]
    fn malformed_signed_integer_is_invalid_argument() {
        for raw in ["+", "-", "+x", "-3a", "--1"] {
            let err = SymbolicParameter::parse(raw, DateTimeScope::Day).unwrap_err();
            assert!(
                matches!(err, DateError::InvalidArgument(_)),
                "{raw} should be an invalid argument"
            );
        }
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse("LAST", DateTimeScope::Hour), SymbolicParameter::Last);
        assert_eq!(parse("first", DateTimeScope::Hour), SymbolicParameter::First);
        assert_eq!(parse("Next", DateTimeScope::Hour), SymbolicParameter::Next);
        assert_eq!(
            parse("previous", DateTimeScope::Hour),
            SymbolicParameter::Previous
        );
    }

    #[test]
    fn month_names_only_in_month_scope() {
        assert_eq!(
            parse("March", DateTimeScope::Month),
            SymbolicParameter::NamedMonth(Month::March)
        );
        assert_eq!(
            parse("NextJanuary", DateTimeScope::Month),
            SymbolicParameter::NextMonth(Month::January)
        );
        assert_eq!(
            parse("previousdecember", DateTimeScope::Month),
            SymbolicParameter::PreviousMonth(Month::December)
        );
        let err = SymbolicParameter::parse("March", DateTimeScope::Day).unwrap_err();
        assert!(matches!(
            err,
            DateError::UnsupportedOperation {
                scope: DateTimeScope::Day,
                ..
            }
        ));
    }

    #[test]
    fn weekday_names_only_in_day_scope() {
        assert_eq!(
            parse("Monday", DateTimeScope::Day),
            SymbolicParameter::NamedWeekday(Weekday::Mon)
        );
        assert_eq!(
            parse("NextFriday", DateTimeScope::Day),
            SymbolicParameter::NextWeekday(Weekday::Fri)
        );
        assert_eq!(
            parse("PreviousSunday", DateTimeScope::Day),
            SymbolicParameter::PreviousWeekday(Weekday::Sun)
        );
        assert!(SymbolicParameter::parse("Monday", DateTimeScope::Month).is_err());
    }

    #[test]
    fn unknown_text_reports_literal_parameter() {
        let err = SymbolicParameter::parse("Someday", DateTimeScope::Day).unwrap_err();
        match err {
            DateError::UnsupportedOperation { scope, parameter } => {
                assert_eq!(scope, DateTimeScope::Day);
                assert_eq!(parameter, "Someday");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(SymbolicParameter::parse("NextSomeday", DateTimeScope::Day).is_err());
    }
}
