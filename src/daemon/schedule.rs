use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use cron::Schedule;
use std::str::FromStr;

/// First fire time strictly after `from`.
pub fn next_run_for<Tz: TimeZone>(expression: &str, from: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let schedule = parse(expression)?;
    schedule
        .after(from)
        .next()
        .ok_or_else(|| anyhow::anyhow!("No future occurrence for expression: {expression}"))
}

pub fn parse(expression: &str) -> Result<Schedule> {
    let normalized = normalize_expression(expression)?;
    Schedule::from_str(&normalized)
        .with_context(|| format!("Invalid cron expression: {expression}"))
}

fn normalize_expression(expression: &str) -> Result<String> {
    let expression = expression.trim();
    let field_count = expression.split_whitespace().count();

    match field_count {
        // standard crontab syntax: minute hour day month weekday
        5 => Ok(format!("0 {expression}")),
        // crate-native syntax includes seconds (+ optional year)
        6 | 7 => Ok(expression.to_string()),
        _ => anyhow::bail!(
            "Invalid cron expression: {expression} (expected 5, 6, or 7 fields, got {field_count})"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn five_field_expressions_get_a_seconds_column() {
        assert_eq!(normalize_expression("30 2 * * *").unwrap(), "0 30 2 * * *");
        assert_eq!(normalize_expression(" 0 0 2 * * * ").unwrap(), "0 0 2 * * *");
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = normalize_expression("* *").unwrap_err();
        assert!(err.to_string().contains("expected 5, 6, or 7 fields"));
    }

    #[test]
    fn next_run_is_after_from() {
        let from = Utc.with_ymd_and_hms(2019, 3, 15, 1, 0, 0).unwrap();
        let next = next_run_for("0 2 * * *", &from).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2019, 3, 15, 2, 0, 0).unwrap());

        let later = next_run_for("0 2 * * *", &next).unwrap();
        assert_eq!(later.hour(), 2);
        assert_eq!(later.date_naive().to_string(), "2019-03-16");
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse("a b c d e").is_err());
    }
}
