use super::{DateTimeScope, resolve};
use crate::error::DateError;
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// One optional symbolic value per date component.
///
/// ```toml
/// year = "Previous"
/// month = "Last"
/// day = "Last"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateParameters {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub second: Option<String>,
    pub millisecond: Option<String>,
}

impl DateParameters {
    pub fn get(&self, scope: DateTimeScope) -> Option<&str> {
        let value = match scope {
            DateTimeScope::Year => &self.year,
            DateTimeScope::Month => &self.month,
            DateTimeScope::Day => &self.day,
            DateTimeScope::Hour => &self.hour,
            DateTimeScope::Minute => &self.minute,
            DateTimeScope::Second => &self.second,
            DateTimeScope::Millisecond => &self.millisecond,
        };
        value.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        DateTimeScope::ALL
            .iter()
            .all(|scope| self.get(*scope).is_none_or(|v| v.trim().is_empty()))
    }

    /// Adjust `reference` by every configured component, Year first.
    ///
    /// Each component is resolved against the instant produced by the previous
    /// one, so `month = "February"` followed by `day = "Last"` lands on Feb 28/29.
    pub fn apply(
        &self,
        reference: NaiveDateTime,
        first_day_of_week: Weekday,
    ) -> Result<NaiveDateTime, DateError> {
        DateTimeScope::ALL
            .iter()
            .try_fold(reference, |current, &scope| {
                let raw = self.get(scope).unwrap_or_default();
                resolve(raw, scope, first_day_of_week, current)?.apply(current, scope)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_parameters_leave_reference_untouched() {
        let params = DateParameters::default();
        assert!(params.is_empty());
        assert_eq!(
            params.apply(at(2019, 3, 15, 8), Weekday::Mon).unwrap(),
            at(2019, 3, 15, 8)
        );
    }

    #[test]
    fn components_apply_coarsest_first() {
        let params = DateParameters {
            month: Some("February".into()),
            day: Some("Last".into()),
            hour: Some("First".into()),
            ..DateParameters::default()
        };
        assert!(!params.is_empty());
        assert_eq!(
            params.apply(at(2020, 7, 31, 8), Weekday::Mon).unwrap(),
            at(2020, 2, 29, 0)
        );
    }

    #[test]
    fn previous_month_end() {
        let params = DateParameters {
            month: Some("Previous".into()),
            day: Some("Last".into()),
            ..DateParameters::default()
        };
        assert_eq!(
            params.apply(at(2019, 3, 15, 8), Weekday::Mon).unwrap(),
            at(2019, 2, 28, 8)
        );
    }

    #[test]
    fn errors_propagate() {
        let params = DateParameters {
            day: Some("Someday".into()),
            ..DateParameters::default()
        };
        assert!(params.apply(at(2019, 3, 15, 8), Weekday::Mon).is_err());
    }

    #[test]
    fn deserializes_from_toml() {
        let params: DateParameters = toml::from_str("year = \"Previous\"\nday = \"1\"").unwrap();
        assert_eq!(params.get(DateTimeScope::Year), Some("Previous"));
        assert_eq!(params.get(DateTimeScope::Day), Some("1"));
        assert_eq!(params.get(DateTimeScope::Month), None);
    }
}
