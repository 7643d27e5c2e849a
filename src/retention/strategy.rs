use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Calendar granularity used to size archive windows.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ArchiveStrategy {
    /// Placeholder for a missing or unrecognised value; never valid.
    #[default]
    Unknown,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ArchiveStrategy {
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl From<String> for ArchiveStrategy {
    fn from(value: String) -> Self {
        Self::from_str(value.trim()).unwrap_or(Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        strategy: ArchiveStrategy,
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(ArchiveStrategy::from("Monthly".to_string()), ArchiveStrategy::Monthly);
        assert_eq!(ArchiveStrategy::from("WEEKLY".to_string()), ArchiveStrategy::Weekly);
        assert_eq!(ArchiveStrategy::from(" daily ".to_string()), ArchiveStrategy::Daily);
    }

    #[test]
    fn unrecognised_text_becomes_unknown() {
        let holder: Holder = toml::from_str("strategy = \"hourly\"").unwrap();
        assert_eq!(holder.strategy, ArchiveStrategy::Unknown);
        assert!(!holder.strategy.is_known());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(ArchiveStrategy::Yearly.to_string(), "yearly");
    }
}
