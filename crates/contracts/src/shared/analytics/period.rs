use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month used as the period key of every record.
///
/// Ordering is chronological (year, then month). Serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

/// Error returned when a period string cannot be interpreted as a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid period '{}': expected YYYY-MM or YYYY-MM-DD", self.0)
    }
}

impl std::error::Error for PeriodParseError {}

impl Period {
    /// Returns `None` for a month outside 1..=12 or a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Parse `"2025-10"`, `"2025-10-01"` or `"2025-10-01T00:00:00Z"`.
    pub fn parse(input: &str) -> Result<Self, PeriodParseError> {
        let err = || PeriodParseError(input.to_string());
        let date_part = input.trim().split('T').next().unwrap_or_default();
        let parts: Vec<&str> = date_part.split('-').collect();

        if parts.len() < 2 || parts.len() > 3 || parts[0].len() != 4 {
            return Err(err());
        }

        let year: i32 = parts[0].parse().map_err(|_| err())?;
        let month: u32 = parts[1].parse().map_err(|_| err())?;

        if let Some(day) = parts.get(2) {
            let day: u32 = day.parse().map_err(|_| err())?;
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)?;
            return Ok(Self::from_date(date));
        }

        Self::new(year, month).ok_or_else(err)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first)
    }

    /// Actual calendar length of the month (28..=31).
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = Period::new(2025, 10).unwrap();
        assert_eq!(Period::parse("2025-10").unwrap(), expected);
        assert_eq!(Period::parse("2025-10-01").unwrap(), expected);
        assert_eq!(Period::parse("2025-10-01T00:00:00Z").unwrap(), expected);
        assert_eq!(Period::parse(" 2025-10 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Period::parse("").is_err());
        assert!(Period::parse("2025").is_err());
        assert!(Period::parse("2025-13").is_err());
        assert!(Period::parse("2025-02-30").is_err());
        assert!(Period::parse("25-10").is_err());
        assert!(Period::parse("october").is_err());
    }

    #[test]
    fn test_chronological_order() {
        let mut periods = vec![
            Period::parse("2025-01").unwrap(),
            Period::parse("2024-12").unwrap(),
            Period::parse("2024-02").unwrap(),
        ];
        periods.sort();
        let labels: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["2024-02", "2024-12", "2025-01"]);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(Period::parse("2024-02").unwrap().days_in_month(), 29);
        assert_eq!(Period::parse("2025-02").unwrap().days_in_month(), 28);
        assert_eq!(Period::parse("1900-02").unwrap().days_in_month(), 28);
        assert_eq!(Period::parse("2025-04").unwrap().days_in_month(), 30);
        assert_eq!(Period::parse("2025-12").unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_serde_as_string() {
        let period = Period::parse("2025-09").unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2025-09\"");
        let back: Period = serde_json::from_str("\"2025-09-01\"").unwrap();
        assert_eq!(back, period);
        assert!(serde_json::from_str::<Period>("\"bad\"").is_err());
    }
}
