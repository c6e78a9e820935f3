//! Salary month and date window models.
//!
//! This module contains the [`SalaryMonth`] and [`DateWindow`] types used to
//! select the lessons a calculation runs over.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month that salaries are generated for.
///
/// Serialized as `"YYYY-MM"`.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::models::SalaryMonth;
/// use chrono::NaiveDate;
///
/// let month: SalaryMonth = "2026-02".parse().unwrap();
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert_eq!(month.to_string(), "2026-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SalaryMonth {
    first_day: NaiveDate,
}

impl SalaryMonth {
    /// Creates a salary month from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| EngineError::InvalidMonth {
                value: format!("{:04}-{:02}", year, month),
            })
    }

    /// Returns the month that contains the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The year of the month.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The 1-based month number.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks if a date falls within this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl fmt::Display for SalaryMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for SalaryMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for SalaryMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SalaryMonth> for String {
    fn from(month: SalaryMonth) -> Self {
        month.to_string()
    }
}

/// An inclusive date range with optional bounds.
///
/// A missing bound leaves that side of the window open.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::models::DateWindow;
/// use chrono::NaiveDate;
///
/// let window = DateWindow {
///     from: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
///     to: None,
/// };
/// assert!(window.contains_date(NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()));
/// assert!(!window.contains_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First included day.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last included day.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// A window without bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Checks if a date falls within this window (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

impl From<SalaryMonth> for DateWindow {
    fn from(month: SalaryMonth) -> Self {
        Self {
            from: Some(month.first_day()),
            to: Some(month.last_day()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_month() {
        let month: SalaryMonth = "2026-01".parse().unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 1);
    }

    #[test]
    fn test_parse_rejects_month_13() {
        match "2026-13".parse::<SalaryMonth>() {
            Err(EngineError::InvalidMonth { value }) => assert_eq!(value, "2026-13"),
            other => panic!("Expected InvalidMonth error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!("2026".parse::<SalaryMonth>().is_err());
        assert!("2026-1".parse::<SalaryMonth>().is_err());
        assert!("26-01".parse::<SalaryMonth>().is_err());
        assert!("2026-ab".parse::<SalaryMonth>().is_err());
        assert!("2026-01-15".parse::<SalaryMonth>().is_err());
    }

    #[test]
    fn test_parse_rejects_signed_parts() {
        assert!("+026-01".parse::<SalaryMonth>().is_err());
        assert!("-026-01".parse::<SalaryMonth>().is_err());
        assert!("2026-+1".parse::<SalaryMonth>().is_err());
    }

    #[test]
    fn test_last_day_handles_leap_year() {
        let month = SalaryMonth::new(2028, 2).unwrap();
        assert_eq!(month.last_day(), date(2028, 2, 29));
    }

    #[test]
    fn test_last_day_of_december() {
        let month = SalaryMonth::new(2026, 12).unwrap();
        assert_eq!(month.last_day(), date(2026, 12, 31));
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let month = SalaryMonth::new(2026, 1).unwrap();
        assert!(month.contains_date(date(2026, 1, 1)));
        assert!(month.contains_date(date(2026, 1, 31)));
        assert!(!month.contains_date(date(2025, 12, 31)));
        assert!(!month.contains_date(date(2026, 2, 1)));
    }

    #[test]
    fn test_containing_truncates_to_first_day() {
        let month = SalaryMonth::containing(date(2026, 3, 17));
        assert_eq!(month.to_string(), "2026-03");
    }

    #[test]
    fn test_month_serializes_as_string() {
        let month = SalaryMonth::new(2026, 4).unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2026-04\"");

        let parsed: SalaryMonth = serde_json::from_str("\"2026-04\"").unwrap();
        assert_eq!(parsed, month);
        assert!(serde_json::from_str::<SalaryMonth>("\"2026-00\"").is_err());
    }

    #[test]
    fn test_window_from_month_matches_month_bounds() {
        let month = SalaryMonth::new(2026, 2).unwrap();
        let window = DateWindow::from(month);
        assert_eq!(window.from, Some(date(2026, 2, 1)));
        assert_eq!(window.to, Some(date(2026, 2, 28)));
    }

    #[test]
    fn test_unbounded_window_contains_everything() {
        let window = DateWindow::unbounded();
        assert!(window.contains_date(date(1990, 1, 1)));
        assert!(window.contains_date(date(2100, 12, 31)));
    }
}
