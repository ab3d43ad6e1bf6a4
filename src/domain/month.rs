//! Calendar month arithmetic on a linear month index.
//!
//! Months are compared and stepped as plain integers: `year * 12 + (month - 1)`.
//! The textual form is `YYYY-MM`, the same shape a month picker produces.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Linear encoding of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthIndex(i64);

impl MonthIndex {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Builds the index for a calendar date, ignoring the day.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(i64::from(date.year()) * 12 + i64::from(date.month0()))
    }

    /// Parses a `YYYY-MM` string.
    ///
    /// Returns `None` when the year or month segment is missing, non-numeric, or
    /// zero. Trailing segments (a day, for instance) are ignored, and a month
    /// outside `1..=12` carries into the neighbouring year.
    pub fn parse(value: &str) -> Option<Self> {
        let mut segments = value.split('-');
        let year = parse_segment(segments.next()?)?;
        let month = parse_segment(segments.next()?)?;
        year.checked_mul(12)?
            .checked_add(month.checked_sub(1)?)
            .map(Self)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub fn year(self) -> i64 {
        self.0.div_euclid(12)
    }

    /// Calendar month in `1..=12`.
    pub fn month(self) -> u32 {
        (self.0.rem_euclid(12) + 1) as u32
    }

    /// Moves forward (or backward, for negative `months`) by whole months.
    pub fn offset(self, months: i64) -> Self {
        Self(self.0.saturating_add(months))
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: MonthIndex) -> i64 {
        other.0 - self.0
    }

    /// First calendar day of the month, when it is representable as a date.
    pub fn first_day(self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year()).ok()?;
        NaiveDate::from_ymd_opt(year, self.month(), 1)
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

fn parse_segment(segment: &str) -> Option<i64> {
    segment.trim().parse::<i64>().ok().filter(|value| *value != 0)
}

/// Parses a `YYYY-MM` string into its month index; `None` means unparseable.
pub fn to_month_index(value: &str) -> Option<MonthIndex> {
    MonthIndex::parse(value)
}

/// Renders a month index back into its zero-padded `YYYY-MM` form.
pub fn month_from_index(index: MonthIndex) -> String {
    index.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_and_month_into_linear_index() {
        let index = to_month_index("2024-03").expect("valid month");
        assert_eq!(index.value(), 2024 * 12 + 2);
        assert_eq!(index.year(), 2024);
        assert_eq!(index.month(), 3);
    }

    #[test]
    fn rejects_missing_or_zero_segments() {
        assert_eq!(to_month_index(""), None);
        assert_eq!(to_month_index("2024"), None);
        assert_eq!(to_month_index("2024-00"), None);
        assert_eq!(to_month_index("0000-05"), None);
        assert_eq!(to_month_index("not-a-month"), None);
        assert_eq!(to_month_index("-2024-05"), None);
    }

    #[test]
    fn ignores_trailing_day_segment() {
        assert_eq!(to_month_index("2024-05-17"), to_month_index("2024-05"));
    }

    #[test]
    fn month_past_december_carries_into_next_year() {
        let index = to_month_index("2024-13").expect("carried month");
        assert_eq!(month_from_index(index), "2025-01");
    }

    #[test]
    fn round_trips_every_month_of_a_year_span() {
        for year in [1999, 2000, 2024, 2100] {
            for month in 1..=12 {
                let text = format!("{year}-{month:02}");
                let index = to_month_index(&text).expect("valid month");
                assert_eq!(month_from_index(index), text);
            }
        }
    }

    #[test]
    fn offsets_cross_year_boundaries() {
        let december = to_month_index("2023-12").unwrap();
        assert_eq!(december.next().to_string(), "2024-01");
        assert_eq!(december.offset(-12).to_string(), "2022-12");
        assert_eq!(december.months_until(december.offset(5)), 5);
    }

    #[test]
    fn from_date_matches_parsed_month() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        assert_eq!(MonthIndex::from_date(date), to_month_index("2025-07").unwrap());
        assert_eq!(
            MonthIndex::from_date(date).first_day(),
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
    }
}
