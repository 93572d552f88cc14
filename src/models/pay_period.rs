//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type, the inclusive date range a
//! payroll batch aggregates attendance and deductions over.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Represents an inclusive pay period.
///
/// A period can only be built through [`PayPeriod::new`] (or the week/month
/// helpers), so a value of this type always has `start_date <= end_date`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// )
/// .unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(period.day_count(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PayPeriod {
    #[serde(rename = "period_start")]
    start_date: NaiveDate,
    #[serde(rename = "period_end")]
    end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, rejecting a start after the end.
    ///
    /// A single-day period (`start == end`) is valid.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if start_date > end_date {
            return Err(EngineError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The Monday-to-Sunday week containing `date`, clamped to the
    /// representable date range.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// // 2026-01-15 is a Thursday
    /// let week = PayPeriod::week_containing(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    /// assert_eq!(week.start_date(), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
    /// assert_eq!(week.end_date(), NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
    /// ```
    pub fn week_containing(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let start_date = date
            .checked_sub_days(Days::new(offset))
            .unwrap_or(NaiveDate::MIN);
        let end_date = start_date
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX);
        Self {
            start_date,
            end_date,
        }
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Self {
        let start_date = date.with_day(1).unwrap_or(date);
        let end_date = start_date
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self {
            start_date,
            end_date,
        }
    }

    /// The first day of the period (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the period (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Checks if a given date falls within this pay period, inclusive of
    /// both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days in the period.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_half_month() -> PayPeriod {
        PayPeriod::new(date(2026, 1, 1), date(2026, 1, 15)).unwrap()
    }

    /// PP-001: contains_date within period
    #[test]
    fn test_contains_date_within_period() {
        let period = create_half_month();
        assert!(period.contains_date(date(2026, 1, 8)));
    }

    /// PP-002: contains_date outside period
    #[test]
    fn test_contains_date_outside_period() {
        let period = create_half_month();
        assert!(!period.contains_date(date(2026, 1, 16)));
        assert!(!period.contains_date(date(2025, 12, 31)));
    }

    /// PP-003: both bounds are inclusive
    #[test]
    fn test_contains_date_on_bounds() {
        let period = create_half_month();
        assert!(period.contains_date(period.start_date()));
        assert!(period.contains_date(period.end_date()));
    }

    /// PP-004: start after end is a validation error
    #[test]
    fn test_start_after_end_is_rejected() {
        let result = PayPeriod::new(date(2026, 1, 15), date(2026, 1, 1));
        match result {
            Err(EngineError::InvalidPeriod { start, end }) => {
                assert_eq!(start, date(2026, 1, 15));
                assert_eq!(end, date(2026, 1, 1));
            }
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_single_day_period_is_valid() {
        let period = PayPeriod::new(date(2026, 3, 2), date(2026, 3, 2)).unwrap();
        assert_eq!(period.day_count(), 1);
    }

    #[test]
    fn test_week_containing_sunday_starts_previous_monday() {
        let week = PayPeriod::week_containing(date(2026, 1, 18));
        assert_eq!(week.start_date(), date(2026, 1, 12));
        assert_eq!(week.end_date(), date(2026, 1, 18));
    }

    #[test]
    fn test_week_containing_monday_starts_same_day() {
        let week = PayPeriod::week_containing(date(2026, 1, 12));
        assert_eq!(week.start_date(), date(2026, 1, 12));
        assert_eq!(week.day_count(), 7);
    }

    /// PP-005: weeks at the edge of the calendar are clamped, not panics
    #[test]
    fn test_week_containing_clamps_at_date_limits() {
        for edge in [NaiveDate::MIN, NaiveDate::MAX] {
            let week = PayPeriod::week_containing(edge);
            assert!(week.start_date() <= week.end_date());
            assert!(week.contains_date(edge));
        }
        assert_eq!(PayPeriod::week_containing(NaiveDate::MAX).end_date(), NaiveDate::MAX);
    }

    #[test]
    fn test_month_containing_handles_february_and_december() {
        let february = PayPeriod::month_containing(date(2028, 2, 10));
        assert_eq!(february.start_date(), date(2028, 2, 1));
        assert_eq!(february.end_date(), date(2028, 2, 29));

        let december = PayPeriod::month_containing(date(2026, 12, 31));
        assert_eq!(december.start_date(), date(2026, 12, 1));
        assert_eq!(december.end_date(), date(2026, 12, 31));
    }

    #[test]
    fn test_serialize_pay_period() {
        let period = create_half_month();
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"period_start\":\"2026-01-01\""));
        assert!(json.contains("\"period_end\":\"2026-01-15\""));
    }
}
