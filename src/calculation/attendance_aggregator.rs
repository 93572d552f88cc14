//! Attendance aggregation.
//!
//! This module reduces an employee's raw attendance rows for a pay period
//! into the three quantities compensation is computed from.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, PayPeriod};

/// Aggregated attendance for one employee over one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Rows with both a clock-in and a clock-out.
    pub days_worked: u32,
    /// Sum of recorded total hours (overtime included).
    pub total_hours: Decimal,
    /// Sum of recorded overtime hours.
    pub overtime_hours: Decimal,
}

/// Aggregates an employee's attendance rows over a pay period.
///
/// Rows belonging to other employees or dated outside the period are
/// ignored, so callers may pass a whole-period fetch unfiltered.
///
/// - `days_worked` counts complete rows only; an open shift, an absence or
///   a half day without clock-out adds nothing.
/// - `total_hours` and `overtime_hours` sum the stored values of every
///   matching row, complete or not. Unset or blank values count as zero.
///
/// # Errors
///
/// Returns [`EngineError::MalformedAttendance`] if a stored hour value is
/// not a non-negative decimal number.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_attendance;
/// use payroll_engine::models::{AttendanceRecord, AttendanceType, PayPeriod};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// )
/// .unwrap();
/// let row = AttendanceRecord {
///     id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     time_in: NaiveTime::from_hms_opt(7, 0, 0),
///     time_out: NaiveTime::from_hms_opt(17, 0, 0),
///     total_hours: Some("10.00".to_string()),
///     overtime_hours: Some("2.00".to_string()),
///     attendance_type: AttendanceType::Regular,
/// };
///
/// let summary = aggregate_attendance("emp_001", &period, &[&row]).unwrap();
/// assert_eq!(summary.days_worked, 1);
/// assert_eq!(summary.total_hours, Decimal::new(10, 0));
/// assert_eq!(summary.overtime_hours, Decimal::new(2, 0));
/// ```
pub fn aggregate_attendance(
    employee_id: &str,
    period: &PayPeriod,
    records: &[&AttendanceRecord],
) -> EngineResult<AttendanceSummary> {
    let mut summary = AttendanceSummary::default();

    for record in records
        .iter()
        .filter(|r| r.employee_id == employee_id && period.contains_date(r.date))
    {
        if record.is_complete() {
            summary.days_worked += 1;
        }
        summary.total_hours = accumulate(
            record,
            "total_hours",
            record.total_hours.as_deref(),
            summary.total_hours,
        )?;
        summary.overtime_hours = accumulate(
            record,
            "overtime_hours",
            record.overtime_hours.as_deref(),
            summary.overtime_hours,
        )?;
    }

    Ok(summary)
}

/// Adds one row's hour value to a running total. A sum that no longer fits
/// a `Decimal` is reported against the row that overflowed it.
fn accumulate(
    record: &AttendanceRecord,
    field: &'static str,
    raw: Option<&str>,
    total: Decimal,
) -> EngineResult<Decimal> {
    let hours = parse_hours(record, field, raw)?;
    total
        .checked_add(hours)
        .ok_or_else(|| malformed(record, field, raw.unwrap_or_default()))
}

fn malformed(record: &AttendanceRecord, field: &'static str, value: &str) -> EngineError {
    EngineError::MalformedAttendance {
        employee_id: record.employee_id.clone(),
        date: record.date,
        field,
        value: value.to_string(),
    }
}

fn parse_hours(
    record: &AttendanceRecord,
    field: &'static str,
    raw: Option<&str>,
) -> EngineResult<Decimal> {
    let text = match raw.map(str::trim) {
        None | Some("") => return Ok(Decimal::ZERO),
        Some(text) => text,
    };


    let hours = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| malformed(record, field, text))?;
    if hours < Decimal::ZERO {
        return Err(malformed(record, field, text));
    }
    Ok(hours)
}
