//! Attendance records as stored by the attendance collaborator.
//!
//! Hour columns are kept as the raw stored text. Clock-out writes them as
//! fixed-point strings, but rows edited by hand may hold anything, so
//! parsing is deferred to aggregation where a bad value can be reported
//! against the employee and date it belongs to.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// The kind of attendance a row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceType {
    /// A normal clocked shift.
    #[default]
    Regular,
    /// A half day.
    HalfDay,
    /// The employee was absent.
    Absent,
}

/// One employee's attendance for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the row.
    pub id: String,
    /// The employee the row belongs to.
    pub employee_id: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// Clock-in time, if the employee clocked in.
    #[serde(default)]
    pub time_in: Option<NaiveTime>,
    /// Clock-out time, if the employee clocked out.
    #[serde(default)]
    pub time_out: Option<NaiveTime>,
    /// Raw stored total hours (includes overtime hours).
    #[serde(default, deserialize_with = "raw_value")]
    pub total_hours: Option<String>,
    /// Raw stored overtime hours.
    #[serde(default, deserialize_with = "raw_value")]
    pub overtime_hours: Option<String>,
    /// The kind of attendance recorded.
    #[serde(default)]
    pub attendance_type: AttendanceType,
}

impl AttendanceRecord {
    /// Returns true if the row has both a clock-in and a clock-out.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceRecord, AttendanceType};
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let open_shift = AttendanceRecord {
    ///     id: "att_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    ///     time_in: Some(NaiveTime::from_hms_opt(7, 0, 0).unwrap()),
    ///     time_out: None,
    ///     total_hours: None,
    ///     overtime_hours: None,
    ///     attendance_type: AttendanceType::Regular,
    /// };
    /// assert!(!open_shift.is_complete());
    /// ```
    pub fn is_complete(&self) -> bool {
        self.time_in.is_some() && self.time_out.is_some()
    }
}

/// Accepts a JSON/YAML string, number, or null and keeps it as text.
fn raw_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete_row_with_string_hours() {
        let json = r#"{
            "id": "att_001",
            "employee_id": "emp_001",
            "date": "2026-01-05",
            "time_in": "07:00:00",
            "time_out": "17:30:00",
            "total_hours": "10.50",
            "overtime_hours": "2.50",
            "attendance_type": "regular"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_complete());
        assert_eq!(record.total_hours.as_deref(), Some("10.50"));
        assert_eq!(record.overtime_hours.as_deref(), Some("2.50"));
    }

    #[test]
    fn test_numeric_hours_are_kept_as_text() {
        let json = r#"{
            "id": "att_002",
            "employee_id": "emp_001",
            "date": "2026-01-06",
            "time_in": "07:00:00",
            "time_out": "15:00:00",
            "total_hours": 8,
            "overtime_hours": 0.25
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.total_hours.as_deref(), Some("8"));
        assert_eq!(record.overtime_hours.as_deref(), Some("0.25"));
        assert_eq!(record.attendance_type, AttendanceType::Regular);
    }

    #[test]
    fn test_absent_row_has_no_times() {
        let json = r#"{
            "id": "att_003",
            "employee_id": "emp_001",
            "date": "2026-01-07",
            "total_hours": null,
            "attendance_type": "absent"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_complete());
        assert!(record.total_hours.is_none());
        assert!(record.overtime_hours.is_none());
        assert_eq!(record.attendance_type, AttendanceType::Absent);
    }

    #[test]
    fn test_half_day_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceType::HalfDay).unwrap(),
            "\"half_day\""
        );
    }
}
