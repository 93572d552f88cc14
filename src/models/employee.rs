//! Employee model and related types.
//!
//! This module defines the Employee struct, which doubles as the
//! compensation profile the payroll engine reads rates from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents how an employee's pay is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Paid per complete day worked.
    Daily,
    /// Paid per hour worked.
    Hourly,
    /// Weekly arrangement, paid on an hourly basis.
    Weekly,
    /// Monthly arrangement, paid on an hourly basis.
    Monthly,
}

impl EmploymentType {
    /// Returns true if pay is derived from hours rather than days.
    ///
    /// Every type except [`EmploymentType::Daily`] is hourly-basis.
    pub fn is_hourly_basis(self) -> bool {
        !matches!(self, EmploymentType::Daily)
    }
}

/// Whether the employee currently takes part in payroll runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Included in new payroll batches.
    #[default]
    Active,
    /// Excluded from new payroll batches.
    Inactive,
}

/// Represents an employee record from the employee directory.
///
/// Rates are optional because the directory only requires the rate that
/// matches the employment type; the compensation calculator enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Human-facing employee code (e.g., "EMP-0042").
    pub employee_code: String,
    /// The employee's full name.
    pub full_name: String,
    /// Job role on site (e.g., "Foreman").
    pub role: String,
    /// How the employee's pay is computed.
    pub employment_type: EmploymentType,
    /// Pay per complete day, used by daily employees.
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
    /// Pay per hour, used by hourly-basis employees.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Whether the employee is active.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// The linked login account, if any.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Employee {
    /// Returns true if the employee is active.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmployeeStatus, EmploymentType};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     employee_code: "EMP-0001".to_string(),
    ///     full_name: "Ana Reyes".to_string(),
    ///     role: "Laborer".to_string(),
    ///     employment_type: EmploymentType::Daily,
    ///     daily_rate: Some(Decimal::new(500, 0)),
    ///     hourly_rate: None,
    ///     status: EmployeeStatus::Active,
    ///     user_id: None,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_daily_employee() {
        let json = r#"{
            "id": "emp_001",
            "employee_code": "EMP-0001",
            "full_name": "Ana Reyes",
            "role": "Laborer",
            "employment_type": "daily",
            "daily_rate": "500.00",
            "status": "active"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.employment_type, EmploymentType::Daily);
        assert_eq!(employee.daily_rate, Some(Decimal::new(50000, 2)));
        assert_eq!(employee.hourly_rate, None);
        assert!(employee.is_active());
        assert!(employee.user_id.is_none());
    }

    #[test]
    fn test_status_defaults_to_active() {
        let json = r#"{
            "id": "emp_002",
            "employee_code": "EMP-0002",
            "full_name": "Ben Cruz",
            "role": "Electrician",
            "employment_type": "weekly",
            "hourly_rate": "20"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.hourly_rate, Some(Decimal::new(20, 0)));
    }

    #[test]
    fn test_inactive_employee() {
        let json = r#"{
            "id": "emp_003",
            "employee_code": "EMP-0003",
            "full_name": "Cora Lim",
            "role": "Engineer",
            "employment_type": "monthly",
            "hourly_rate": "35.5",
            "status": "inactive",
            "user_id": "user_9"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(!employee.is_active());
        assert_eq!(employee.user_id.as_deref(), Some("user_9"));
    }

    #[test]
    fn test_hourly_basis_covers_every_non_daily_type() {
        assert!(!EmploymentType::Daily.is_hourly_basis());
        assert!(EmploymentType::Hourly.is_hourly_basis());
        assert!(EmploymentType::Weekly.is_hourly_basis());
        assert!(EmploymentType::Monthly.is_hourly_basis());
    }

    #[test]
    fn test_employment_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentType::Daily).unwrap(),
            "\"daily\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::Monthly).unwrap(),
            "\"monthly\""
        );
    }
}
