//! Gross pay calculation.
//!
//! This module applies an employee's rate profile to their aggregated
//! attendance. Daily employees are paid per complete day and never earn
//! overtime. Hourly-basis employees are paid for every recorded hour at
//! the straight rate plus a half-rate premium on overtime hours; because
//! recorded total hours already include overtime, the net effect is
//! time-and-a-half on overtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AttendanceSummary;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Premium added on top of the straight rate for each overtime hour.
pub const OVERTIME_PREMIUM: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Gross pay for one employee, split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationResult {
    /// The rate the pay was computed from (daily or hourly).
    pub rate: Decimal,
    /// Days or hours at the straight rate.
    pub basic_pay: Decimal,
    /// Overtime premium (always zero for daily employees).
    pub overtime_pay: Decimal,
    /// `basic_pay + overtime_pay`.
    pub gross_pay: Decimal,
}

/// Calculates gross pay for an employee from their attendance summary.
///
/// No rounding is applied; amounts keep full decimal precision until they
/// are rendered.
///
/// # Errors
///
/// - [`EngineError::MissingRate`] if the rate the employment type needs is
///   absent.
/// - [`EngineError::InvalidAmount`] if that rate is negative, or if a pay
///   amount overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_compensation, AttendanceSummary};
/// use payroll_engine::models::{Employee, EmployeeStatus, EmploymentType};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_002".to_string(),
///     employee_code: "EMP-0002".to_string(),
///     full_name: "Ben Cruz".to_string(),
///     role: "Electrician".to_string(),
///     employment_type: EmploymentType::Hourly,
///     daily_rate: None,
///     hourly_rate: Some(Decimal::new(20, 0)),
///     status: EmployeeStatus::Active,
///     user_id: None,
/// };
/// let summary = AttendanceSummary {
///     days_worked: 10,
///     total_hours: Decimal::new(80, 0),
///     overtime_hours: Decimal::new(10, 0),
/// };
///
/// let result = calculate_compensation(&employee, &summary).unwrap();
/// assert_eq!(result.basic_pay, Decimal::new(1600, 0));
/// assert_eq!(result.overtime_pay, Decimal::new(100, 0));
/// assert_eq!(result.gross_pay, Decimal::new(1700, 0));
/// ```
pub fn calculate_compensation(
    employee: &Employee,
    attendance: &AttendanceSummary,
) -> EngineResult<CompensationResult> {
    let result = if employee.employment_type.is_hourly_basis() {
        let rate = required_rate(employee, employee.hourly_rate, "hourly")?;
        let basic_pay = checked(employee, "basic_pay", attendance.total_hours.checked_mul(rate))?;
        let overtime_pay = checked(
            employee,
            "overtime_pay",
            attendance
                .overtime_hours
                .checked_mul(rate)
                .and_then(|pay| pay.checked_mul(OVERTIME_PREMIUM)),
        )?;
        CompensationResult {
            rate,
            basic_pay,
            overtime_pay,
            gross_pay: checked(employee, "gross_pay", basic_pay.checked_add(overtime_pay))?,
        }
    } else {
        // Overtime hours are deliberately not paid on a daily rate.
        let rate = required_rate(employee, employee.daily_rate, "daily")?;
        let basic_pay = checked(
            employee,
            "basic_pay",
            Decimal::from(attendance.days_worked).checked_mul(rate),
        )?;
        CompensationResult {
            rate,
            basic_pay,
            overtime_pay: Decimal::ZERO,
            gross_pay: basic_pay,
        }
    };

    tracing::debug!(
        employee_id = %employee.id,
        employment_type = ?employee.employment_type,
        rate = %result.rate,
        gross_pay = %result.gross_pay,
        "Computed gross pay"
    );

    Ok(result)
}

fn checked(employee: &Employee, field: &str, amount: Option<Decimal>) -> EngineResult<Decimal> {
    amount.ok_or_else(|| EngineError::InvalidAmount {
        employee_id: employee.id.clone(),
        field: field.to_string(),
        message: "amount exceeds the representable range".to_string(),
    })
}

fn required_rate(
    employee: &Employee,
    rate: Option<Decimal>,
    rate_name: &'static str,
) -> EngineResult<Decimal> {
    let rate = rate.ok_or_else(|| EngineError::MissingRate {
        employee_id: employee.id.clone(),
        employment_type: employee.employment_type,
        rate: rate_name,
    })?;

    if rate < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            employee_id: employee.id.clone(),
            field: format!("{}_rate", rate_name),
            message: format!("rate {} is negative", rate),
        });
    }

    Ok(rate)
}
