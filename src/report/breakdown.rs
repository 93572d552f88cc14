//! Per-employee payslip views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::round_currency;
use crate::models::{Employee, PayItem, PayPeriod, PayrollBatch, PayrollStatus};

/// One itemized deduction on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeductionLine {
    /// Printed label.
    pub label: String,
    /// Amount withheld, rounded to currency precision.
    pub amount: Decimal,
}

/// A payslip: one pay item broken down into earnings and deductions.
///
/// An empty `deductions` list means nothing was withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayBreakdown {
    /// The batch the item belongs to.
    pub payroll_id: Uuid,
    /// The period the batch covers.
    #[serde(flatten)]
    pub period: PayPeriod,
    /// The batch status.
    pub status: PayrollStatus,
    /// The employee paid.
    pub employee_id: String,
    /// The employee's code.
    pub employee_code: String,
    /// The employee's full name.
    pub employee_name: String,
    /// The employee's role.
    pub role: String,
    /// Complete shifts in the period.
    pub days_worked: u32,
    /// Total recorded hours.
    pub hours_worked: Decimal,
    /// Recorded overtime hours.
    pub overtime_hours: Decimal,
    /// Straight-rate pay.
    pub basic_pay: Decimal,
    /// Overtime premium.
    pub overtime_pay: Decimal,
    /// Pre-deduction earnings.
    pub gross_pay: Decimal,
    /// Non-zero deductions, itemized.
    pub deductions: Vec<DeductionLine>,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
}

impl PayBreakdown {
    /// Builds the breakdown of `item`, which must belong to `batch`.
    pub fn build(
        batch: &PayrollBatch,
        item: &PayItem,
        employee: &Employee,
        currency_scale: u32,
    ) -> Self {
        let money = |value: Decimal| round_currency(value, currency_scale);

        let deductions = [
            ("Cash Advance", item.cash_advance),
            ("Other Deductions", item.other_deductions),
        ]
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(label, amount)| DeductionLine {
            label: label.to_string(),
            amount: money(amount),
        })
        .collect();

        Self {
            payroll_id: batch.id(),
            period: batch.period(),
            status: batch.status(),
            employee_id: item.employee_id.clone(),
            employee_code: employee.employee_code.clone(),
            employee_name: employee.full_name.clone(),
            role: employee.role.clone(),
            days_worked: item.days_worked,
            hours_worked: item.hours_worked,
            overtime_hours: item.overtime_hours,
            basic_pay: money(item.basic_pay),
            overtime_pay: money(item.overtime_pay),
            gross_pay: money(item.gross_pay),
            deductions,
            total_deductions: money(item.total_deductions()),
            net_pay: money(item.net_pay),
        }
    }
}

/// A pay item listed alongside its batch header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payslip {
    /// The batch the item belongs to.
    pub payroll_id: Uuid,
    /// The period the batch covers.
    #[serde(flatten)]
    pub period: PayPeriod,
    /// The batch status.
    pub status: PayrollStatus,
    /// When the batch was generated.
    pub created_at: DateTime<Utc>,
    /// The employee's pay item.
    pub item: PayItem,
}

impl Payslip {
    /// Pairs an item with the header of the batch it came from.
    pub fn new(batch: &PayrollBatch, item: &PayItem) -> Self {
        Self {
            payroll_id: batch.id(),
            period: batch.period(),
            status: batch.status(),
            created_at: batch.created_at(),
            item: item.clone(),
        }
    }
}
