//! Fixed-column tabular export of a payroll batch, draft or approved.

use rust_decimal::Decimal;
use serde::Serialize;

use super::round_currency;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, PayrollBatch};

/// Column headings, in export order.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "Employee Code",
    "Employee Name",
    "Role",
    "Days Worked",
    "Hours Worked",
    "Overtime Hours",
    "Gross Pay",
    "Cash Advance",
    "Net Pay",
];

/// One exported line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
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
    /// Gross pay, rounded to currency precision.
    pub gross_pay: Decimal,
    /// Cash advances deducted, rounded to currency precision.
    pub cash_advance: Decimal,
    /// Net pay, rounded to currency precision.
    pub net_pay: Decimal,
}

/// A batch laid out for spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollExport {
    /// The period the batch covers.
    #[serde(flatten)]
    pub period: PayPeriod,
    /// One row per pay item, in batch order.
    pub rows: Vec<ExportRow>,
}

impl PayrollExport {
    /// Lays out a batch using the given employee records for names. Drafts
    /// export the same way as approved batches.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmployeeNotFound`] if an item's employee is
    /// missing from `employees`.
    pub fn build(
        batch: &PayrollBatch,
        employees: &[Employee],
        currency_scale: u32,
    ) -> EngineResult<Self> {
        let rows = batch
            .items()
            .iter()
            .map(|item| {
                let employee = employees
                    .iter()
                    .find(|e| e.id == item.employee_id)
                    .ok_or_else(|| EngineError::EmployeeNotFound {
                        employee_id: item.employee_id.clone(),
                    })?;
                Ok(ExportRow {
                    employee_code: employee.employee_code.clone(),
                    employee_name: employee.full_name.clone(),
                    role: employee.role.clone(),
                    days_worked: item.days_worked,
                    hours_worked: item.hours_worked,
                    overtime_hours: item.overtime_hours,
                    gross_pay: round_currency(item.gross_pay, currency_scale),
                    cash_advance: round_currency(item.cash_advance, currency_scale),
                    net_pay: round_currency(item.net_pay, currency_scale),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            period: batch.period(),
            rows,
        })
    }

    /// Suggested download file name.
    pub fn file_name(&self) -> String {
        format!(
            "payroll-{}-{}.csv",
            self.period.start_date(),
            self.period.end_date()
        )
    }

    /// Renders the export as CSV: a title line, a blank line, the header
    /// row, then one line per row.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 3);
        lines.push(format!(
            "Payroll Period: {} to {}",
            self.period.start_date(),
            self.period.end_date()
        ));
        lines.push(String::new());
        lines.push(EXPORT_COLUMNS.join(","));
        for row in &self.rows {
            let fields = [
                csv_field(&row.employee_code),
                csv_field(&row.employee_name),
                csv_field(&row.role),
                row.days_worked.to_string(),
                row.hours_worked.to_string(),
                row.overtime_hours.to_string(),
                row.gross_pay.to_string(),
                row.cash_advance.to_string(),
                row.net_pay.to_string(),
            ];
            lines.push(fields.join(","));
        }
        lines.join("\n")
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
